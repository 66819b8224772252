//! Markov cluster models and the day sequences sampled from them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stats::{is_probability_row, pick_index};

use super::{BINS_PER_DAY, COARSE_BINS_PER_DAY};

/// Discrete occupancy state code. Lower codes are more present/active.
pub type State = u8;

/// Probability model of one time-use cluster for one day-type.
///
/// Tables are indexed by coarse bin first, then by the position of a state
/// in `states`:
/// - `transition[c][i][j]`: probability of moving from `states[i]` to `states[j]`
/// - `duration[c][i][k]`: probability that `states[i]` is held for `k + 1` bins
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterModel {
    pub states: Vec<State>,
    /// Reduced sequence every accepted day must reproduce.
    pub red: Vec<State>,
    pub transition: Vec<Vec<Vec<f64>>>,
    pub duration: Vec<Vec<Vec<f64>>>,
}

impl ClusterModel {
    /// Build a model, checking the table shapes and probabilities.
    pub fn new(
        states: Vec<State>,
        red: Vec<State>,
        transition: Vec<Vec<Vec<f64>>>,
        duration: Vec<Vec<Vec<f64>>>,
    ) -> Result<Self, String> {
        let model = Self { states, red, transition, duration };
        model.check()?;
        Ok(model)
    }

    /// Describe the first structural problem of the model, if any.
    pub fn check(&self) -> Result<(), String> {
        let n = self.states.len();
        if n == 0 {
            return Err("no states declared".to_string());
        }
        for (i, s) in self.states.iter().enumerate() {
            if self.states[..i].contains(s) {
                return Err(format!("state {} declared twice", s));
            }
        }
        if self.red.is_empty() {
            return Err("reduced sequence is empty".to_string());
        }
        if let Some(s) = self.red.iter().find(|s| !self.states.contains(s)) {
            return Err(format!("reduced sequence uses undeclared state {}", s));
        }
        if self.red.windows(2).any(|w| w[0] == w[1]) {
            return Err("reduced sequence repeats a state back to back".to_string());
        }

        check_table("transition", &self.transition, n, Some(n))?;
        check_table("duration", &self.duration, n, None)?;
        Ok(())
    }

    /// Position of a state in the model's tables.
    pub fn state_index(&self, state: State) -> Option<usize> {
        self.states.iter().position(|&s| s == state)
    }

    /// Longest sojourn (in bins) the duration table can produce.
    pub fn max_duration(&self) -> usize {
        self.duration
            .iter()
            .flat_map(|bin| bin.iter().map(|row| row.len()))
            .max()
            .unwrap_or(1)
    }

    /// Draw the state following `from` in coarse bin `coarse`.
    ///
    /// Unknown states and empty rows hold the current state.
    pub fn sample_transition<R: Rng>(&self, from: State, coarse: usize, rng: &mut R) -> State {
        let Some(i) = self.state_index(from) else {
            return from;
        };
        let row = &self.transition[coarse.min(COARSE_BINS_PER_DAY - 1)][i];
        pick_index(row, rng).map(|j| self.states[j]).unwrap_or(from)
    }

    /// Draw how many bins `state` is held when entered in coarse bin `coarse`.
    ///
    /// Always at least one bin.
    pub fn sample_duration<R: Rng>(&self, state: State, coarse: usize, rng: &mut R) -> usize {
        let Some(i) = self.state_index(state) else {
            return 1;
        };
        let row = &self.duration[coarse.min(COARSE_BINS_PER_DAY - 1)][i];
        pick_index(row, rng).map(|k| k + 1).unwrap_or(1)
    }
}

fn check_table(
    name: &str,
    table: &[Vec<Vec<f64>>],
    states: usize,
    row_len: Option<usize>,
) -> Result<(), String> {
    if table.len() != COARSE_BINS_PER_DAY {
        return Err(format!(
            "{} table has {} time bins, expected {}",
            name,
            table.len(),
            COARSE_BINS_PER_DAY
        ));
    }
    for (c, bin) in table.iter().enumerate() {
        if bin.len() != states {
            return Err(format!(
                "{} table bin {} has {} rows, expected {}",
                name,
                c,
                bin.len(),
                states
            ));
        }
        for (i, row) in bin.iter().enumerate() {
            match row_len {
                Some(len) if row.len() != len => {
                    return Err(format!(
                        "{} table bin {} row {} has {} entries, expected {}",
                        name,
                        c,
                        i,
                        row.len(),
                        len
                    ));
                }
                None if row.is_empty() => {
                    return Err(format!("{} table bin {} row {} is empty", name, c, i));
                }
                _ => {}
            }
            if !is_probability_row(row) {
                return Err(format!(
                    "{} table bin {} row {} holds a negative or non-finite probability",
                    name, c, i
                ));
            }
        }
    }
    Ok(())
}

/// One simulated day of 144 ten-minute states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySequence {
    states: Vec<State>,
}

impl DaySequence {
    /// Wrap a full day of states. Returns `None` unless exactly 144 states are given.
    pub fn from_states(states: Vec<State>) -> Option<Self> {
        (states.len() == BINS_PER_DAY).then_some(Self { states })
    }

    /// Wrap states the caller guarantees to be a full day.
    pub(crate) fn from_full_day(states: Vec<State>) -> Self {
        debug_assert_eq!(states.len(), BINS_PER_DAY);
        Self { states }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn first_state(&self) -> State {
        self.states[0]
    }

    pub fn last_state(&self) -> State {
        self.states[BINS_PER_DAY - 1]
    }
}
