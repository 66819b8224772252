//! Year assembly: tile a representative week over the calendar year.

use serde::{Deserialize, Serialize};

use crate::chronology::Chronology;

use super::cluster::State;
use super::week::WeekTemplate;
use super::BINS_PER_DAY;

/// One member's states for every ten-minute bin of the simulated year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSeries {
    states: Vec<State>,
}

impl YearSeries {
    pub fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States of one day of the year (0-based).
    pub fn day(&self, day: usize) -> Option<&[State]> {
        self.states.get(day * BINS_PER_DAY..(day + 1) * BINS_PER_DAY)
    }
}

impl AsRef<[State]> for YearSeries {
    fn as_ref(&self) -> &[State] {
        &self.states
    }
}

/// Tile `week` so the first bin falls on the weekday of January 1 and keep
/// exactly `day_count` days.
///
/// The window is computed from this member's own week, so members never
/// share slicing state.
pub fn build_year(week: &WeekTemplate, chronology: &Chronology) -> YearSeries {
    let week_states = week.week_states();
    let offset = BINS_PER_DAY * chronology.first_weekday() as usize;
    let len = BINS_PER_DAY * chronology.day_count;

    let states = week_states
        .iter()
        .copied()
        .cycle()
        .skip(offset)
        .take(len)
        .collect();

    YearSeries { states }
}
