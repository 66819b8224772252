//! Household merge: the most present member wins each time step.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cluster::State;
use super::LEAST_ACTIVE_STATE;

/// Household-level presence signal, one state per ten-minute bin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdOccupancy {
    states: Vec<State>,
}

impl HouseholdOccupancy {
    /// Household in which nobody is ever present.
    pub fn unoccupied(len: usize) -> Self {
        Self {
            states: vec![LEAST_ACTIVE_STATE; len],
        }
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

    /// Share of bins spent in each state, ordered by state code.
    pub fn state_shares(&self) -> Vec<(State, f64)> {
        let mut counts = std::collections::BTreeMap::new();
        for &s in &self.states {
            *counts.entry(s).or_insert(0usize) += 1;
        }
        let total = self.states.len().max(1) as f64;
        counts
            .into_iter()
            .map(|(s, n)| (s, n as f64 / total))
            .collect()
    }
}

impl AsRef<[State]> for HouseholdOccupancy {
    fn as_ref(&self) -> &[State] {
        &self.states
    }
}

/// Errors raised while merging member series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// No member series to merge
    NoMembers,
    /// A member series differs in length from the first one
    LengthMismatch {
        member: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::NoMembers => write!(f, "No member series to merge"),
            MergeError::LengthMismatch { member, expected, found } => write!(
                f,
                "Member {} series has {} bins, expected {}",
                member, found, expected
            ),
        }
    }
}

impl std::error::Error for MergeError {}

/// Element-wise minimum state code over all members.
///
/// Every length is checked before any bin is merged.
pub fn merge<S: AsRef<[State]>>(series: &[S]) -> Result<HouseholdOccupancy, MergeError> {
    let expected = series.first().ok_or(MergeError::NoMembers)?.as_ref().len();
    for (member, s) in series.iter().enumerate() {
        let found = s.as_ref().len();
        if found != expected {
            return Err(MergeError::LengthMismatch { member, expected, found });
        }
    }

    let mut merged = HouseholdOccupancy::unoccupied(expected);
    for s in series {
        for (out, &state) in merged.states.iter_mut().zip(s.as_ref()) {
            if state < *out {
                *out = state;
            }
        }
    }
    Ok(merged)
}
