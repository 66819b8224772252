//! Day sequence validation against a cluster's reduced sequence.

use serde::{Deserialize, Serialize};

use super::cluster::State;

/// Acceptance rules applied on top of the reduced-sequence match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Reject days containing a run shorter than `min_run_bins`.
    pub require_min_duration: bool,
    /// Shortest acceptable run, in bins (3 bins = 30 minutes).
    pub min_run_bins: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_min_duration: false,
            min_run_bins: 3,
        }
    }
}

/// Reduced form of a sequence: the first state, then every state that
/// differs from its predecessor.
pub fn reduce(states: &[State]) -> Vec<State> {
    let mut reduced: Vec<State> = Vec::new();
    for &s in states {
        if reduced.last() != Some(&s) {
            reduced.push(s);
        }
    }
    reduced
}

/// Length of the shortest maximal run of one state (0 for an empty sequence).
pub fn shortest_run(states: &[State]) -> usize {
    states
        .chunk_by(|a, b| a == b)
        .map(|run| run.len())
        .min()
        .unwrap_or(0)
}

/// Whether `states` reproduces `red` and satisfies `rules`.
pub fn is_valid(states: &[State], red: &[State], rules: &ValidationRules) -> bool {
    if reduce(states) != red {
        return false;
    }
    !rules.require_min_duration || shortest_run(states) >= rules.min_run_bins
}
