//! Markov day sampler.
//!
//! Walks the 144 ten-minute bins of a day, alternating sojourn-duration and
//! transition draws from the cluster tables of the current coarse bin.

use rand::Rng;

use super::cluster::{ClusterModel, DaySequence, State};
use super::{coarse_bin, BINS_PER_DAY};

/// Sample one candidate day starting in `start`.
///
/// The start state keeps its first drawn duration in full; every later state
/// already occupies the bin it was drawn in, so its duration is shortened by one.
pub fn sample_day<R: Rng>(start: State, model: &ClusterModel, rng: &mut R) -> DaySequence {
    let mut states = Vec::with_capacity(BINS_PER_DAY);
    states.push(start);
    let mut remaining = model.sample_duration(start, coarse_bin(0), rng);

    for bin in 1..BINS_PER_DAY {
        let previous = states[bin - 1];
        if remaining == 0 {
            let coarse = coarse_bin(bin);
            let next = model.sample_transition(previous, coarse, rng);
            remaining = model.sample_duration(next, coarse, rng) - 1;
            states.push(next);
        } else {
            states.push(previous);
            remaining -= 1;
        }
    }

    DaySequence::from_full_day(states)
}
