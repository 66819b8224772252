//! Occupancy state-chain generation.
//!
//! A member's year is built bottom-up: Markov-sampled days are validated
//! against their cluster's reduced sequence, chained into a representative
//! week, tiled over the calendar year, and finally merged with the other
//! members into one household signal.

pub mod cluster;
pub mod engine;
pub mod merge;
pub mod sampler;
pub mod validator;
pub mod week;
pub mod year;

pub use cluster::{ClusterModel, DaySequence, State};
pub use engine::{Clock, DayOutcome, DayRunEngine, SteppingClock, SystemClock};
pub use merge::{merge, HouseholdOccupancy, MergeError};
pub use sampler::sample_day;
pub use validator::{is_valid, reduce, shortest_run, ValidationRules};
pub use week::{tiling_breaks, MemberClusters, WeekAssembler, WeekTemplate};
pub use year::{build_year, YearSeries};

/// Ten-minute bins per day.
pub const BINS_PER_DAY: usize = 144;
/// Coarse probability-table bins per day.
pub const COARSE_BINS_PER_DAY: usize = 48;
/// Fine bins covered by one coarse bin.
pub const BINS_PER_COARSE: usize = BINS_PER_DAY / COARSE_BINS_PER_DAY;
pub const DAYS_PER_WEEK: usize = 7;
pub const BINS_PER_WEEK: usize = BINS_PER_DAY * DAYS_PER_WEEK;
pub const MINUTES_PER_BIN: usize = 10;

/// At home, low activity. Every week starts here.
pub const DEFAULT_START_STATE: State = 2;
/// Least present state; the merge starts from it.
pub const LEAST_ACTIVE_STATE: State = 3;

/// Coarse table bin of a fine bin.
pub fn coarse_bin(bin: usize) -> usize {
    (bin / BINS_PER_COARSE).min(COARSE_BINS_PER_DAY - 1)
}
