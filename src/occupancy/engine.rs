//! Day run engine: sample and validate until a day matches its cluster.
//!
//! The retry loop is bounded only by a wall-clock budget. When the budget
//! runs out the last candidate is returned anyway and flagged as a fallback,
//! so a cluster whose reduced sequence is practically unreachable cannot
//! stall a household simulation.

use std::cell::Cell;
use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::Rng;

use super::cluster::{ClusterModel, DaySequence, State};
use super::sampler::sample_day;
use super::validator::{is_valid, ValidationRules};

/// Default real-time budget for a single day.
pub const DEFAULT_DAY_BUDGET: Duration = Duration::from_secs(10);

/// Monotonic time source for the retry deadline.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that advances by a fixed step every time it is read.
///
/// Turns the time budget into a reproducible attempt budget.
#[derive(Debug)]
pub struct SteppingClock {
    step: Duration,
    reads: Cell<u32>,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self { step, reads: Cell::new(0) }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Duration {
        let reads = self.reads.get() + 1;
        self.reads.set(reads);
        self.step * reads
    }
}

/// Result of one engine run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayOutcome {
    pub sequence: DaySequence,
    /// Candidates sampled, including the returned one.
    pub attempts: u32,
    /// Whether the returned sequence matches the cluster.
    pub valid: bool,
    /// The budget ran out and `sequence` is the last, unvalidated candidate.
    pub timed_out: bool,
}

/// Sampler plus validator with a bounded retry loop.
pub struct DayRunEngine<C: Clock = SystemClock> {
    clock: C,
    budget: Option<Duration>,
    rules: ValidationRules,
}

impl DayRunEngine<SystemClock> {
    /// Engine on the wall clock with the default 10 second budget.
    pub fn new(rules: ValidationRules) -> Self {
        Self::with_clock(SystemClock::new(), Some(DEFAULT_DAY_BUDGET), rules)
    }
}

impl<C: Clock> DayRunEngine<C> {
    /// Engine with an explicit clock and budget. `None` retries without limit.
    pub fn with_clock(clock: C, budget: Option<Duration>, rules: ValidationRules) -> Self {
        Self { clock, budget, rules }
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Produce one day starting in `start` for `model`.
    ///
    /// Every attempt re-samples from scratch. At least one candidate is
    /// always drawn, even with a zero budget.
    pub fn run<R: Rng>(&self, start: State, model: &ClusterModel, rng: &mut R) -> DayOutcome {
        let started = self.clock.now();
        let mut attempts = 0u32;

        loop {
            let candidate = sample_day(start, model, rng);
            attempts += 1;

            if is_valid(candidate.states(), &model.red, &self.rules) {
                debug!("day from state {} accepted after {} attempts", start, attempts);
                return DayOutcome {
                    sequence: candidate,
                    attempts,
                    valid: true,
                    timed_out: false,
                };
            }

            if let Some(budget) = self.budget {
                let elapsed = self.clock.now().saturating_sub(started);
                if elapsed > budget {
                    warn!(
                        "no day matching {:?} after {} attempts in {:.1}s; keeping last candidate",
                        model.red,
                        attempts,
                        elapsed.as_secs_f64()
                    );
                    return DayOutcome {
                        sequence: candidate,
                        attempts,
                        valid: false,
                        timed_out: true,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::test_support::*;
    use crate::occupancy::validator::reduce;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_unbounded_run_reaches_reduced_sequence() {
        let model = noisy_model(&WORKDAY_RED, 0.99, workday_schedule);
        let engine = DayRunEngine::with_clock(SystemClock::new(), None, ValidationRules::default());

        for seed in 0..5 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcome = engine.run(2, &model, &mut rng);
            assert!(outcome.valid);
            assert!(!outcome.timed_out);
            assert_eq!(reduce(outcome.sequence.states()), WORKDAY_RED.to_vec());
        }
    }

    #[test]
    fn test_first_valid_candidate_is_kept() {
        let model = scheduled_model(&WORKDAY_RED, workday_schedule);
        let engine = DayRunEngine::new(ValidationRules::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = engine.run(2, &model, &mut rng);
        assert!(outcome.valid);
        assert_eq!(outcome.attempts, 1);
    }

    #[test]
    fn test_unreachable_sequence_stops_at_deadline() {
        // The schedule only ever produces [2, 3, 1, 2]
        let model = scheduled_model(&[1, 3, 1, 3, 1], workday_schedule);
        let clock = SteppingClock::new(Duration::from_secs(1));
        let engine = DayRunEngine::with_clock(clock, Some(DEFAULT_DAY_BUDGET), ValidationRules::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = engine.run(2, &model, &mut rng);
        assert!(outcome.timed_out);
        assert!(!outcome.valid);
        // Attempt n finishes n seconds after the start; 11s is the first reading past 10s
        assert_eq!(outcome.attempts, 11);
        assert_eq!(outcome.sequence.states().len(), 144);
    }

    #[test]
    fn test_zero_budget_still_samples_once() {
        let model = scheduled_model(&[1, 3], workday_schedule);
        let clock = SteppingClock::new(Duration::from_millis(1));
        let engine = DayRunEngine::with_clock(clock, Some(Duration::ZERO), ValidationRules::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = engine.run(2, &model, &mut rng);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.timed_out);
    }

    #[test]
    fn test_min_duration_rule_applies() {
        // The scheduled day ends with a 6-bin run
        let model = scheduled_model(&WORKDAY_RED, workday_schedule);
        let strict = ValidationRules {
            require_min_duration: true,
            min_run_bins: 10,
        };
        let clock = SteppingClock::new(Duration::from_secs(1));
        let engine = DayRunEngine::with_clock(clock, Some(Duration::from_secs(3)), strict);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = engine.run(2, &model, &mut rng);
        assert!(outcome.timed_out);
        assert_eq!(outcome.attempts, 4);
    }
}
