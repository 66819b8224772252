//! Representative week of one household member.

use std::sync::Arc;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chronology::DayType;

use super::cluster::{ClusterModel, DaySequence, State};
use super::engine::{Clock, DayRunEngine};
use super::{BINS_PER_WEEK, DEFAULT_START_STATE};

/// Cluster models of one member, one per day-type.
#[derive(Clone, Debug)]
pub struct MemberClusters {
    pub weekday: Arc<ClusterModel>,
    pub saturday: Arc<ClusterModel>,
    pub sunday: Arc<ClusterModel>,
}

impl MemberClusters {
    pub fn get(&self, day_type: DayType) -> &ClusterModel {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }
}

/// Day-types whose accepted days cannot hand `start` on when the week is
/// tiled: the repeated weekday (Monday to Tuesday and on) and Sunday (into
/// the next Monday). An accepted day ends in the last state of its cluster's
/// reduced sequence.
pub fn tiling_breaks(clusters: &MemberClusters, start: State) -> Vec<DayType> {
    [DayType::Weekday, DayType::Sunday]
        .into_iter()
        .filter(|&d| clusters.get(d).red.last() != Some(&start))
        .collect()
}

/// One weekday, Saturday and Sunday, chained end to start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTemplate {
    pub weekday: DaySequence,
    pub saturday: DaySequence,
    pub sunday: DaySequence,
    /// Candidates sampled over the three days.
    pub attempts: u32,
    /// Day-types whose sequence is a deadline fallback.
    pub fallback_days: Vec<DayType>,
}

impl WeekTemplate {
    pub fn day(&self, day_type: DayType) -> &DaySequence {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }

    /// Monday to Sunday: the weekday five times, then Saturday and Sunday.
    pub fn week_states(&self) -> Vec<State> {
        let mut week = Vec::with_capacity(BINS_PER_WEEK);
        for _ in 0..5 {
            week.extend_from_slice(self.weekday.states());
        }
        week.extend_from_slice(self.saturday.states());
        week.extend_from_slice(self.sunday.states());
        week
    }
}

/// Chains day runs into a representative week.
pub struct WeekAssembler<'a, C: Clock> {
    engine: &'a DayRunEngine<C>,
    start_state: State,
}

impl<'a, C: Clock> WeekAssembler<'a, C> {
    pub fn new(engine: &'a DayRunEngine<C>) -> Self {
        Self {
            engine,
            start_state: DEFAULT_START_STATE,
        }
    }

    /// Override the state the weekday starts in.
    pub fn with_start_state(mut self, start_state: State) -> Self {
        self.start_state = start_state;
        self
    }

    /// Simulate the weekday, then Saturday from its last state, then Sunday.
    pub fn build_week<R: Rng>(&self, clusters: &MemberClusters, rng: &mut R) -> WeekTemplate {
        let mut attempts = 0;
        let mut fallback_days = Vec::new();
        let mut run = |day_type: DayType, start: State, rng: &mut R| {
            let outcome = self.engine.run(start, clusters.get(day_type), rng);
            attempts += outcome.attempts;
            if outcome.timed_out {
                fallback_days.push(day_type);
            }
            outcome.sequence
        };

        let weekday = run(DayType::Weekday, self.start_state, rng);
        let saturday = run(DayType::Saturday, weekday.last_state(), rng);
        let sunday = run(DayType::Sunday, saturday.last_state(), rng);
        debug!("week assembled in {} attempts", attempts);

        WeekTemplate {
            weekday,
            saturday,
            sunday,
            attempts,
            fallback_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::test_support::*;
    use crate::occupancy::validator::{reduce, ValidationRules};
    use crate::occupancy::engine::SystemClock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn weekend_schedule(coarse: usize) -> State {
        match coarse {
            0..=19 => 2,
            20..=41 => 1,
            _ => 2,
        }
    }

    fn member() -> MemberClusters {
        MemberClusters {
            weekday: Arc::new(noisy_model(&WORKDAY_RED, 0.99, workday_schedule)),
            saturday: Arc::new(noisy_model(&[2, 1, 2], 0.99, weekend_schedule)),
            sunday: Arc::new(noisy_model(&[2, 1, 2], 0.99, weekend_schedule)),
        }
    }

    #[test]
    fn test_week_days_are_continuous() {
        let engine = DayRunEngine::with_clock(SystemClock::new(), None, ValidationRules::default());
        let assembler = WeekAssembler::new(&engine);
        let mut rng = ChaCha8Rng::seed_from_u64(2013);

        let week = assembler.build_week(&member(), &mut rng);
        assert_eq!(week.weekday.first_state(), DEFAULT_START_STATE);
        assert_eq!(week.saturday.first_state(), week.weekday.last_state());
        assert_eq!(week.sunday.first_state(), week.saturday.last_state());
        assert!(week.fallback_days.is_empty());
        assert!(week.attempts >= 3);
        assert_eq!(reduce(week.sunday.states()), vec![2, 1, 2]);
    }

    #[test]
    fn test_tiling_breaks() {
        assert!(tiling_breaks(&member(), DEFAULT_START_STATE).is_empty());

        let mut clusters = member();
        clusters.sunday = Arc::new(noisy_model(&[2, 1], 0.99, weekend_schedule));
        assert_eq!(tiling_breaks(&clusters, DEFAULT_START_STATE), vec![DayType::Sunday]);
        assert_eq!(tiling_breaks(&clusters, 1), vec![DayType::Weekday]);
    }

    #[test]
    fn test_week_layout() {
        let engine = DayRunEngine::new(ValidationRules::default());
        let clusters = MemberClusters {
            weekday: Arc::new(scheduled_model(&WORKDAY_RED, workday_schedule)),
            saturday: Arc::new(scheduled_model(&[2, 1, 2], weekend_schedule)),
            sunday: Arc::new(scheduled_model(&[2, 1, 2], weekend_schedule)),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let week = WeekAssembler::new(&engine).build_week(&clusters, &mut rng);
        let states = week.week_states();

        assert_eq!(states.len(), BINS_PER_WEEK);
        for day in 0..5 {
            assert_eq!(&states[day * 144..(day + 1) * 144], week.weekday.states());
        }
        assert_eq!(&states[720..864], week.saturday.states());
        assert_eq!(&states[864..], week.sunday.states());
        assert_eq!(week.attempts, 3);
    }
}
