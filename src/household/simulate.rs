//! Year simulation of a parameterized household.

use std::time::Instant;

use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::chronology::{Chronology, DayType};
use crate::error::{ConfigurationError, SimulationError};
use crate::occupancy::{
    build_year, merge, Clock, DayRunEngine, HouseholdOccupancy, WeekAssembler, WeekTemplate,
    YearSeries, BINS_PER_DAY,
};

use super::Household;

/// Retry statistics of one household year.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimulationDiagnostics {
    /// Distinct day sequences generated (three per simulated member).
    pub days_simulated: usize,
    /// Candidates sampled over all days.
    pub attempts: u64,
    /// Days whose sequence is an unvalidated deadline fallback.
    pub fallback_days: usize,
}

/// Output of `Household::simulate`.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub household: String,
    pub seed: u64,
    pub chronology: Chronology,
    /// Household occupancy, one state per ten-minute bin.
    pub occ: HouseholdOccupancy,
    /// Year series of each simulated member.
    pub occ_m: Vec<YearSeries>,
    /// Labels of the members in `occ_m`, in the same order.
    pub member_labels: Vec<String>,
    pub weeks: Vec<WeekTemplate>,
    pub diagnostics: SimulationDiagnostics,
}

impl SimulationResult {
    pub fn day_count(&self) -> usize {
        self.chronology.day_count
    }
}

impl Household {
    /// Simulate `year` on the wall clock with the household's settings.
    pub fn simulate(&self, year: i32) -> Result<SimulationResult, SimulationError> {
        self.simulate_with(year, &self.config.engine())
    }

    /// Simulate `year` with an explicit day run engine.
    pub fn simulate_with<C: Clock>(
        &self,
        year: i32,
        engine: &DayRunEngine<C>,
    ) -> Result<SimulationResult, SimulationError> {
        let started = Instant::now();
        let chronology = Chronology::build(year, self.config.day_count_rule)
            .ok_or(ConfigurationError::InvalidYear(year))?;
        let total_bins = chronology.day_count * BINS_PER_DAY;

        let assembler = WeekAssembler::new(engine).with_start_state(self.config.start_state);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.occupancy);
        let mut diagnostics = SimulationDiagnostics::default();
        let mut weeks = Vec::new();
        let mut occ_m = Vec::new();
        let mut member_labels = Vec::new();

        for member in &self.members {
            let Some(clusters) = &member.clusters else {
                continue;
            };
            let week = assembler.build_week(clusters, &mut rng);

            diagnostics.days_simulated += DayType::ALL.len();
            diagnostics.attempts += u64::from(week.attempts);
            diagnostics.fallback_days += week.fallback_days.len();
            for day_type in &week.fallback_days {
                warn!(
                    "household {}: {} {} is a deadline fallback",
                    self.name, member.label, day_type
                );
            }

            occ_m.push(build_year(&week, &chronology));
            member_labels.push(member.label.clone());
            weeks.push(week);
        }

        let occ = if occ_m.is_empty() {
            warn!("household {} has no simulated members; leaving it unoccupied", self.name);
            HouseholdOccupancy::unoccupied(total_bins)
        } else {
            merge(&occ_m)?
        };

        info!(
            "household {} simulated for {} ({} days, {} members) in {:.2}s: {} attempts, {} fallbacks",
            self.name,
            year,
            chronology.day_count,
            occ_m.len(),
            started.elapsed().as_secs_f64(),
            diagnostics.attempts,
            diagnostics.fallback_days
        );

        Ok(SimulationResult {
            household: self.name.clone(),
            seed: self.seeds.master,
            chronology,
            occ,
            occ_m,
            member_labels,
            weeks,
            diagnostics,
        })
    }
}
