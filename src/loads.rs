//! Inputs handed to the downstream load models (lighting, plug loads, hot
//! water, heating setpoints). Those models step per minute while occupancy
//! is in ten-minute bins, so both are walked in lockstep here.

use std::fmt;

use crate::household::SimulationResult;
use crate::occupancy::{HouseholdOccupancy, State, YearSeries, BINS_PER_DAY, MINUTES_PER_BIN};

pub const MINUTES_PER_DAY: usize = BINS_PER_DAY * MINUTES_PER_BIN;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadInputError {
    /// Irradiance series does not cover the simulated year
    IrradianceTooShort { expected: usize, found: usize },
    /// A member series differs in length from the household series
    SeriesLengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for LoadInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadInputError::IrradianceTooShort { expected, found } => write!(
                f,
                "Irradiance series has {} minutes, at least {} needed",
                found, expected
            ),
            LoadInputError::SeriesLengthMismatch { expected, found } => write!(
                f,
                "Member series has {} bins, household series has {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for LoadInputError {}

/// Occupancy plus the one-minute global irradiance the load models consume.
#[derive(Debug, Clone)]
pub struct LoadInputs<'a> {
    occ: &'a HouseholdOccupancy,
    occ_m: &'a [YearSeries],
    irradiance: &'a [f64],
    day_count: usize,
}

/// One minute of the simulated year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinuteStep {
    /// Minute of the year (0-based)
    pub minute: usize,
    /// Ten-minute occupancy bin containing the minute
    pub bin: usize,
    pub household_state: State,
    /// Global irradiance in W/m²
    pub irradiance: f64,
}

impl<'a> LoadInputs<'a> {
    pub fn new(
        occ: &'a HouseholdOccupancy,
        occ_m: &'a [YearSeries],
        irradiance: &'a [f64],
        day_count: usize,
    ) -> Result<Self, LoadInputError> {
        let bins = day_count * BINS_PER_DAY;
        if occ.len() != bins {
            return Err(LoadInputError::SeriesLengthMismatch {
                expected: bins,
                found: occ.len(),
            });
        }
        if let Some(member) = occ_m.iter().find(|m| m.len() != bins) {
            return Err(LoadInputError::SeriesLengthMismatch {
                expected: bins,
                found: member.len(),
            });
        }
        let expected = day_count * MINUTES_PER_DAY;
        if irradiance.len() < expected {
            return Err(LoadInputError::IrradianceTooShort {
                expected,
                found: irradiance.len(),
            });
        }

        Ok(Self {
            occ,
            occ_m,
            irradiance,
            day_count,
        })
    }

    pub fn from_result(result: &'a SimulationResult, irradiance: &'a [f64]) -> Result<Self, LoadInputError> {
        Self::new(&result.occ, &result.occ_m, irradiance, result.day_count())
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    pub fn members(&self) -> &[YearSeries] {
        self.occ_m
    }

    /// Every minute of the year with the occupancy bin it falls in.
    /// Irradiance beyond the simulated year is ignored.
    pub fn minutes(&self) -> impl Iterator<Item = MinuteStep> + '_ {
        let states = self.occ.states();
        self.irradiance[..self.day_count * MINUTES_PER_DAY]
            .iter()
            .enumerate()
            .map(move |(minute, &irradiance)| {
                let bin = minute / MINUTES_PER_BIN;
                MinuteStep {
                    minute,
                    bin,
                    household_state: states[bin],
                    irradiance,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(day_count: usize) -> HouseholdOccupancy {
        let states: Vec<State> = (0..day_count * BINS_PER_DAY).map(|b| (b % 3) as State + 1).collect();
        crate::occupancy::merge(&[YearSeries::from_states(states)]).unwrap()
    }

    #[test]
    fn test_short_irradiance_rejected() {
        let occ = series(2);
        let irradiance = vec![0.0; 2 * MINUTES_PER_DAY - 1];
        assert_eq!(
            LoadInputs::new(&occ, &[], &irradiance, 2).unwrap_err(),
            LoadInputError::IrradianceTooShort {
                expected: 2880,
                found: 2879
            }
        );
    }

    #[test]
    fn test_member_length_checked() {
        let occ = series(1);
        let members = [YearSeries::from_states(vec![3; 10])];
        let irradiance = vec![0.0; MINUTES_PER_DAY];
        assert!(matches!(
            LoadInputs::new(&occ, &members, &irradiance, 1),
            Err(LoadInputError::SeriesLengthMismatch { found: 10, .. })
        ));
    }

    #[test]
    fn test_minutes_in_lockstep() {
        let occ = series(1);
        let irradiance: Vec<f64> = (0..MINUTES_PER_DAY + 60).map(|m| m as f64).collect();
        let inputs = LoadInputs::new(&occ, &[], &irradiance, 1).unwrap();

        let steps: Vec<MinuteStep> = inputs.minutes().collect();
        assert_eq!(steps.len(), MINUTES_PER_DAY);
        assert_eq!(steps[0].bin, 0);
        assert_eq!(steps[9].bin, 0);
        assert_eq!(steps[10].bin, 1);
        assert_eq!(steps[25].household_state, occ.states()[2]);
        assert_eq!(steps[1439].irradiance, 1439.0);
    }
}
