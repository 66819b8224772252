//! Configuration for household simulation.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chronology::DayCountRule;
use crate::error::ConfigurationError;
use crate::occupancy::{DayRunEngine, State, SystemClock, ValidationRules, DEFAULT_START_STATE};

/// Simulation settings. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Calendar year to simulate (default: 2013).
    pub year: i32,

    /// Real-time budget per simulated day in seconds; `null` retries forever.
    pub day_budget_secs: Option<f64>,

    /// Day acceptance rules.
    pub validation: ValidationRules,

    /// State each member's representative week starts in.
    pub start_state: State,

    /// Day count of non-leap years.
    pub day_count_rule: DayCountRule,

    /// Member label excluded from occupancy generation (children under 12).
    pub child_label: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            year: 2013,
            day_budget_secs: Some(10.0),
            validation: ValidationRules::default(),
            start_state: DEFAULT_START_STATE,
            day_count_rule: DayCountRule::Calendar,
            child_label: "U12".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let invalid = |message: String| ConfigurationError::InvalidFile {
            path: path.display().to_string(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        if let Some(secs) = self.day_budget_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConfigurationError::InvalidSetting(format!(
                    "day_budget_secs must be a non-negative number, got {}",
                    secs
                )));
            }
        }
        if self.validation.min_run_bins == 0 {
            return Err(ConfigurationError::InvalidSetting(
                "validation.min_run_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-day budget, `None` when unbounded.
    pub fn day_budget(&self) -> Option<Duration> {
        self.day_budget_secs
            .map(|secs| Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO))
    }

    /// Day run engine on the wall clock with these settings.
    pub fn engine(&self) -> DayRunEngine {
        DayRunEngine::with_clock(SystemClock::new(), self.day_budget(), self.validation)
    }
}
