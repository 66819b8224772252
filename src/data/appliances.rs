//! Appliance ownership table.

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{read_json, DatasetError};

/// What drives an appliance's use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceActivity {
    /// Cycles regardless of occupancy (cold appliances)
    Continuous,
    /// Only started while an occupant is active at home
    Presence,
}

/// One appliance type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceRecord {
    /// Share of households owning the appliance (0..=1)
    pub owner: f64,
    /// Standby power in W
    pub standby_power: f64,
    /// Mean power during a cycle in W
    pub cycle_power: f64,
    /// Cycle length in minutes
    pub cycle_length: u32,
    /// Mean cycles per year
    pub cycles_per_year: f64,
    pub activity: ApplianceActivity,
}

impl ApplianceRecord {
    fn check(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.owner) {
            return Err(format!("ownership rate {} outside [0, 1]", self.owner));
        }
        for (field, value) in [
            ("standby_power", self.standby_power),
            ("cycle_power", self.cycle_power),
            ("cycles_per_year", self.cycles_per_year),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", field, value));
            }
        }
        if self.cycle_length == 0 {
            return Err("cycle_length must be at least one minute".to_string());
        }
        Ok(())
    }
}

/// Appliance records keyed by appliance name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceTable {
    pub appliances: BTreeMap<String, ApplianceRecord>,
}

impl ApplianceTable {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let table: Self = read_json(path)?;
        for (name, record) in &table.appliances {
            record
                .check()
                .map_err(|m| DatasetError::malformed(path, format!("appliance {}: {}", name, m)))?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ApplianceRecord> {
        self.appliances.get(name)
    }

    /// Draw which appliances a household owns, each independently with its
    /// ownership rate. Names come back in table order.
    pub fn sample_owned<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        self.appliances
            .iter()
            .filter(|(_, record)| rng.gen::<f64>() < record.owner)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
