//! Household-composition table.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{read_json, DatasetError};

/// Observed household compositions, each a list of member labels
/// (employment or age category, e.g. `FTE`, `Retired`, `U12`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseholdTable {
    pub households: Vec<Vec<String>>,
}

impl HouseholdTable {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let table: Self = read_json(path)?;
        table.check().map_err(|m| DatasetError::malformed(path, m))?;
        Ok(table)
    }

    fn check(&self) -> Result<(), String> {
        if self.households.is_empty() {
            return Err("no household compositions".to_string());
        }
        for (i, members) in self.households.iter().enumerate() {
            if members.is_empty() {
                return Err(format!("household {} has no members", i));
            }
            if members.iter().any(|label| label.trim().is_empty()) {
                return Err(format!("household {} has a blank member label", i));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.households.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty()
    }

    /// Draw one composition uniformly.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &[String] {
        &self.households[rng.gen_range(0..self.households.len())]
    }
}
