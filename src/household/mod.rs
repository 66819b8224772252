//! Household definition: who lives there, what they own, which clusters
//! drive their days.

mod parameterize;
mod simulate;

pub use simulate::{SimulationDiagnostics, SimulationResult};

use std::path::Path;

use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::data::Datasets;
use crate::error::ConfigurationError;
use crate::occupancy::MemberClusters;
use crate::seeds::HouseholdSeeds;

/// Optional explicit household contents. Anything left out is drawn from
/// the datasets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdSpec {
    pub members: Option<Vec<String>>,
    pub appliances: Option<Vec<String>>,
}

impl HouseholdSpec {
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let invalid = |message: String| ConfigurationError::InvalidFile {
            path: path.display().to_string(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))
    }
}

/// Cluster ids allocated to a member for each day-type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberClusterIds {
    pub weekday: String,
    pub saturday: String,
    pub sunday: String,
}

/// One household member.
#[derive(Clone, Debug)]
pub struct Member {
    pub label: String,
    /// `None` for members excluded from occupancy generation.
    pub cluster_ids: Option<MemberClusterIds>,
    clusters: Option<MemberClusters>,
}

impl Member {
    pub fn is_simulated(&self) -> bool {
        self.clusters.is_some()
    }
}

/// A parameterized household, ready to simulate.
#[derive(Clone, Debug)]
pub struct Household {
    pub name: String,
    /// Local creation time, RFC 3339.
    pub created_at: String,
    pub members: Vec<Member>,
    pub appliances: Vec<String>,
    pub config: SimulationConfig,
    pub seeds: HouseholdSeeds,
}

impl Household {
    /// Validate `name` and parameterize members, appliances and clusters.
    pub fn new(
        name: &str,
        spec: &HouseholdSpec,
        datasets: &Datasets,
        config: &SimulationConfig,
        seeds: HouseholdSeeds,
    ) -> Result<Self, ConfigurationError> {
        if !is_identifier(name) {
            return Err(ConfigurationError::InvalidName(name.to_string()));
        }
        config.check()?;

        let labels = parameterize::draw_members(spec, &datasets.households, seeds.composition)?;
        let appliances = parameterize::draw_appliances(spec, &datasets.appliances, seeds.appliances)?;
        let members = parameterize::allocate_clusters(
            &labels,
            &datasets.clusters,
            &config.child_label,
            config.start_state,
            seeds.clusters,
        )?;

        info!(
            "household {}: members [{}], {} appliances (seed {})",
            name,
            labels.join(", "),
            appliances.len(),
            seeds.master
        );

        Ok(Self {
            name: name.to_string(),
            created_at: Local::now().to_rfc3339(),
            members,
            appliances,
            config: config.clone(),
            seeds,
        })
    }

    /// Household with every content drawn from the datasets.
    pub fn random(
        name: &str,
        datasets: &Datasets,
        config: &SimulationConfig,
        seeds: HouseholdSeeds,
    ) -> Result<Self, ConfigurationError> {
        Self::new(name, &HouseholdSpec::default(), datasets, config, seeds)
    }

    pub fn member_labels(&self) -> Vec<String> {
        self.members.iter().map(|m| m.label.clone()).collect()
    }
}

/// ASCII letter or underscore, then letters, digits or underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_identifier_names() {
        assert!(is_identifier("household_1"));
        assert!(is_identifier("_h"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1household"));
        assert!(!is_identifier("my household"));
        assert!(!is_identifier("h-1"));
    }

    #[test]
    fn test_spec_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("household.json");
        fs::write(&path, r#"{ "members": ["FTE", "U12"] }"#).unwrap();

        let spec = HouseholdSpec::load(&path).unwrap();
        assert_eq!(spec.members, Some(vec!["FTE".to_string(), "U12".to_string()]));
        assert_eq!(spec.appliances, None);
    }

    #[test]
    fn test_malformed_spec_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("household.json");
        fs::write(&path, r#"{ "members": "FTE" }"#).unwrap();
        assert!(matches!(
            HouseholdSpec::load(&path),
            Err(ConfigurationError::InvalidFile { .. })
        ));

        assert!(matches!(
            HouseholdSpec::load(&dir.path().join("missing.json")),
            Err(ConfigurationError::InvalidFile { .. })
        ));
    }
}
