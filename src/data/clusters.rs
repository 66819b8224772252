//! Cluster-probability table and Markov cluster models.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chronology::DayType;
use crate::occupancy::ClusterModel;
use crate::stats::{is_probability_row, pick_index};

use super::{read_json, DatasetError};

/// Per day-type and member label, the probability of each cluster id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MembershipTable {
    pub weekday: BTreeMap<String, BTreeMap<String, f64>>,
    pub saturday: BTreeMap<String, BTreeMap<String, f64>>,
    pub sunday: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MembershipTable {
    pub fn for_day(&self, day_type: DayType) -> &BTreeMap<String, BTreeMap<String, f64>> {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ClusterFile {
    membership: MembershipTable,
    clusters: BTreeMap<String, ClusterModel>,
}

/// Cluster membership plus the models the membership refers to.
#[derive(Clone, Debug)]
pub struct ClusterTable {
    membership: MembershipTable,
    models: BTreeMap<String, Arc<ClusterModel>>,
}

impl ClusterTable {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file: ClusterFile = read_json(path)?;
        Self::from_parts(file.membership, file.clusters).map_err(|m| DatasetError::malformed(path, m))
    }

    /// Build a table, checking every model and every membership reference.
    pub fn from_parts(
        membership: MembershipTable,
        models: BTreeMap<String, ClusterModel>,
    ) -> Result<Self, String> {
        for (id, model) in &models {
            model.check().map_err(|m| format!("cluster {}: {}", id, m))?;
        }

        for day_type in DayType::ALL {
            for (label, weights) in membership.for_day(day_type) {
                if weights.is_empty() {
                    return Err(format!("{} membership of {} lists no clusters", day_type, label));
                }
                let values: Vec<f64> = weights.values().copied().collect();
                if !is_probability_row(&values) || values.iter().sum::<f64>() <= 0.0 {
                    return Err(format!(
                        "{} membership of {} needs non-negative weights with positive total",
                        day_type, label
                    ));
                }
                if let Some(id) = weights.keys().find(|id| !models.contains_key(*id)) {
                    return Err(format!(
                        "{} membership of {} refers to unknown cluster {}",
                        day_type, label, id
                    ));
                }
            }
        }

        Ok(Self {
            membership,
            models: models.into_iter().map(|(id, m)| (id, Arc::new(m))).collect(),
        })
    }

    pub fn membership(&self) -> &MembershipTable {
        &self.membership
    }

    pub fn model(&self, id: &str) -> Option<&Arc<ClusterModel>> {
        self.models.get(id)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Whether `label` has membership probabilities for every day-type.
    pub fn knows_label(&self, label: &str) -> bool {
        DayType::ALL
            .iter()
            .all(|&d| self.membership.for_day(d).contains_key(label))
    }

    /// Draw the cluster id of a member with `label` for `day_type`.
    pub fn sample_cluster<R: Rng>(&self, day_type: DayType, label: &str, rng: &mut R) -> Option<&str> {
        let weights = self.membership.for_day(day_type).get(label)?;
        let values: Vec<f64> = weights.values().copied().collect();
        let index = pick_index(&values, rng)?;
        weights.keys().nth(index).map(String::as_str)
    }
}
