//! Random household parameterization from the datasets.

use std::sync::Arc;

use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::chronology::DayType;
use crate::data::{ApplianceTable, ClusterTable, HouseholdTable};
use crate::error::ConfigurationError;
use crate::occupancy::{tiling_breaks, ClusterModel, MemberClusters, State};

use super::{HouseholdSpec, Member, MemberClusterIds};

/// Explicit member labels, or one composition drawn uniformly.
pub(super) fn draw_members(
    spec: &HouseholdSpec,
    table: &HouseholdTable,
    seed: u64,
) -> Result<Vec<String>, ConfigurationError> {
    match &spec.members {
        Some(members) if members.is_empty() => Err(ConfigurationError::NoMembers),
        Some(members) => Ok(members.clone()),
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Ok(table.sample(&mut rng).to_vec())
        }
    }
}

/// Explicit appliances (checked against the table), or an ownership draw.
pub(super) fn draw_appliances(
    spec: &HouseholdSpec,
    table: &ApplianceTable,
    seed: u64,
) -> Result<Vec<String>, ConfigurationError> {
    match &spec.appliances {
        Some(names) => {
            if let Some(unknown) = names.iter().find(|n| table.get(n).is_none()) {
                return Err(ConfigurationError::UnknownAppliance(unknown.clone()));
            }
            Ok(names.clone())
        }
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Ok(table.sample_owned(&mut rng))
        }
    }
}

/// Draw weekday, Saturday and Sunday clusters for every member old enough
/// to be simulated. Members with `child_label` keep no clusters. Every
/// weekday cluster must declare `start_state`.
pub(super) fn allocate_clusters(
    labels: &[String],
    table: &ClusterTable,
    child_label: &str,
    start_state: State,
    seed: u64,
) -> Result<Vec<Member>, ConfigurationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut members = Vec::with_capacity(labels.len());

    for label in labels {
        if label == child_label {
            debug!("member {} excluded from occupancy generation", label);
            members.push(Member {
                label: label.clone(),
                cluster_ids: None,
                clusters: None,
            });
            continue;
        }
        if !table.knows_label(label) {
            return Err(ConfigurationError::UnknownMember(label.clone()));
        }

        let mut draw = |day_type: DayType| -> Result<(String, Arc<ClusterModel>), ConfigurationError> {
            let id = table
                .sample_cluster(day_type, label, &mut rng)
                .ok_or_else(|| ConfigurationError::UnknownMember(label.clone()))?;
            let model = table
                .model(id)
                .ok_or_else(|| ConfigurationError::UnknownMember(label.clone()))?;
            Ok((id.to_string(), Arc::clone(model)))
        };

        let (weekday_id, weekday) = draw(DayType::Weekday)?;
        let (saturday_id, saturday) = draw(DayType::Saturday)?;
        let (sunday_id, sunday) = draw(DayType::Sunday)?;

        if !weekday.states.contains(&start_state) {
            return Err(ConfigurationError::InvalidSetting(format!(
                "start state {} is not a state of weekday cluster {} ({:?}) drawn for {}",
                start_state, weekday_id, weekday.states, label
            )));
        }
        let clusters = MemberClusters { weekday, saturday, sunday };
        for day_type in tiling_breaks(&clusters, start_state) {
            warn!(
                "{} cluster of {} does not end in state {}; tiled weeks will jump at that day boundary",
                day_type, label, start_state
            );
        }

        members.push(Member {
            label: label.clone(),
            cluster_ids: Some(MemberClusterIds {
                weekday: weekday_id,
                saturday: saturday_id,
                sunday: sunday_id,
            }),
            clusters: Some(clusters),
        });
    }

    if members.iter().all(|m| m.clusters.is_none()) {
        warn!("no member of [{}] is simulated", labels.join(", "));
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MembershipTable;
    use crate::occupancy::test_support::*;
    use std::collections::BTreeMap;

    fn cluster_table() -> ClusterTable {
        let models = BTreeMap::from([
            ("work".to_string(), scheduled_model(&WORKDAY_RED, workday_schedule)),
            ("home".to_string(), scheduled_model(&WORKDAY_RED, workday_schedule)),
        ]);
        let row = |id: &str| BTreeMap::from([(id.to_string(), 1.0)]);
        let membership = MembershipTable {
            weekday: BTreeMap::from([("FTE".to_string(), row("work"))]),
            saturday: BTreeMap::from([("FTE".to_string(), row("home"))]),
            sunday: BTreeMap::from([("FTE".to_string(), row("home"))]),
        };
        ClusterTable::from_parts(membership, models).unwrap()
    }

    #[test]
    fn test_clusters_follow_membership() {
        let labels = vec!["FTE".to_string(), "U12".to_string()];
        let members = allocate_clusters(&labels, &cluster_table(), "U12", 2, 1).unwrap();

        assert_eq!(members.len(), 2);
        let ids = members[0].cluster_ids.as_ref().unwrap();
        assert_eq!(ids.weekday, "work");
        assert_eq!(ids.saturday, "home");
        assert_eq!(ids.sunday, "home");
        assert!(members[0].is_simulated());
        assert!(!members[1].is_simulated());
    }

    #[test]
    fn test_unknown_member_label() {
        let labels = vec!["Astronaut".to_string()];
        let err = allocate_clusters(&labels, &cluster_table(), "U12", 2, 1).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownMember("Astronaut".to_string()));
    }

    #[test]
    fn test_start_state_outside_cluster() {
        let labels = vec!["FTE".to_string()];
        let err = allocate_clusters(&labels, &cluster_table(), "U12", 9, 1).unwrap_err();
        assert!(
            matches!(&err, ConfigurationError::InvalidSetting(m) if m.contains("start state 9")),
            "{}",
            err
        );

        // Children draw no clusters, so the start state is never checked for them
        let children = vec!["U12".to_string()];
        assert!(allocate_clusters(&children, &cluster_table(), "U12", 9, 1).is_ok());
    }

    #[test]
    fn test_explicit_members() {
        let table = HouseholdTable {
            households: vec![vec!["Retired".to_string()]],
        };
        let spec = HouseholdSpec {
            members: Some(vec!["FTE".to_string()]),
            appliances: None,
        };
        assert_eq!(draw_members(&spec, &table, 3).unwrap(), vec!["FTE".to_string()]);
        assert_eq!(
            draw_members(&HouseholdSpec::default(), &table, 3).unwrap(),
            vec!["Retired".to_string()]
        );

        let empty = HouseholdSpec {
            members: Some(Vec::new()),
            appliances: None,
        };
        assert_eq!(draw_members(&empty, &table, 3), Err(ConfigurationError::NoMembers));
    }

    #[test]
    fn test_unknown_appliance() {
        let table = ApplianceTable {
            appliances: BTreeMap::new(),
        };
        let spec = HouseholdSpec {
            members: None,
            appliances: Some(vec!["Jacuzzi".to_string()]),
        };
        assert_eq!(
            draw_appliances(&spec, &table, 0),
            Err(ConfigurationError::UnknownAppliance("Jacuzzi".to_string()))
        );
    }
}
