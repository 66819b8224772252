//! Static datasets behind household parameterization.
//!
//! Three JSON files are read from an explicitly given directory:
//! - `households.json`: household compositions as lists of member labels
//! - `appliances.json`: appliance ownership and power records
//! - `clusters.json`: cluster membership probabilities and Markov cluster models
//!
//! Datasets are read-only once loaded. Every file is checked on load and a
//! malformed entry is reported instead of being replaced by a default.

pub mod appliances;
pub mod clusters;
pub mod households;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;

pub use appliances::{ApplianceActivity, ApplianceRecord, ApplianceTable};
pub use clusters::{ClusterTable, MembershipTable};
pub use households::HouseholdTable;

pub const HOUSEHOLDS_FILE: &str = "households.json";
pub const APPLIANCES_FILE: &str = "appliances.json";
pub const CLUSTERS_FILE: &str = "clusters.json";

/// Errors raised while loading a dataset file.
#[derive(Debug)]
pub enum DatasetError {
    /// The file does not exist
    Missing(PathBuf),
    /// The file exists but could not be read
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid JSON for its schema
    Parse { path: PathBuf, message: String },
    /// The file parsed but its contents are inconsistent
    Malformed { path: PathBuf, message: String },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Missing(path) => write!(f, "Dataset file {} not found", path.display()),
            DatasetError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            DatasetError::Parse { path, message } => {
                write!(f, "Failed to parse {}: {}", path.display(), message)
            }
            DatasetError::Malformed { path, message } => {
                write!(f, "Malformed dataset {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl DatasetError {
    pub(crate) fn malformed(path: &Path, message: impl Into<String>) -> Self {
        DatasetError::Malformed {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Parse one JSON dataset file. The handle is released before returning.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DatasetError::Missing(path.to_path_buf()),
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| DatasetError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// All datasets needed to parameterize households.
#[derive(Clone, Debug)]
pub struct Datasets {
    pub households: HouseholdTable,
    pub appliances: ApplianceTable,
    pub clusters: ClusterTable,
}

impl Datasets {
    /// Load the three dataset files from `dir`.
    pub fn load_from(dir: &Path) -> Result<Self, DatasetError> {
        let households = HouseholdTable::load(&dir.join(HOUSEHOLDS_FILE))?;
        let appliances = ApplianceTable::load(&dir.join(APPLIANCES_FILE))?;
        let clusters = ClusterTable::load(&dir.join(CLUSTERS_FILE))?;

        info!(
            "loaded datasets from {}: {} compositions, {} appliances, {} cluster models",
            dir.display(),
            households.len(),
            appliances.len(),
            clusters.model_count(),
        );

        Ok(Self {
            households,
            appliances,
            clusters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn demo_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("demo")
    }

    #[test]
    fn test_demo_datasets_load() {
        let data = Datasets::load_from(&demo_dir()).unwrap();
        assert_eq!(data.households.len(), 12);
        assert_eq!(data.appliances.len(), 10);
        assert_eq!(data.clusters.model_count(), 7);
        assert!(data.clusters.knows_label("FTE"));
        assert!(!data.clusters.knows_label("U12"));
    }

    #[test]
    fn test_missing_directory_fails() {
        let err = Datasets::load_from(Path::new("/nonexistent/datasets")).unwrap_err();
        assert!(matches!(err, DatasetError::Missing(_)), "{}", err);
    }

    #[test]
    fn test_missing_file_reported_by_name() {
        let dir = tempdir().unwrap();
        fs::copy(demo_dir().join(HOUSEHOLDS_FILE), dir.path().join(HOUSEHOLDS_FILE)).unwrap();

        match Datasets::load_from(dir.path()) {
            Err(DatasetError::Missing(path)) => assert!(path.ends_with(APPLIANCES_FILE)),
            other => panic!("expected missing appliances file, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unparsable_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HOUSEHOLDS_FILE);
        fs::write(&path, "{ \"households\": [[\"FTE\"], ").unwrap();

        let err = HouseholdTable::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
        assert!(err.to_string().contains("households.json"));
    }
}
