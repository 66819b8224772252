//! Crate-level error types.

use std::fmt;
use std::io;

use crate::data::DatasetError;
use crate::occupancy::MergeError;

/// Invalid household definition or simulation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Household name is not an identifier
    InvalidName(String),
    /// An explicit member list was empty
    NoMembers,
    /// Member label without cluster membership data
    UnknownMember(String),
    /// Appliance name missing from the appliance table
    UnknownAppliance(String),
    /// Year outside the supported calendar range
    InvalidYear(i32),
    /// Household spec or config file could not be read or parsed
    InvalidFile { path: String, message: String },
    /// A setting has an unusable value
    InvalidSetting(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidName(name) => {
                write!(f, "Household name {:?} is not a valid identifier", name)
            }
            ConfigurationError::NoMembers => write!(f, "Household member list is empty"),
            ConfigurationError::UnknownMember(label) => {
                write!(f, "No cluster membership data for member type {:?}", label)
            }
            ConfigurationError::UnknownAppliance(name) => write!(f, "Unknown appliance {:?}", name),
            ConfigurationError::InvalidYear(year) => write!(f, "Cannot simulate year {}", year),
            ConfigurationError::InvalidFile { path, message } => {
                write!(f, "Invalid file {}: {}", path, message)
            }
            ConfigurationError::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Anything that stops a household simulation.
#[derive(Debug)]
pub enum SimulationError {
    Configuration(ConfigurationError),
    Dataset(DatasetError),
    Merge(MergeError),
    Io(io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Configuration(e) => write!(f, "Configuration error: {}", e),
            SimulationError::Dataset(e) => write!(f, "Dataset error: {}", e),
            SimulationError::Merge(e) => write!(f, "Merge error: {}", e),
            SimulationError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Configuration(e) => Some(e),
            SimulationError::Dataset(e) => Some(e),
            SimulationError::Merge(e) => Some(e),
            SimulationError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for SimulationError {
    fn from(e: ConfigurationError) -> Self {
        SimulationError::Configuration(e)
    }
}

impl From<DatasetError> for SimulationError {
    fn from(e: DatasetError) -> Self {
        SimulationError::Dataset(e)
    }
}

impl From<MergeError> for SimulationError {
    fn from(e: MergeError) -> Self {
        SimulationError::Merge(e)
    }
}

impl From<io::Error> for SimulationError {
    fn from(e: io::Error) -> Self {
        SimulationError::Io(e)
    }
}
