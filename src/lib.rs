//! Household occupancy library
//!
//! Generates yearly ten-minute occupancy chains for household members from
//! time-use cluster models, and merges them into one household signal.

pub mod chronology;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod household;
pub mod loads;
pub mod occupancy;
pub mod seeds;
pub mod stats;

pub use config::SimulationConfig;
pub use data::Datasets;
pub use error::{ConfigurationError, SimulationError};
pub use household::{Household, HouseholdSpec, SimulationResult};
pub use seeds::HouseholdSeeds;
