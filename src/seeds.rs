//! Seed management for household simulation
//!
//! Provides separate seeds for each random subsystem, allowing fine-grained control
//! over which aspects of a household to vary or keep constant.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all household randomization systems.
///
/// Each system gets its own seed, derived from a master seed by default.
/// Individual seeds can be overridden for experimentation.
#[derive(Clone, Debug)]
pub struct HouseholdSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Household composition draw (which member labels live together)
    pub composition: u64,
    /// Appliance ownership draws
    pub appliances: u64,
    /// Cluster allocation per member and day-type
    pub clusters: u64,
    /// Markov day sampling for all members
    pub occupancy: u64,
}

impl HouseholdSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            composition: derive_seed(master, "composition"),
            appliances: derive_seed(master, "appliances"),
            clusters: derive_seed(master, "clusters"),
            occupancy: derive_seed(master, "occupancy"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> HouseholdSeedsBuilder {
        HouseholdSeedsBuilder::new(master)
    }
}

impl Default for HouseholdSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct HouseholdSeedsBuilder {
    seeds: HouseholdSeeds,
}

impl HouseholdSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: HouseholdSeeds::from_master(master),
        }
    }

    /// Override the composition seed
    pub fn composition(mut self, seed: u64) -> Self {
        self.seeds.composition = seed;
        self
    }

    /// Override the appliance ownership seed
    pub fn appliances(mut self, seed: u64) -> Self {
        self.seeds.appliances = seed;
        self
    }

    /// Override the cluster allocation seed
    pub fn clusters(mut self, seed: u64) -> Self {
        self.seeds.clusters = seed;
        self
    }

    /// Draw composition, appliances and clusters as a household seeded with
    /// `master` would, leaving occupancy sampling on this builder's seed.
    pub fn same_household_as(self, master: u64) -> Self {
        let other = HouseholdSeeds::from_master(master);
        self.composition(other.composition)
            .appliances(other.appliances)
            .clusters(other.clusters)
    }

    /// Override the occupancy sampling seed
    pub fn occupancy(mut self, seed: u64) -> Self {
        self.seeds.occupancy = seed;
        self
    }

    pub fn build(self) -> HouseholdSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for HouseholdSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HouseholdSeeds {{ master: {}, composition: {}, appliances: {}, \
             clusters: {}, occupancy: {} }}",
            self.master, self.composition, self.appliances, self.clusters, self.occupancy,
        )
    }
}
