//! Input loaders for the courier engine.
//!
//! Responsibilities:
//! - Read the package file into a [`PackageStore`](courier_core::PackageStore).
//! - Read the distance table into a [`DistanceIndex`](courier_core::DistanceIndex).
//! - Decode the scenario file (assignment plus simulation settings).
//!
//! Boundaries:
//! - Loading finishes before any planning or simulation starts; the core
//!   never performs I/O.
//! - No delivery rules live here (see `courier-core` and `courier-sim`).

#![forbid(unsafe_code)]

mod distances;
mod error;
mod packages;
mod scenario;

use camino::Utf8Path;
use courier_core::{DistanceIndex, PackageStore};

pub use distances::{DEFAULT_DEPOT, load_distance_table, read_distance_table};
pub use error::LoadError;
pub use packages::{load_packages, read_packages};
pub use scenario::{Scenario, load_scenario, parse_scenario};

/// Everything a delivery run needs, loaded from disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Package records, all at the hub.
    pub store: PackageStore,
    /// Road network.
    pub index: DistanceIndex,
    /// Assignment and simulation settings.
    pub scenario: Scenario,
}

/// Paths to the three input files.
#[derive(Debug, Clone, Copy)]
pub struct DatasetPaths<'a> {
    /// Package CSV.
    pub packages: &'a Utf8Path,
    /// Distance table CSV.
    pub distances: &'a Utf8Path,
    /// Scenario JSON.
    pub scenario: &'a Utf8Path,
    /// Name of the depot row in the distance table.
    pub depot: &'a str,
}

impl Dataset {
    /// Load all three input files.
    pub fn load(paths: DatasetPaths<'_>) -> Result<Self, LoadError> {
        Ok(Self {
            store: load_packages(paths.packages)?,
            index: load_distance_table(paths.distances, paths.depot)?,
            scenario: load_scenario(paths.scenario)?,
        })
    }
}
