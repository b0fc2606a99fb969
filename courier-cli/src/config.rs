//! Input file options shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_data::{DEFAULT_DEPOT, DatasetPaths};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_PACKAGES: &str = "packages";
pub(crate) const ARG_DISTANCES: &str = "distances";
pub(crate) const ARG_SCENARIO: &str = "scenario";
pub(crate) const ARG_DEPOT: &str = "depot";

pub(crate) const DEFAULT_PACKAGES_FILE: &str = "packages.csv";
pub(crate) const DEFAULT_DISTANCES_FILE: &str = "distances.csv";
pub(crate) const DEFAULT_SCENARIO_FILE: &str = "scenario.json";

// Locations of the package file, distance table and scenario, flattened into
// every subcommand. Values can come from CLI flags, a configuration file, or
// `COURIER_` environment variables. Plain comment so clap keeps the
// subcommand's own help text.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct DataArgs {
    /// Directory holding `packages.csv`, `distances.csv` and `scenario.json`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the package file.
    #[arg(long = ARG_PACKAGES, value_name = "path")]
    #[serde(default)]
    pub(crate) packages: Option<Utf8PathBuf>,
    /// Override the path to the distance table.
    #[arg(long = ARG_DISTANCES, value_name = "path")]
    #[serde(default)]
    pub(crate) distances: Option<Utf8PathBuf>,
    /// Override the path to the scenario file.
    #[arg(long = ARG_SCENARIO, value_name = "path")]
    #[serde(default)]
    pub(crate) scenario: Option<Utf8PathBuf>,
    /// Address of the depot row in the distance table (default "HUB").
    #[arg(long = ARG_DEPOT, value_name = "address")]
    #[serde(default)]
    pub(crate) depot: Option<String>,
}

impl DataArgs {
    pub(crate) fn into_config(self) -> Result<DataConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DataConfig::try_from(merged)
    }
}

/// Resolved input locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DataConfig {
    pub(crate) packages: Utf8PathBuf,
    pub(crate) distances: Utf8PathBuf,
    pub(crate) scenario: Utf8PathBuf,
    pub(crate) depot: String,
}

impl DataConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.packages, ARG_PACKAGES)?;
        self.validate_distances()?;
        Self::require_existing(&self.scenario, ARG_SCENARIO)?;
        Ok(())
    }

    pub(crate) fn validate_distances(&self) -> Result<(), CliError> {
        Self::require_existing(&self.distances, ARG_DISTANCES)
    }

    pub(crate) fn paths(&self) -> DatasetPaths<'_> {
        DatasetPaths {
            packages: &self.packages,
            distances: &self.distances,
            scenario: &self.scenario,
            depot: &self.depot,
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match courier_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<DataArgs> for DataConfig {
    type Error = CliError;

    fn try_from(args: DataArgs) -> Result<Self, Self::Error> {
        let depot = args.depot.unwrap_or_else(|| DEFAULT_DEPOT.to_owned());
        if depot.trim().is_empty() {
            return Err(CliError::InvalidArgument {
                field: ARG_DEPOT,
                reason: "depot address must not be blank",
            });
        }

        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let packages = args
            .packages
            .unwrap_or_else(|| data_dir.join(DEFAULT_PACKAGES_FILE));
        let distances = args
            .distances
            .unwrap_or_else(|| data_dir.join(DEFAULT_DISTANCES_FILE));
        let scenario = args
            .scenario
            .unwrap_or_else(|| data_dir.join(DEFAULT_SCENARIO_FILE));

        Ok(Self {
            packages,
            distances,
            scenario,
            depot,
        })
    }
}
