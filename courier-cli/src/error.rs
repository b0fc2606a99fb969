//! Error types emitted by the courier CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::{DistanceError, QueryError};
use courier_data::LoadError;
use courier_sim::RunError;
use thiserror::Error;

/// Errors emitted by the courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// An option resolved to a value that cannot be used.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A time argument was not `HH:MM AM/PM` or 24-hour `HH:MM`.
    #[error("unrecognised time {value:?} (expected e.g. \"10:25 AM\" or \"13:12\")")]
    InvalidTime { value: String },
    /// Reading the input files failed.
    #[error("failed to load input data: {0}")]
    Load(#[from] Box<LoadError>),
    /// Planning or simulating the delivery day failed.
    #[error("delivery run failed: {0}")]
    Run(#[from] RunError),
    /// Reading the distance table back for a report failed.
    #[error("distance lookup failed: {0}")]
    Distance(#[from] DistanceError),
    /// A status query named an unknown package or vehicle.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Serialising a report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing a report failed.
    #[error("failed to write report: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        Self::Load(Box::new(err))
    }
}
