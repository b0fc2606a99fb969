//! Error types produced by the loaders.

use std::io;

use camino::Utf8PathBuf;
use courier_core::{DistanceIndexError, PackageId};
use thiserror::Error;

/// Errors produced while loading packages, distances or scenarios.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The input file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Loading failed part way through a named file.
    #[error("{path}: {source}")]
    InFile {
        /// File being loaded.
        path: Utf8PathBuf,
        /// Failure inside the file.
        source: Box<LoadError>,
    },
    /// The CSV structure could not be parsed.
    #[error("malformed CSV: {source}")]
    Csv {
        /// Parser error, including the position reached.
        #[from]
        source: csv::Error,
    },
    /// A package row carries an unparseable identifier.
    #[error("row {row}: invalid package id {value:?}")]
    InvalidPackageId {
        /// Data row number, starting at 1 after the header.
        row: usize,
        /// Raw identifier text.
        value: String,
    },
    /// A package row carries an unusable weight.
    #[error("row {row}: package {id} has invalid weight {value:?}")]
    InvalidWeight {
        /// Data row number, starting at 1 after the header.
        row: usize,
        /// Package on that row.
        id: PackageId,
        /// Raw weight text.
        value: String,
    },
    /// The distance table header has no address column.
    #[error("distance table header must start with location and address columns")]
    MissingAddressColumn,
    /// A distance table row has no address.
    #[error("row {row}: missing address")]
    MissingAddress {
        /// Data row number, starting at 1 after the header.
        row: usize,
    },
    /// A distance table cell is not a number.
    #[error("row {row}, column {column:?}: invalid distance {value:?}")]
    InvalidDistance {
        /// Data row number, starting at 1 after the header.
        row: usize,
        /// Header of the offending column.
        column: String,
        /// Raw cell text.
        value: String,
    },
    /// The parsed matrix failed validation.
    #[error("invalid distance table: {source}")]
    Index {
        /// Validation failure.
        #[from]
        source: DistanceIndexError,
    },
    /// The scenario JSON could not be decoded.
    #[error("invalid scenario: {source}")]
    Scenario {
        /// Decoder error.
        #[from]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub(crate) fn in_file(self, path: &camino::Utf8Path) -> Self {
        match self {
            Self::Read { .. } | Self::InFile { .. } => self,
            other => Self::InFile {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }
}
