//! Distance table loader.
//!
//! The table is a CSV whose header row reads `Location,Address,<one column
//! per location>`. Each following row describes one location: its `Address`
//! cell is the name used for lookups and the remaining cells are distances
//! in miles to the locations in header order. Blank cells, including cells
//! missing from the end of a short row, are mirrored from the opposite
//! triangle.

use std::io;

use camino::Utf8Path;
use courier_core::DistanceIndex;
use log::info;

use crate::LoadError;

/// Row name the depot is looked up under unless configured otherwise.
pub const DEFAULT_DEPOT: &str = "HUB";

/// Leading columns before the distance cells.
const LEADING_COLUMNS: usize = 2;

/// Read a distance table from CSV text.
///
/// `depot` names the row that vehicles start from and return to.
///
/// # Examples
/// ```
/// use courier_core::Miles;
/// use courier_data::{DEFAULT_DEPOT, read_distance_table};
///
/// let csv = "Location,Address,HUB,A St\n\
///            Depot,HUB,0,\n\
///            Corner,A St,2.5,0\n";
/// let index = read_distance_table(csv.as_bytes(), DEFAULT_DEPOT)?;
/// assert_eq!(index.distance("HUB", "a st")?, Miles::new(2.5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_distance_table<R: io::Read>(
    reader: R,
    depot: &str,
) -> Result<DistanceIndex, LoadError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv.headers()?.clone();
    if headers.len() < LEADING_COLUMNS {
        return Err(LoadError::MissingAddressColumn);
    }
    let columns: Vec<&str> = headers.iter().skip(LEADING_COLUMNS).collect();

    let mut names = Vec::new();
    let mut cells = Vec::new();
    for (offset, result) in csv.records().enumerate() {
        let row = offset.saturating_add(1);
        let record = result?;
        let name = record
            .get(1)
            .filter(|name| !name.is_empty())
            .ok_or(LoadError::MissingAddress { row })?;
        names.push(name.to_owned());

        let mut distances = Vec::with_capacity(columns.len());
        for (position, raw) in record.iter().skip(LEADING_COLUMNS).enumerate() {
            distances.push(parse_cell(raw).ok_or_else(|| LoadError::InvalidDistance {
                row,
                column: columns.get(position).copied().unwrap_or_default().to_owned(),
                value: raw.to_owned(),
            })?);
        }
        if distances.len() < columns.len() {
            distances.resize(columns.len(), None);
        }
        cells.push(distances);
    }

    let index = DistanceIndex::new(names, cells, depot)?;
    info!("loaded distance table with {} locations", index.len());
    Ok(index)
}

/// `Some(None)` for a blank cell, `Some(Some(miles))` for a number and
/// `None` for anything else.
fn parse_cell(raw: &str) -> Option<Option<f64>> {
    if raw.is_empty() {
        return Some(None);
    }
    raw.parse::<f64>().ok().map(Some)
}

/// Load the distance table at `path`.
pub fn load_distance_table(path: &Utf8Path, depot: &str) -> Result<DistanceIndex, LoadError> {
    let file = courier_fs::open_utf8_file(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_distance_table(file, depot).map_err(|err| err.in_file(path))
}
