//! Package file loader.
//!
//! The package file is a CSV with the header
//! `PackageID,Address,DeliveryDeadline,City,Zip,WeightKILO,SpecialNotes`.
//! Only `PackageID` and `Address` are required; the rest default to empty.
//! Every loaded record starts at the hub.

use std::io;

use camino::Utf8Path;
use courier_core::{Package, PackageId, PackageStore};
use log::{info, warn};
use serde::Deserialize;

use crate::LoadError;

#[derive(Debug, Deserialize)]
struct PackageRow {
    #[serde(rename = "PackageID")]
    id: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "DeliveryDeadline", default)]
    deadline: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "Zip", default)]
    zip: String,
    #[serde(rename = "WeightKILO", default)]
    weight: String,
    #[serde(rename = "SpecialNotes", default)]
    notes: String,
}

impl PackageRow {
    fn into_package(self, row: usize) -> Result<Package, LoadError> {
        let id: PackageId = self.id.parse().map_err(|_| LoadError::InvalidPackageId {
            row,
            value: self.id.clone(),
        })?;
        let weight_kg = parse_weight(&self.weight).ok_or_else(|| LoadError::InvalidWeight {
            row,
            id,
            value: self.weight.clone(),
        })?;
        Ok(Package::new(id, self.address)
            .with_deadline(self.deadline)
            .with_city(self.city, self.zip)
            .with_weight(weight_kg)
            .with_notes(self.notes))
    }
}

/// Blank weights read as zero; anything else must be a finite,
/// non-negative number.
fn parse_weight(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight >= 0.0)
}

/// Read package records from CSV text.
///
/// A repeated id replaces the earlier record.
///
/// # Examples
/// ```
/// use courier_core::PackageId;
/// use courier_data::read_packages;
///
/// let csv = "PackageID,Address,DeliveryDeadline,City,Zip,WeightKILO,SpecialNotes\n\
///            1, 195 W Oakland Ave ,10:30 AM,Salt Lake City,84115,21,\n";
/// let store = read_packages(csv.as_bytes())?;
/// assert_eq!(store.get(PackageId::new(1))?.address(), "195 W Oakland Ave");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_packages<R: io::Read>(reader: R) -> Result<PackageStore, LoadError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut store = PackageStore::default();
    for (offset, result) in csv.deserialize::<PackageRow>().enumerate() {
        let row = offset.saturating_add(1);
        let package = result?.into_package(row)?;
        let id = package.id();
        if store.insert(id, package).is_some() {
            warn!("package {id} listed again on row {row}; keeping the later record");
        }
    }
    info!("loaded {} packages", store.len());
    Ok(store)
}

/// Load the package file at `path`.
pub fn load_packages(path: &Utf8Path) -> Result<PackageStore, LoadError> {
    let file = courier_fs::open_utf8_file(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_packages(file).map_err(|err| err.in_file(path))
}
