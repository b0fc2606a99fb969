//! Fixtures shared by unit and behaviour tests across the workspace.
//!
//! The sample network is a straight road: the depot sits at mile 0 and each
//! street sits further along, so every distance is the difference between
//! two mileposts. That makes nearest-neighbour orders easy to reason about.

use crate::{DistanceIndex, DistanceIndexError, Package, PackageId, PackageStore};

/// Name of the depot row in [`line_index`].
pub const DEPOT: &str = "HUB";

/// Build a [`DistanceIndex`] for stops on a straight road.
///
/// `stops` pairs each name with its milepost; the depot is added at 0.
pub fn line_index(stops: &[(&str, f64)]) -> Result<DistanceIndex, DistanceIndexError> {
    let mut names = vec![DEPOT.to_owned()];
    let mut posts = vec![0.0_f64];
    for (name, post) in stops {
        names.push((*name).to_owned());
        posts.push(*post);
    }
    let cells = posts
        .iter()
        .map(|from| posts.iter().map(|to| Some(milepost_gap(*from, *to))).collect())
        .collect();
    DistanceIndex::new(names, cells, DEPOT)
}

/// The five-stop road used by most tests.
///
/// Mileposts: `A St` 1.0, `B St` 2.5, `C St` 4.0, `D St` 6.0, `E St` 9.0.
pub fn sample_index() -> Result<DistanceIndex, DistanceIndexError> {
    line_index(&[
        ("A St", 1.0),
        ("B St", 2.5),
        ("C St", 4.0),
        ("D St", 6.0),
        ("E St", 9.0),
    ])
}

/// A package with only an id and address set.
#[must_use]
pub fn package(id: u32, address: &str) -> Package {
    Package::new(PackageId::new(id), address)
}

/// A store holding one package per `(id, address)` pair.
#[must_use]
pub fn store_with(packages: &[(u32, &str)]) -> PackageStore {
    packages
        .iter()
        .map(|(id, address)| package(*id, address))
        .collect()
}

/// Package identifiers from raw values.
#[must_use]
pub fn ids(raw: &[u32]) -> Vec<PackageId> {
    raw.iter().copied().map(PackageId::new).collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "mileposts are subtracted to obtain distances"
)]
fn milepost_gap(from: f64, to: f64) -> f64 {
    (from - to).abs()
}
