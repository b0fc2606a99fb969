//! Read-only distance lookups between named locations.
//!
//! A [`DistanceIndex`] pairs a name-to-row mapping with a square mileage
//! matrix. Names are matched after [`normalize`], so `" HUB"` and `"hub"`
//! resolve to the same row. The index is built once, validated, and never
//! mutated afterwards.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::Miles;

/// Canonical form of a location name: surrounding whitespace trimmed,
/// lowercased.
///
/// # Examples
/// ```
/// use courier_core::normalize;
///
/// assert_eq!(normalize("  410 S State St "), "410 s state st");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Where a vehicle currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// The shared dispatch hub every route starts and ends at.
    #[default]
    Depot,
    /// A delivery address.
    Address(String),
}

impl Location {
    /// Whether this is the depot.
    #[must_use]
    pub const fn is_depot(&self) -> bool {
        matches!(self, Self::Depot)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depot => f.write_str("depot"),
            Self::Address(address) => f.write_str(address),
        }
    }
}

/// Errors raised by [`DistanceIndex`] queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The name did not match any row of the index.
    #[error("unknown location {name:?}")]
    UnknownLocation {
        /// Name as supplied by the caller.
        name: String,
    },
}

/// Errors raised while building a [`DistanceIndex`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceIndexError {
    /// No locations were supplied.
    #[error("distance index needs at least one location")]
    Empty,
    /// The matrix is not `n x n` for `n` names.
    #[error("row {row} has {found} cells but {expected} locations are named")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Cell count found in that row.
        found: usize,
        /// Number of named locations.
        expected: usize,
    },
    /// The matrix has a different number of rows than there are names.
    #[error("{names} locations are named but the matrix has {rows} rows")]
    RowCountMismatch {
        /// Number of named locations.
        names: usize,
        /// Number of matrix rows.
        rows: usize,
    },
    /// Two names normalise to the same key.
    #[error("location {name:?} appears more than once")]
    DuplicateLocation {
        /// Normalised name.
        name: String,
    },
    /// A cell is negative or not finite.
    #[error("distance from {from:?} to {to:?} is invalid: {value}")]
    InvalidDistance {
        /// Origin name.
        from: String,
        /// Destination name.
        to: String,
        /// Rejected value.
        value: f64,
    },
    /// A location is not zero miles from itself.
    #[error("distance from {name:?} to itself must be zero, found {value}")]
    NonZeroDiagonal {
        /// Location name.
        name: String,
        /// Recorded value.
        value: f64,
    },
    /// The two triangles disagree about a pair.
    #[error("distance from {from:?} to {to:?} is {forward} one way but {backward} the other")]
    Asymmetric {
        /// Origin name.
        from: String,
        /// Destination name.
        to: String,
        /// Value recorded from `from` to `to`.
        forward: f64,
        /// Value recorded from `to` to `from`.
        backward: f64,
    },
    /// Neither triangle supplies a distance for a pair.
    #[error("no distance recorded between {from:?} and {to:?}")]
    MissingDistance {
        /// Origin name.
        from: String,
        /// Destination name.
        to: String,
    },
    /// The depot name is not one of the locations.
    #[error("depot {name:?} is not a known location")]
    UnknownDepot {
        /// Depot name as configured.
        name: String,
    },
}

/// Symmetric mileage matrix addressed by location name.
///
/// # Examples
/// ```
/// use courier_core::{DistanceIndex, Location, Miles};
///
/// let index = DistanceIndex::new(
///     vec!["HUB".into(), "1060 Dalton Ave S".into()],
///     vec![vec![Some(0.0), None], vec![Some(7.2), Some(0.0)]],
///     "hub",
/// )?;
/// assert_eq!(index.distance("1060 dalton ave s", "HUB")?, Miles::new(7.2));
/// assert_eq!(index.distance("HUB", "1060 Dalton Ave S")?, Miles::new(7.2));
/// assert_eq!(
///     index.distance_between(&Location::Depot, &Location::Depot)?,
///     Miles::ZERO,
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceIndex {
    names: Vec<String>,
    rows: HashMap<String, usize>,
    matrix: Vec<Vec<Miles>>,
    depot: usize,
}

impl DistanceIndex {
    /// Build and validate an index.
    ///
    /// `cells[i][j]` is the distance from `names[i]` to `names[j]`. A `None`
    /// cell is filled from its mirror `cells[j][i]`, so supplying one
    /// triangle is enough; when both cells of a pair are given they must
    /// agree. Diagonal cells may be `None` and are treated as
    /// zero. `depot` names the row that [`Location::Depot`] resolves to.
    pub fn new(
        names: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
        depot: &str,
    ) -> Result<Self, DistanceIndexError> {
        if names.is_empty() {
            return Err(DistanceIndexError::Empty);
        }
        if cells.len() != names.len() {
            return Err(DistanceIndexError::RowCountMismatch {
                names: names.len(),
                rows: cells.len(),
            });
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != names.len())
        {
            return Err(DistanceIndexError::NotSquare {
                row,
                found,
                expected: names.len(),
            });
        }

        let rows = index_rows(&names)?;
        let matrix = fill_matrix(&names, &cells)?;
        let depot = rows
            .get(&normalize(depot))
            .copied()
            .ok_or_else(|| DistanceIndexError::UnknownDepot {
                name: depot.to_owned(),
            })?;

        Ok(Self {
            names,
            rows,
            matrix,
            depot,
        })
    }

    /// Number of known locations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index is empty. Always false for a constructed index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Location names in row order, as supplied.
    pub fn locations(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Name of the depot row.
    #[must_use]
    pub fn depot_name(&self) -> &str {
        self.names.get(self.depot).map_or("", String::as_str)
    }

    /// Whether `name` resolves to a row.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rows.contains_key(&normalize(name))
    }

    /// Distance between two named locations.
    pub fn distance(&self, from: &str, to: &str) -> Result<Miles, DistanceError> {
        let origin = self.row(from)?;
        let destination = self.row(to)?;
        Ok(self.cell(origin, destination))
    }

    /// Distance between two [`Location`]s, resolving the depot sentinel.
    pub fn distance_between(&self, from: &Location, to: &Location) -> Result<Miles, DistanceError> {
        let origin = self.location_row(from)?;
        let destination = self.location_row(to)?;
        Ok(self.cell(origin, destination))
    }

    /// Every distance from `name`, paired with the destination name.
    pub fn distances_from(&self, name: &str) -> Result<Vec<(&str, Miles)>, DistanceError> {
        let origin = self.row(name)?;
        Ok(self
            .names
            .iter()
            .enumerate()
            .map(|(destination, to)| (to.as_str(), self.cell(origin, destination)))
            .collect())
    }

    fn row(&self, name: &str) -> Result<usize, DistanceError> {
        self.rows
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| DistanceError::UnknownLocation {
                name: name.to_owned(),
            })
    }

    fn location_row(&self, location: &Location) -> Result<usize, DistanceError> {
        match location {
            Location::Depot => Ok(self.depot),
            Location::Address(address) => self.row(address),
        }
    }

    fn cell(&self, origin: usize, destination: usize) -> Miles {
        self.matrix
            .get(origin)
            .and_then(|row| row.get(destination))
            .copied()
            .unwrap_or_else(|| {
                log::warn!("distance matrix has no cell ({origin}, {destination})");
                debug_assert!(false, "rows come from the validated name index");
                Miles::ZERO
            })
    }
}

fn index_rows(names: &[String]) -> Result<HashMap<String, usize>, DistanceIndexError> {
    let mut rows = HashMap::with_capacity(names.len());
    for (row, name) in names.iter().enumerate() {
        let key = normalize(name);
        if rows.insert(key.clone(), row).is_some() {
            return Err(DistanceIndexError::DuplicateLocation { name: key });
        }
    }
    Ok(rows)
}

fn fill_matrix(
    names: &[String],
    cells: &[Vec<Option<f64>>],
) -> Result<Vec<Vec<Miles>>, DistanceIndexError> {
    let lookup = |row: usize, col: usize| {
        cells
            .get(row)
            .and_then(|cells_row| cells_row.get(col))
            .copied()
            .flatten()
    };
    let mut mirrored = 0_usize;
    let mut matrix = Vec::with_capacity(names.len());

    for (row, from) in names.iter().enumerate() {
        let mut out = Vec::with_capacity(names.len());
        for (col, to) in names.iter().enumerate() {
            let direct = lookup(row, col);
            let value = if row == col {
                let value = direct.unwrap_or(0.0);
                if value != 0.0 {
                    return Err(DistanceIndexError::NonZeroDiagonal {
                        name: from.clone(),
                        value,
                    });
                }
                value
            } else if let Some(value) = direct {
                value
            } else {
                mirrored = mirrored.saturating_add(1);
                lookup(col, row).ok_or_else(|| DistanceIndexError::MissingDistance {
                    from: from.clone(),
                    to: to.clone(),
                })?
            };
            if !value.is_finite() || value < 0.0 {
                return Err(DistanceIndexError::InvalidDistance {
                    from: from.clone(),
                    to: to.clone(),
                    value,
                });
            }
            if let (Some(forward), Some(backward)) = (direct, lookup(col, row)) {
                // A non-finite or negative mirror is reported when its own cell is visited.
                let comparable = backward.is_finite() && backward >= 0.0;
                if comparable && forward.partial_cmp(&backward) != Some(Ordering::Equal) {
                    return Err(DistanceIndexError::Asymmetric {
                        from: from.clone(),
                        to: to.clone(),
                        forward,
                        backward,
                    });
                }
            }
            out.push(Miles::new(value));
        }
        matrix.push(out);
    }

    if mirrored > 0 {
        log::debug!("mirrored {mirrored} distance cells from the opposite triangle");
    }
    Ok(matrix)
}
