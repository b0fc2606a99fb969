//! Package records and their delivery state.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::Minutes;

/// Identifier of a package, unique within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PackageId(u32);

impl PackageId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PackageId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for PackageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Point-in-time delivery status of a package.
///
/// Only [`AtHub`](Self::AtHub) and [`Delivered`](Self::Delivered) are ever
/// stored on a record. [`EnRoute`](Self::EnRoute) is derived by
/// [`status_at`](crate::status_at) when a query falls before the recorded
/// delivery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeliveryStatus {
    /// Waiting at the depot.
    AtHub,
    /// Loaded on a vehicle that has not yet reached the address.
    EnRoute,
    /// Handed over at the delivery address.
    Delivered,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AtHub => "at the hub",
            Self::EnRoute => "en route",
            Self::Delivered => "delivered",
        })
    }
}

/// Errors raised by the two mutations a [`Package`] supports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackageError {
    /// The package already carries a delivery timestamp.
    #[error("package {id} was already delivered at {at}")]
    AlreadyDelivered {
        /// Affected package.
        id: PackageId,
        /// Recorded delivery time.
        at: Minutes,
    },
    /// The delivery address was already corrected once.
    #[error("package {id} already had its address corrected")]
    AlreadyCorrected {
        /// Affected package.
        id: PackageId,
    },
}

/// A parcel awaiting delivery.
///
/// The delivery timestamp is the only stored delivery state: the record is
/// [`DeliveryStatus::Delivered`] exactly when a timestamp is present, so the
/// two can never disagree.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryStatus, Minutes, Package, PackageId};
///
/// let mut package = Package::new(PackageId::new(1), "195 W Oakland Ave");
/// assert_eq!(package.status(), DeliveryStatus::AtHub);
///
/// package.mark_delivered(Minutes::new(12.0))?;
/// assert_eq!(package.status(), DeliveryStatus::Delivered);
/// assert_eq!(package.delivered_at(), Some(Minutes::new(12.0)));
/// # Ok::<(), courier_core::PackageError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    id: PackageId,
    address: String,
    corrected_from: Option<String>,
    /// Delivery deadline as supplied, e.g. `10:30 AM` or `EOD`. Advisory only.
    pub deadline: String,
    /// Destination city.
    pub city: String,
    /// Destination postal code.
    pub zip: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Free-form handling notes.
    pub notes: String,
    delivered_at: Option<Minutes>,
}

impl Package {
    /// Create an undelivered package with empty descriptive fields.
    #[must_use]
    pub fn new(id: PackageId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            corrected_from: None,
            deadline: String::new(),
            city: String::new(),
            zip: String::new(),
            weight_kg: 0.0,
            notes: String::new(),
            delivered_at: None,
        }
    }

    /// Set the delivery deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    /// Set the city and postal code.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>, zip: impl Into<String>) -> Self {
        self.city = city.into();
        self.zip = zip.into();
        self
    }

    /// Set the weight in kilograms.
    #[must_use]
    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    /// Set the handling notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Package identifier.
    #[must_use]
    pub const fn id(&self) -> PackageId {
        self.id
    }

    /// Current delivery address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Address the package carried before a correction, if one was applied.
    #[must_use]
    pub fn corrected_from(&self) -> Option<&str> {
        self.corrected_from.as_deref()
    }

    /// Stored status: delivered when a timestamp is present.
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        if self.delivered_at.is_some() {
            DeliveryStatus::Delivered
        } else {
            DeliveryStatus::AtHub
        }
    }

    /// Elapsed dispatch minutes at which the package was delivered.
    #[must_use]
    pub const fn delivered_at(&self) -> Option<Minutes> {
        self.delivered_at
    }

    /// Record delivery at `at`.
    ///
    /// A package is delivered at most once; a second call fails and leaves
    /// the original timestamp untouched.
    pub fn mark_delivered(&mut self, at: Minutes) -> Result<(), PackageError> {
        if let Some(previous) = self.delivered_at {
            return Err(PackageError::AlreadyDelivered {
                id: self.id,
                at: previous,
            });
        }
        self.delivered_at = Some(at);
        Ok(())
    }

    /// Replace the delivery address with a corrected one.
    ///
    /// Allowed once, and only before delivery.
    pub fn correct_address(&mut self, address: impl Into<String>) -> Result<(), PackageError> {
        if let Some(at) = self.delivered_at {
            return Err(PackageError::AlreadyDelivered { id: self.id, at });
        }
        if self.corrected_from.is_some() {
            return Err(PackageError::AlreadyCorrected { id: self.id });
        }
        let previous = std::mem::replace(&mut self.address, address.into());
        self.corrected_from = Some(previous);
        Ok(())
    }
}
