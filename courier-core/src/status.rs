//! Point-in-time projections over a finished delivery run.
//!
//! Queries are expressed in elapsed dispatch [`Minutes`], the same base the
//! simulator records timestamps in, so comparisons need no offset. Callers
//! holding a time of day convert it first with
//! [`DispatchClock::elapsed_at`](crate::DispatchClock::elapsed_at).

use thiserror::Error;

use crate::{
    DeliveryStatus, DistanceError, DistanceIndex, Location, Miles, Minutes, Package, PackageId,
    PackageStore, Vehicle, VehicleId,
};

/// Status of `package` at elapsed time `at`.
///
/// Without a delivery timestamp the package is at the hub. With one, it is
/// delivered from that instant onwards and en route before it.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryStatus, Minutes, Package, PackageId, status_at};
///
/// let mut package = Package::new(PackageId::new(1), "A St");
/// assert_eq!(status_at(&package, Minutes::new(60.0)), DeliveryStatus::AtHub);
///
/// package.mark_delivered(Minutes::new(30.0))?;
/// assert_eq!(status_at(&package, Minutes::new(29.0)), DeliveryStatus::EnRoute);
/// assert_eq!(status_at(&package, Minutes::new(30.0)), DeliveryStatus::Delivered);
/// # Ok::<(), courier_core::PackageError>(())
/// ```
#[must_use]
pub fn status_at(package: &Package, at: Minutes) -> DeliveryStatus {
    match package.delivered_at() {
        None => DeliveryStatus::AtHub,
        Some(delivered) if delivered <= at => DeliveryStatus::Delivered,
        Some(_) => DeliveryStatus::EnRoute,
    }
}

/// Errors returned by [`StatusQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No package with this identifier was loaded.
    #[error("package {id} not found")]
    PackageNotFound {
        /// Requested package.
        id: PackageId,
    },
    /// No vehicle with this identifier is in the fleet.
    #[error("vehicle {id} not found")]
    VehicleNotFound {
        /// Requested vehicle.
        id: VehicleId,
    },
    /// A vehicle's return leg could not be measured.
    #[error("vehicle {vehicle}: cannot measure return to depot: {source}")]
    ReturnLeg {
        /// Vehicle still away from the depot.
        vehicle: VehicleId,
        /// Lookup failure from the index.
        #[source]
        source: DistanceError,
    },
}

/// A package record as seen at one instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PackageSnapshot {
    /// Package identifier.
    pub id: PackageId,
    /// Delivery address (after any correction).
    pub address: String,
    /// Advisory deadline.
    pub deadline: String,
    /// Destination city.
    pub city: String,
    /// Destination postal code.
    pub zip: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Handling notes.
    pub notes: String,
    /// Derived status at the query instant.
    pub status: DeliveryStatus,
    /// Recorded delivery time, if any.
    pub delivered_at: Option<Minutes>,
    /// Vehicle carrying the package, if it was assigned.
    pub vehicle: Option<VehicleId>,
}

impl PackageSnapshot {
    fn capture(package: &Package, at: Minutes, vehicle: Option<VehicleId>) -> Self {
        Self {
            id: package.id(),
            address: package.address().to_owned(),
            deadline: package.deadline.clone(),
            city: package.city.clone(),
            zip: package.zip.clone(),
            weight_kg: package.weight_kg,
            notes: package.notes.clone(),
            status: status_at(package, at),
            delivered_at: package.delivered_at(),
            vehicle,
        }
    }
}

/// One vehicle's load as seen at one instant, in visiting order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleSnapshot {
    /// Vehicle identifier.
    pub id: VehicleId,
    /// Packages in visiting order.
    pub packages: Vec<PackageSnapshot>,
}

/// Distance driven by one vehicle, return leg included.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleMileage {
    /// Vehicle identifier.
    pub vehicle: VehicleId,
    /// Total miles.
    pub miles: Miles,
}

/// Fleet mileage summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MileageReport {
    /// Per-vehicle mileage in fleet order.
    pub vehicles: Vec<VehicleMileage>,
    /// Sum over the fleet.
    pub total: Miles,
}

/// Read-only view over the store and fleet after simulation.
///
/// Holding a `StatusQuery` borrows the store immutably, so no simulation can
/// run while queries are being answered.
#[derive(Debug, Clone, Copy)]
pub struct StatusQuery<'a> {
    store: &'a PackageStore,
    vehicles: &'a [Vehicle],
    index: &'a DistanceIndex,
}

impl<'a> StatusQuery<'a> {
    /// Build a query view.
    #[must_use]
    pub const fn new(
        store: &'a PackageStore,
        vehicles: &'a [Vehicle],
        index: &'a DistanceIndex,
    ) -> Self {
        Self {
            store,
            vehicles,
            index,
        }
    }

    /// Snapshot of one package at `at`.
    pub fn package_status(
        &self,
        id: PackageId,
        at: Minutes,
    ) -> Result<PackageSnapshot, QueryError> {
        let package = self
            .store
            .get(id)
            .map_err(|_| QueryError::PackageNotFound { id })?;
        Ok(PackageSnapshot::capture(package, at, self.carrier(id)))
    }

    /// Snapshot of every loaded package at `at`, in ascending id order.
    #[must_use]
    pub fn all_statuses(&self, at: Minutes) -> Vec<PackageSnapshot> {
        self.store
            .sorted_ids()
            .into_iter()
            .filter_map(|id| self.package_status(id, at).ok())
            .collect()
    }

    /// Snapshot of one vehicle's packages at `at`, in visiting order.
    pub fn vehicle_status(
        &self,
        id: VehicleId,
        at: Minutes,
    ) -> Result<VehicleSnapshot, QueryError> {
        let vehicle = self.vehicle(id)?;
        let packages = vehicle
            .packages()
            .iter()
            .map(|&package| {
                let record = self
                    .store
                    .get(package)
                    .map_err(|_| QueryError::PackageNotFound { id: package })?;
                Ok(PackageSnapshot::capture(record, at, Some(id)))
            })
            .collect::<Result<Vec<_>, QueryError>>()?;
        Ok(VehicleSnapshot { id, packages })
    }

    /// Mileage per vehicle and for the whole fleet.
    ///
    /// A vehicle already back at the depot contributes its odometer as is.
    /// One still away contributes its odometer plus the leg home, computed on
    /// the fly without touching the vehicle, so repeated calls agree.
    pub fn total_mileage(&self) -> Result<MileageReport, QueryError> {
        let vehicles = self
            .vehicles
            .iter()
            .map(|vehicle| {
                let home = self
                    .index
                    .distance_between(vehicle.location(), &Location::Depot)
                    .map_err(|source| QueryError::ReturnLeg {
                        vehicle: vehicle.id(),
                        source,
                    })?;
                Ok(VehicleMileage {
                    vehicle: vehicle.id(),
                    miles: vehicle.odometer() + home,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;
        let total = vehicles.iter().map(|entry| entry.miles).sum();
        Ok(MileageReport { vehicles, total })
    }

    fn vehicle(&self, id: VehicleId) -> Result<&'a Vehicle, QueryError> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.id() == id)
            .ok_or(QueryError::VehicleNotFound { id })
    }

    fn carrier(&self, package: PackageId) -> Option<VehicleId> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.packages().contains(&package))
            .map(Vehicle::id)
    }
}
