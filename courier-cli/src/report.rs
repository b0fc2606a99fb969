//! JSON views printed by the subcommands.
//!
//! Timestamps leave the simulator as elapsed dispatch minutes and are
//! rendered here as `HH:MM` times of day.

use courier_core::{
    DeliveryStatus, DispatchClock, DistanceIndex, DistanceError, Miles, Minutes, PackageId,
    PackageSnapshot, VehicleId, VehicleSnapshot,
};
use serde::Serialize;

/// `HH:MM` on a 24-hour clock; times past midnight wrap to `00:MM`.
pub(crate) fn format_time(clock: &DispatchClock, elapsed: Minutes) -> String {
    clock.time_of_day(elapsed).format("%H:%M").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PackageView {
    id: PackageId,
    address: String,
    deadline: String,
    city: String,
    zip: String,
    weight_kg: f64,
    notes: String,
    status: DeliveryStatus,
    delivered_at: Option<String>,
    vehicle: Option<VehicleId>,
}

impl PackageView {
    pub(crate) fn new(snapshot: PackageSnapshot, clock: &DispatchClock) -> Self {
        Self {
            id: snapshot.id,
            address: snapshot.address,
            deadline: snapshot.deadline,
            city: snapshot.city,
            zip: snapshot.zip,
            weight_kg: snapshot.weight_kg,
            notes: snapshot.notes,
            status: snapshot.status,
            delivered_at: snapshot
                .delivered_at
                .map(|elapsed| format_time(clock, elapsed)),
            vehicle: snapshot.vehicle,
        }
    }
}

/// Every package at one moment.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatusReport {
    pub(crate) at: String,
    pub(crate) packages: Vec<PackageView>,
}

impl StatusReport {
    pub(crate) fn new(
        snapshots: Vec<PackageSnapshot>,
        at: Minutes,
        clock: &DispatchClock,
    ) -> Self {
        Self {
            at: format_time(clock, at),
            packages: snapshots
                .into_iter()
                .map(|snapshot| PackageView::new(snapshot, clock))
                .collect(),
        }
    }
}

/// One package at one moment.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PackageReport {
    pub(crate) at: String,
    pub(crate) package: PackageView,
}

/// One vehicle's load at one moment, in route order.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct VehicleReport {
    pub(crate) vehicle: VehicleId,
    pub(crate) at: String,
    pub(crate) packages: Vec<PackageView>,
}

impl VehicleReport {
    pub(crate) fn new(snapshot: VehicleSnapshot, at: Minutes, clock: &DispatchClock) -> Self {
        Self {
            vehicle: snapshot.id,
            at: format_time(clock, at),
            packages: snapshot
                .packages
                .into_iter()
                .map(|package| PackageView::new(package, clock))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DistanceEntry {
    to: String,
    miles: Miles,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LocationDistances {
    address: String,
    distances: Vec<DistanceEntry>,
}

/// The full matrix, one row per location in table order.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DistancesReport {
    pub(crate) depot: String,
    pub(crate) locations: Vec<LocationDistances>,
}

impl DistancesReport {
    pub(crate) fn new(index: &DistanceIndex) -> Result<Self, DistanceError> {
        let locations = index
            .locations()
            .map(|address| {
                let distances = index
                    .distances_from(address)?
                    .into_iter()
                    .map(|(to, miles)| DistanceEntry {
                        to: to.to_owned(),
                        miles,
                    })
                    .collect();
                Ok(LocationDistances {
                    address: address.to_owned(),
                    distances,
                })
            })
            .collect::<Result<_, DistanceError>>()?;
        Ok(Self {
            depot: index.depot_name().to_owned(),
            locations,
        })
    }
}
