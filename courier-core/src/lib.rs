//! Core domain types for the courier delivery engine.
//!
//! The crate owns the data every other crate works on: package records and
//! the [`PackageStore`] that owns them, the read-only [`DistanceIndex`],
//! [`Vehicle`]s and the fixed [`Assignment`] that loads them, the
//! [`RoutePlanner`] boundary, and the [`StatusQuery`] projections served
//! once a run has been simulated.
//!
//! Timestamps use one base throughout: [`Minutes`] elapsed since dispatch.
//! [`DispatchClock`] converts to and from times of day at the edges.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assignment;
mod distance;
mod package;
mod planner;
mod status;
mod store;
mod time;
mod units;
mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use assignment::{Assignment, AssignmentError};
pub use distance::{DistanceError, DistanceIndex, DistanceIndexError, Location, normalize};
pub use package::{DeliveryStatus, Package, PackageError, PackageId};
pub use planner::{PlanError, RoutePlanner};
pub use status::{
    MileageReport, PackageSnapshot, QueryError, StatusQuery, VehicleMileage, VehicleSnapshot,
    status_at,
};
pub use store::{PackageStore, StoreError};
pub use time::DispatchClock;
pub use units::{InvalidSpeed, Miles, Minutes, Speed};
pub use vehicle::{RouteError, Vehicle, VehicleId};
