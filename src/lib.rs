//! Facade crate for the courier delivery engine.
//!
//! This crate re-exports the core domain types together with the default
//! route planner and the delivery simulator, so callers can load a fleet,
//! plan it, simulate it and query it through one dependency.

#![forbid(unsafe_code)]

pub use courier_core::{
    Assignment, AssignmentError, DeliveryStatus, DispatchClock, DistanceError, DistanceIndex,
    DistanceIndexError, Location, MileageReport, Miles, Minutes, Package, PackageError,
    PackageId, PackageSnapshot, PackageStore, PlanError, QueryError, RoutePlanner, Speed,
    StatusQuery, StoreError, Vehicle, VehicleId, VehicleMileage, VehicleSnapshot,
};

pub use courier_planner::NearestNeighbourPlanner;

pub use courier_sim::{
    AddressCorrection, DeliveryRun, DeliverySimulator, DispatchHold, RunError, SimulationConfig,
    SimulationError,
};
