//! Route planning boundary.

use thiserror::Error;

use crate::{
    DistanceError, DistanceIndex, PackageId, PackageStore, RouteError, StoreError, Vehicle,
    VehicleId,
};

/// Errors returned by [`RoutePlanner`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A loaded package's address is not in the distance index.
    #[error("vehicle {vehicle}: package {package} has unknown address {address:?}")]
    UnknownLocation {
        /// Vehicle being planned.
        vehicle: VehicleId,
        /// Package whose address failed to resolve.
        package: PackageId,
        /// The unresolved address.
        address: String,
        /// Lookup failure from the index.
        #[source]
        source: DistanceError,
    },
    /// A loaded package is missing from the store.
    #[error("vehicle {vehicle}: {source}")]
    MissingPackage {
        /// Vehicle being planned.
        vehicle: VehicleId,
        /// Store lookup failure.
        #[source]
        source: StoreError,
    },
    /// The produced order could not be installed on the vehicle.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Order a vehicle's packages into a visiting sequence.
///
/// Implementations only decide the order. They must return a permutation of
/// [`Vehicle::packages`] and must not touch delivery state.
///
/// # Examples
///
/// ```rust
/// use courier_core::{
///     DistanceIndex, PackageId, PackageStore, PlanError, RoutePlanner, Vehicle, VehicleId,
/// };
///
/// struct AsLoaded;
///
/// impl RoutePlanner for AsLoaded {
///     fn plan_route(
///         &self,
///         vehicle: &Vehicle,
///         _store: &PackageStore,
///         _index: &DistanceIndex,
///     ) -> Result<Vec<PackageId>, PlanError> {
///         Ok(vehicle.packages().to_vec())
///     }
/// }
///
/// let index = DistanceIndex::new(vec!["HUB".into()], vec![vec![None]], "HUB")?;
/// let mut vehicle = Vehicle::new(VehicleId::new(1), Vec::new());
/// AsLoaded.plan(&mut vehicle, &PackageStore::default(), &index)?;
/// assert!(vehicle.is_planned());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait RoutePlanner: Send + Sync {
    /// Compute the visiting order for `vehicle` from its current location.
    fn plan_route(
        &self,
        vehicle: &Vehicle,
        store: &PackageStore,
        index: &DistanceIndex,
    ) -> Result<Vec<PackageId>, PlanError>;

    /// Compute the visiting order and install it on `vehicle`.
    fn plan(
        &self,
        vehicle: &mut Vehicle,
        store: &PackageStore,
        index: &DistanceIndex,
    ) -> Result<(), PlanError> {
        let route = self.plan_route(vehicle, store, index)?;
        vehicle.apply_route(route)?;
        Ok(())
    }
}
