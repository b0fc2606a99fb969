//! Delivery vehicles: their load, clock and odometer.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::{Location, Miles, Minutes, PackageId};

/// Identifier of a vehicle slot in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VehicleId(u32);

impl VehicleId {
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

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for VehicleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Errors raised when installing a planned route on a [`Vehicle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The vehicle already has a visiting order.
    #[error("vehicle {vehicle} already has a planned route")]
    AlreadyPlanned {
        /// Affected vehicle.
        vehicle: VehicleId,
    },
    /// The route adds, drops or repeats packages relative to the assignment.
    #[error("route for vehicle {vehicle} is not a permutation of its assigned packages")]
    NotPermutation {
        /// Affected vehicle.
        vehicle: VehicleId,
    },
}

/// A vehicle carrying an ordered list of packages.
///
/// Packages are referenced by identifier; the records themselves live in the
/// [`PackageStore`](crate::PackageStore). The package order is the
/// assignment order until [`apply_route`](Self::apply_route) installs the
/// visiting order, after which it never changes.
///
/// # Examples
/// ```
/// use courier_core::{Location, Miles, Minutes, PackageId, Vehicle, VehicleId};
///
/// let ids = vec![PackageId::new(2), PackageId::new(1)];
/// let mut vehicle = Vehicle::new(VehicleId::new(1), ids);
/// assert_eq!(vehicle.location(), &Location::Depot);
/// assert_eq!(vehicle.clock(), Minutes::ZERO);
/// assert_eq!(vehicle.odometer(), Miles::ZERO);
///
/// vehicle.apply_route(vec![PackageId::new(1), PackageId::new(2)])?;
/// assert!(vehicle.is_planned());
/// # Ok::<(), courier_core::RouteError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    id: VehicleId,
    packages: Vec<PackageId>,
    planned: bool,
    location: Location,
    clock: Minutes,
    odometer: Miles,
}

impl Vehicle {
    /// A vehicle at the depot at the dispatch origin with `packages` loaded.
    #[must_use]
    pub fn new(id: VehicleId, packages: Vec<PackageId>) -> Self {
        Self {
            id,
            packages,
            planned: false,
            location: Location::Depot,
            clock: Minutes::ZERO,
            odometer: Miles::ZERO,
        }
    }

    /// Vehicle identifier.
    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    /// Loaded packages: assignment order before planning, visiting order after.
    #[must_use]
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    /// Whether a visiting order has been installed.
    #[must_use]
    pub const fn is_planned(&self) -> bool {
        self.planned
    }

    /// Current location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Current elapsed time.
    #[must_use]
    pub const fn clock(&self) -> Minutes {
        self.clock
    }

    /// Distance travelled so far.
    #[must_use]
    pub const fn odometer(&self) -> Miles {
        self.odometer
    }

    /// Install the visiting order produced by a planner.
    ///
    /// `route` must contain exactly the loaded packages, in any order.
    pub fn apply_route(&mut self, route: Vec<PackageId>) -> Result<(), RouteError> {
        if self.planned {
            return Err(RouteError::AlreadyPlanned { vehicle: self.id });
        }
        if !is_permutation(&self.packages, &route) {
            return Err(RouteError::NotPermutation { vehicle: self.id });
        }
        self.packages = route;
        self.planned = true;
        Ok(())
    }

    /// Hold the vehicle at its location until `at`, if that is later than
    /// its clock.
    pub fn hold_until(&mut self, at: Minutes) {
        self.clock = self.clock.max(at);
    }

    /// Drive `distance` to `destination`, taking `travel_time`.
    pub fn drive_to(&mut self, destination: Location, distance: Miles, travel_time: Minutes) {
        self.odometer += distance;
        self.clock += travel_time;
        self.location = destination;
    }

    /// Drive back to the depot. The clock is left at the last delivery.
    pub fn return_to_depot(&mut self, distance: Miles) {
        self.odometer += distance;
        self.location = Location::Depot;
    }
}

fn is_permutation(assigned: &[PackageId], route: &[PackageId]) -> bool {
    if assigned.len() != route.len() {
        return false;
    }
    let mut counts: HashMap<PackageId, isize> = HashMap::with_capacity(assigned.len());
    for id in assigned {
        let count = counts.entry(*id).or_insert(0);
        *count = count.saturating_add(1);
    }
    for id in route {
        let count = counts.entry(*id).or_insert(0);
        *count = count.saturating_sub(1);
    }
    counts.values().all(|count| *count == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn ids(raw: &[u32]) -> Vec<PackageId> {
        raw.iter().copied().map(PackageId::new).collect()
    }

    #[fixture]
    fn vehicle() -> Vehicle {
        Vehicle::new(VehicleId::new(1), ids(&[3, 1, 2]))
    }

    #[rstest]
    #[case(&[1, 2])]
    #[case(&[1, 2, 3, 4])]
    #[case(&[1, 1, 2])]
    #[case(&[1, 2, 4])]
    fn rejects_routes_that_are_not_permutations(mut vehicle: Vehicle, #[case] route: &[u32]) {
        let err = vehicle.apply_route(ids(route)).expect_err("not a permutation");
        assert_eq!(err, RouteError::NotPermutation { vehicle: VehicleId::new(1) });
        assert_eq!(vehicle.packages(), ids(&[3, 1, 2]).as_slice());
    }

    #[rstest]
    fn planned_order_is_never_replaced(mut vehicle: Vehicle) {
        vehicle.apply_route(ids(&[1, 2, 3])).expect("first plan");
        let err = vehicle.apply_route(ids(&[3, 2, 1])).expect_err("replan");
        assert_eq!(err, RouteError::AlreadyPlanned { vehicle: VehicleId::new(1) });
        assert_eq!(vehicle.packages(), ids(&[1, 2, 3]).as_slice());
    }

    #[rstest]
    fn hold_never_moves_the_clock_backwards(mut vehicle: Vehicle) {
        vehicle.hold_until(Minutes::new(140.0));
        vehicle.hold_until(Minutes::new(20.0));
        assert_eq!(vehicle.clock(), Minutes::new(140.0));
    }

    #[rstest]
    fn return_leg_adds_distance_but_not_time(mut vehicle: Vehicle) {
        vehicle.drive_to(
            Location::Address("A St".into()),
            Miles::new(3.0),
            Minutes::new(10.0),
        );
        vehicle.return_to_depot(Miles::new(3.0));
        assert_eq!(vehicle.odometer(), Miles::new(6.0));
        assert_eq!(vehicle.clock(), Minutes::new(10.0));
        assert!(vehicle.location().is_depot());
    }
}
