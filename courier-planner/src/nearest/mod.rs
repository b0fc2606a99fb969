//! Greedy nearest-neighbour route construction.

use courier_core::{
    DistanceIndex, Location, Miles, PackageId, PackageStore, PlanError, RoutePlanner, Vehicle,
    VehicleId,
};

/// Plans routes by always driving to the closest remaining address.
///
/// Starting from the vehicle's current location, the planner repeatedly
/// picks the unvisited package whose address is nearest, moves there, and
/// continues until every package is placed. Ties go to the package listed
/// first in the vehicle's load, which keeps plans reproducible.
///
/// The result is a permutation of the load. It is not guaranteed to be the
/// shortest tour.
///
/// # Examples
/// ```
/// use courier_core::test_support::{ids, sample_index, store_with};
/// use courier_core::{RoutePlanner, Vehicle, VehicleId};
/// use courier_planner::NearestNeighbourPlanner;
///
/// let index = sample_index()?;
/// let store = store_with(&[(1, "E St"), (2, "A St"), (3, "C St")]);
/// let vehicle = Vehicle::new(VehicleId::new(1), ids(&[1, 2, 3]));
///
/// let route = NearestNeighbourPlanner.plan_route(&vehicle, &store, &index)?;
/// assert_eq!(route, ids(&[2, 3, 1]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighbourPlanner;

#[derive(Debug)]
struct Stop {
    id: PackageId,
    location: Location,
}

impl RoutePlanner for NearestNeighbourPlanner {
    fn plan_route(
        &self,
        vehicle: &Vehicle,
        store: &PackageStore,
        index: &DistanceIndex,
    ) -> Result<Vec<PackageId>, PlanError> {
        let mut remaining = vehicle
            .packages()
            .iter()
            .map(|&id| {
                let package = store.get(id).map_err(|source| PlanError::MissingPackage {
                    vehicle: vehicle.id(),
                    source,
                })?;
                Ok(Stop {
                    id,
                    location: Location::Address(package.address().to_owned()),
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        let mut current = vehicle.location().clone();
        let mut route = Vec::with_capacity(remaining.len());
        while let Some((position, distance)) = nearest(vehicle.id(), &current, &remaining, index)? {
            let stop = remaining.remove(position);
            log::debug!(
                "vehicle {}: stop {} is package {} at {} ({distance} from {current})",
                vehicle.id(),
                route.len(),
                stop.id,
                stop.location,
            );
            current = stop.location;
            route.push(stop.id);
        }

        log::info!("vehicle {}: planned {} stops", vehicle.id(), route.len());
        Ok(route)
    }
}

/// Position and distance of the closest stop, the earliest one on ties.
fn nearest(
    vehicle: VehicleId,
    current: &Location,
    remaining: &[Stop],
    index: &DistanceIndex,
) -> Result<Option<(usize, Miles)>, PlanError> {
    let mut best: Option<(usize, Miles)> = None;
    for (position, stop) in remaining.iter().enumerate() {
        let distance = index
            .distance_between(current, &stop.location)
            .map_err(|source| PlanError::UnknownLocation {
                vehicle,
                package: stop.id,
                address: stop.location.to_string(),
                source,
            })?;
        if best.is_none_or(|(_, shortest)| distance < shortest) {
            best = Some((position, distance));
        }
    }
    Ok(best)
}
