//! Single-pass delivery simulation for one planned vehicle.
//!
//! A pass first builds the whole itinerary (every leg resolved against the
//! index, with scripted corrections applied to the addresses it reads) and
//! only then mutates the vehicle and the store. A pass that fails leaves
//! both exactly as they were.

use std::collections::{BTreeMap, BTreeSet};

use courier_core::{
    DistanceError, DistanceIndex, Location, Miles, Minutes, PackageError, PackageId,
    PackageStore, StoreError, Vehicle, VehicleId,
};
use log::{debug, info, warn};
use thiserror::Error;

use crate::SimulationConfig;

/// Errors raised by [`DeliverySimulator::simulate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The vehicle has no installed visiting order.
    #[error("vehicle {vehicle} has not been planned")]
    NotPlanned {
        /// Unplanned vehicle.
        vehicle: VehicleId,
    },
    /// A loaded package is missing from the store.
    #[error("vehicle {vehicle}: {source}")]
    MissingPackage {
        /// Vehicle being simulated.
        vehicle: VehicleId,
        /// Store lookup failure.
        #[source]
        source: StoreError,
    },
    /// A delivery address is not in the distance index.
    #[error("vehicle {vehicle}: package {package} has unknown address {address:?}")]
    UnknownLocation {
        /// Vehicle being simulated.
        vehicle: VehicleId,
        /// Package whose address failed to resolve.
        package: PackageId,
        /// The unresolved address.
        address: String,
        /// Lookup failure from the index.
        #[source]
        source: DistanceError,
    },
    /// The leg from the last stop back to the depot could not be measured.
    #[error("vehicle {vehicle}: cannot return to depot from {from}: {source}")]
    ReturnLeg {
        /// Vehicle being simulated.
        vehicle: VehicleId,
        /// Last stop.
        from: Location,
        /// Lookup failure from the index.
        #[source]
        source: DistanceError,
    },
    /// The route visits the same package more than once.
    #[error("vehicle {vehicle}: package {package} appears twice in the route")]
    RepeatedStop {
        /// Vehicle being simulated.
        vehicle: VehicleId,
        /// Package listed again.
        package: PackageId,
    },
    /// A package record refused the delivery or correction.
    #[error("vehicle {vehicle}: {source}")]
    Package {
        /// Vehicle being simulated.
        vehicle: VehicleId,
        /// Rejected mutation.
        #[source]
        source: PackageError,
    },
}

/// One resolved stop of an itinerary.
#[derive(Debug)]
struct Leg {
    package: PackageId,
    destination: Location,
    distance: Miles,
}

/// Everything a pass will do, computed before anything changes.
#[derive(Debug)]
struct Itinerary {
    depart_at: Option<Minutes>,
    corrections: Vec<(PackageId, String)>,
    legs: Vec<Leg>,
    return_leg: Miles,
}

/// Drives planned vehicles along their routes, stamping delivery times.
///
/// The simulator is deterministic: identical inputs always produce identical
/// timestamps and mileage.
///
/// # Examples
/// ```
/// use courier_core::test_support::{ids, sample_index, store_with};
/// use courier_core::{DeliveryStatus, Miles, PackageId, Vehicle, VehicleId};
/// use courier_sim::{DeliverySimulator, SimulationConfig};
///
/// let index = sample_index()?;
/// let mut store = store_with(&[(1, "A St"), (2, "C St")]);
/// let mut vehicle = Vehicle::new(VehicleId::new(1), ids(&[1, 2]));
/// vehicle.apply_route(ids(&[1, 2]))?;
///
/// DeliverySimulator::new(SimulationConfig::default()).simulate(&mut vehicle, &mut store, &index)?;
/// assert_eq!(store.get(PackageId::new(2))?.status(), DeliveryStatus::Delivered);
/// assert_eq!(vehicle.odometer(), Miles::new(8.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeliverySimulator {
    config: SimulationConfig,
}

impl DeliverySimulator {
    /// Construct a simulator with `config`.
    #[must_use]
    pub const fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run `vehicle` along its planned route.
    ///
    /// Applies the vehicle's dispatch hold and any address corrections for
    /// its packages, then delivers each package in route order, advancing
    /// the clock by the travel time of every leg. Finally the vehicle drives
    /// back to the depot; that leg adds distance but not time.
    pub fn simulate(
        &self,
        vehicle: &mut Vehicle,
        store: &mut PackageStore,
        index: &DistanceIndex,
    ) -> Result<(), SimulationError> {
        let itinerary = self.itinerary(vehicle, store, index)?;
        let id = vehicle.id();

        if let Some(depart_at) = itinerary.depart_at {
            vehicle.hold_until(depart_at);
            info!("vehicle {id} held at the depot until {depart_at}");
        }
        for (package, address) in itinerary.corrections {
            let record = store
                .get_mut(package)
                .map_err(|source| SimulationError::MissingPackage { vehicle: id, source })?;
            warn!(
                "vehicle {id}: package {package} redirected from {:?} to {address:?}",
                record.address()
            );
            record
                .correct_address(address)
                .map_err(|source| SimulationError::Package { vehicle: id, source })?;
        }

        let stops = itinerary.legs.len();
        for leg in itinerary.legs {
            let travel_time = self.config.speed.travel_time(leg.distance);
            vehicle.drive_to(leg.destination, leg.distance, travel_time);
            let record = store
                .get_mut(leg.package)
                .map_err(|source| SimulationError::MissingPackage { vehicle: id, source })?;
            record
                .mark_delivered(vehicle.clock())
                .map_err(|source| SimulationError::Package { vehicle: id, source })?;
            debug!(
                "vehicle {id} delivered package {} at {} after {}",
                leg.package,
                vehicle.clock(),
                leg.distance
            );
        }
        vehicle.return_to_depot(itinerary.return_leg);
        info!(
            "vehicle {id} finished {stops} deliveries at {} having driven {}",
            vehicle.clock(),
            vehicle.odometer()
        );
        Ok(())
    }

    fn itinerary(
        &self,
        vehicle: &Vehicle,
        store: &PackageStore,
        index: &DistanceIndex,
    ) -> Result<Itinerary, SimulationError> {
        let id = vehicle.id();
        if !vehicle.is_planned() {
            return Err(SimulationError::NotPlanned { vehicle: id });
        }

        let mut corrected: BTreeMap<PackageId, &str> = BTreeMap::new();
        for correction in self.config.corrections_for(vehicle.packages()) {
            let record = store
                .get(correction.package)
                .map_err(|source| SimulationError::MissingPackage { vehicle: id, source })?;
            let repeated = corrected
                .insert(correction.package, correction.address.as_str())
                .is_some();
            if repeated || record.corrected_from().is_some() {
                return Err(SimulationError::Package {
                    vehicle: id,
                    source: PackageError::AlreadyCorrected {
                        id: correction.package,
                    },
                });
            }
        }

        let mut current = vehicle.location().clone();
        let mut legs = Vec::with_capacity(vehicle.packages().len());
        let mut visited = BTreeSet::new();
        for &package in vehicle.packages() {
            if !visited.insert(package) {
                return Err(SimulationError::RepeatedStop {
                    vehicle: id,
                    package,
                });
            }
            let record = store
                .get(package)
                .map_err(|source| SimulationError::MissingPackage { vehicle: id, source })?;
            if let Some(at) = record.delivered_at() {
                return Err(SimulationError::Package {
                    vehicle: id,
                    source: PackageError::AlreadyDelivered { id: package, at },
                });
            }
            let address = corrected
                .get(&package)
                .copied()
                .unwrap_or_else(|| record.address());
            let destination = Location::Address(address.to_owned());
            let distance = index.distance_between(&current, &destination).map_err(|source| {
                SimulationError::UnknownLocation {
                    vehicle: id,
                    package,
                    address: address.to_owned(),
                    source,
                }
            })?;
            legs.push(Leg {
                package,
                destination: destination.clone(),
                distance,
            });
            current = destination;
        }

        let return_leg = index
            .distance_between(&current, &Location::Depot)
            .map_err(|source| SimulationError::ReturnLeg {
                vehicle: id,
                from: current.clone(),
                source,
            })?;

        Ok(Itinerary {
            depart_at: self.config.hold_for(id),
            corrections: corrected
                .into_iter()
                .map(|(package, address)| (package, address.to_owned()))
                .collect(),
            legs,
            return_leg,
        })
    }
}
