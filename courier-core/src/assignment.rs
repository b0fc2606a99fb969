//! The fixed vehicle-to-package assignment supplied by the caller.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::{PackageId, PackageStore, Vehicle, VehicleId};

/// Errors raised when an [`Assignment`] does not fit the loaded packages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// A vehicle lists a package that is not in the store.
    #[error("vehicle {vehicle} is assigned package {package}, which was not loaded")]
    UnknownPackage {
        /// Vehicle whose list references the package.
        vehicle: VehicleId,
        /// Missing package.
        package: PackageId,
    },
    /// A package is listed more than once across the fleet.
    #[error("package {package} is assigned to vehicle {first} and again to vehicle {second}")]
    DuplicatePackage {
        /// Repeated package.
        package: PackageId,
        /// First vehicle listing it.
        first: VehicleId,
        /// Vehicle listing it again.
        second: VehicleId,
    },
}

/// Ordered package lists per vehicle, in load order.
///
/// # Examples
/// ```
/// use courier_core::{Assignment, Package, PackageId, PackageStore, VehicleId};
///
/// let store: PackageStore = [Package::new(PackageId::new(1), "A St")].into_iter().collect();
/// let assignment = Assignment::new().with_vehicle(VehicleId::new(1), [PackageId::new(1)]);
/// let vehicles = assignment.vehicles(&store)?;
/// assert_eq!(vehicles.len(), 1);
/// # Ok::<(), courier_core::AssignmentError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Assignment {
    vehicles: BTreeMap<VehicleId, Vec<PackageId>>,
}

impl Assignment {
    /// An assignment with no vehicles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `packages` to `vehicle`, replacing any earlier list.
    #[must_use]
    pub fn with_vehicle<I>(mut self, vehicle: VehicleId, packages: I) -> Self
    where
        I: IntoIterator<Item = PackageId>,
    {
        self.vehicles.insert(vehicle, packages.into_iter().collect());
        self
    }

    /// Package list for `vehicle`, if it has one.
    #[must_use]
    pub fn packages_for(&self, vehicle: VehicleId) -> Option<&[PackageId]> {
        self.vehicles.get(&vehicle).map(Vec::as_slice)
    }

    /// Vehicle identifiers in ascending order.
    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.keys().copied()
    }

    /// Validate against `store` and build one [`Vehicle`] per entry, in
    /// ascending vehicle order.
    ///
    /// Every listed package must be loaded and may appear only once across
    /// the whole fleet, so no record is ever delivered by two vehicles.
    pub fn vehicles(&self, store: &PackageStore) -> Result<Vec<Vehicle>, AssignmentError> {
        let mut owners: HashMap<PackageId, VehicleId> = HashMap::new();
        for (&vehicle, packages) in &self.vehicles {
            for &package in packages {
                if !store.contains(package) {
                    return Err(AssignmentError::UnknownPackage { vehicle, package });
                }
                if let Some(first) = owners.insert(package, vehicle) {
                    return Err(AssignmentError::DuplicatePackage {
                        package,
                        first,
                        second: vehicle,
                    });
                }
            }
        }
        Ok(self
            .vehicles
            .iter()
            .map(|(&id, packages)| Vehicle::new(id, packages.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Package;
    use rstest::{fixture, rstest};

    fn ids(raw: &[u32]) -> Vec<PackageId> {
        raw.iter().copied().map(PackageId::new).collect()
    }

    #[fixture]
    fn store() -> PackageStore {
        (1..=4)
            .map(|id| Package::new(PackageId::new(id), "A St"))
            .collect()
    }

    #[rstest]
    fn builds_vehicles_in_id_order(store: PackageStore) {
        let assignment = Assignment::new()
            .with_vehicle(VehicleId::new(2), ids(&[3, 4]))
            .with_vehicle(VehicleId::new(1), ids(&[2, 1]));
        let vehicles = assignment.vehicles(&store).expect("valid assignment");
        let order: Vec<_> = vehicles.iter().map(Vehicle::id).collect();
        assert_eq!(order, vec![VehicleId::new(1), VehicleId::new(2)]);
        assert_eq!(vehicles.first().map(Vehicle::packages), Some(ids(&[2, 1]).as_slice()));
    }

    #[rstest]
    fn rejects_unknown_packages(store: PackageStore) {
        let assignment = Assignment::new().with_vehicle(VehicleId::new(1), ids(&[1, 9]));
        assert_eq!(
            assignment.vehicles(&store),
            Err(AssignmentError::UnknownPackage {
                vehicle: VehicleId::new(1),
                package: PackageId::new(9),
            })
        );
    }

    #[rstest]
    fn rejects_packages_shared_between_vehicles(store: PackageStore) {
        let assignment = Assignment::new()
            .with_vehicle(VehicleId::new(1), ids(&[1, 2]))
            .with_vehicle(VehicleId::new(3), ids(&[2]));
        assert_eq!(
            assignment.vehicles(&store),
            Err(AssignmentError::DuplicatePackage {
                package: PackageId::new(2),
                first: VehicleId::new(1),
                second: VehicleId::new(3),
            })
        );
    }
}
