//! End-to-end delivery run: assign, plan, simulate.

use courier_core::{
    Assignment, AssignmentError, DistanceIndex, PackageStore, PlanError, RoutePlanner, Vehicle,
};
use log::info;
use thiserror::Error;

use crate::{DeliverySimulator, SimulationError};

/// Errors raised by [`DeliveryRun::run`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// The assignment does not fit the loaded packages.
    #[error("invalid assignment: {0}")]
    Assignment(#[from] AssignmentError),
    /// A vehicle could not be planned.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// A vehicle could not complete its deliveries.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}

/// Runs a whole fleet through planning and simulation.
///
/// Generic over the [`RoutePlanner`] so alternative orderings can be swapped
/// in without touching the simulation.
///
/// # Examples
/// ```
/// use courier_core::test_support::{ids, sample_index, store_with};
/// use courier_core::{Assignment, Miles, VehicleId};
/// use courier_planner::NearestNeighbourPlanner;
/// use courier_sim::{DeliveryRun, DeliverySimulator};
///
/// let index = sample_index()?;
/// let mut store = store_with(&[(1, "C St"), (2, "A St")]);
/// let assignment = Assignment::new().with_vehicle(VehicleId::new(1), ids(&[1, 2]));
///
/// let run = DeliveryRun::new(NearestNeighbourPlanner, DeliverySimulator::default());
/// let fleet = run.run(&assignment, &mut store, &index)?;
/// assert_eq!(fleet[0].packages(), ids(&[2, 1]).as_slice());
/// assert_eq!(fleet[0].odometer(), Miles::new(8.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryRun<P> {
    planner: P,
    simulator: DeliverySimulator,
}

impl<P: RoutePlanner> DeliveryRun<P> {
    /// Combine a planner and a simulator.
    pub const fn new(planner: P, simulator: DeliverySimulator) -> Self {
        Self { planner, simulator }
    }

    /// Active simulator.
    #[must_use]
    pub const fn simulator(&self) -> &DeliverySimulator {
        &self.simulator
    }

    /// Build vehicles from `assignment`, plan each, then simulate each.
    ///
    /// Vehicles are returned in ascending id order. The run stops at the
    /// first failing vehicle; vehicles simulated before it keep their
    /// deliveries in `store`.
    pub fn run(
        &self,
        assignment: &Assignment,
        store: &mut PackageStore,
        index: &DistanceIndex,
    ) -> Result<Vec<Vehicle>, RunError> {
        let mut fleet = assignment.vehicles(store)?;
        for vehicle in &mut fleet {
            self.planner.plan(vehicle, store, index)?;
        }
        for vehicle in &mut fleet {
            self.simulator.simulate(vehicle, store, index)?;
        }
        info!(
            "delivery run finished: {} vehicles, {} packages",
            fleet.len(),
            fleet.iter().map(|vehicle| vehicle.packages().len()).sum::<usize>()
        );
        Ok(fleet)
    }
}

#[cfg(test)]
mod tests;
