//! Tests for `DeliveryRun`.

use super::*;
use courier_core::test_support::{ids, sample_index, store_with};
use courier_core::{DeliveryStatus, Miles, Minutes, Package, PackageId, StatusQuery, VehicleId};
use courier_planner::NearestNeighbourPlanner;
use rstest::{fixture, rstest};

use crate::SimulationConfig;

#[fixture]
fn index() -> DistanceIndex {
    sample_index().expect("sample index is valid")
}

#[fixture]
fn store() -> PackageStore {
    store_with(&[
        (1, "E St"),
        (2, "A St"),
        (3, "C St"),
        (4, "B St"),
        (5, "D St"),
    ])
}

fn assignment() -> Assignment {
    Assignment::new()
        .with_vehicle(VehicleId::new(2), ids(&[4, 5]))
        .with_vehicle(VehicleId::new(1), ids(&[1, 2, 3]))
}

fn run(config: SimulationConfig) -> DeliveryRun<NearestNeighbourPlanner> {
    DeliveryRun::new(NearestNeighbourPlanner, DeliverySimulator::new(config))
}

#[rstest]
fn every_assigned_package_is_delivered(index: DistanceIndex, mut store: PackageStore) {
    let fleet = run(SimulationConfig::default())
        .run(&assignment(), &mut store, &index)
        .expect("run succeeds");

    let order: Vec<_> = fleet.iter().map(Vehicle::id).collect();
    assert_eq!(order, vec![VehicleId::new(1), VehicleId::new(2)]);
    for (_, package) in store.iter() {
        assert_eq!(package.status(), DeliveryStatus::Delivered);
    }
    assert_eq!(fleet[0].packages(), ids(&[2, 3, 1]).as_slice());
    assert_eq!(fleet[1].packages(), ids(&[4, 5]).as_slice());
}

#[rstest]
fn fleet_mileage_counts_each_return_leg_once(index: DistanceIndex, mut store: PackageStore) {
    let fleet = run(SimulationConfig::default())
        .run(&assignment(), &mut store, &index)
        .expect("run succeeds");
    let query = StatusQuery::new(&store, &fleet, &index);

    let first = query.total_mileage().expect("mileage");
    let second = query.total_mileage().expect("mileage");
    // Vehicle 1 reaches mile 9 and returns; vehicle 2 reaches mile 6 and returns.
    assert_eq!(first.total, Miles::new(30.0));
    assert_eq!(first.vehicles[0].miles, Miles::new(18.0));
    assert_eq!(first.vehicles[1].miles, Miles::new(12.0));
    assert_eq!(first, second);
}

#[rstest]
fn held_vehicle_never_delivers_before_departure(index: DistanceIndex, mut store: PackageStore) {
    let config = SimulationConfig::default().with_hold(VehicleId::new(2), Minutes::new(140.0));
    run(config)
        .run(&assignment(), &mut store, &index)
        .expect("run succeeds");
    for id in [4, 5] {
        let at = store
            .get(PackageId::new(id))
            .expect("stored")
            .delivered_at()
            .expect("delivered");
        assert!(at >= Minutes::new(140.0), "package {id} delivered at {at}");
    }
}

#[rstest]
fn unknown_package_in_assignment_is_rejected(index: DistanceIndex, mut store: PackageStore) {
    let assignment = Assignment::new().with_vehicle(VehicleId::new(1), ids(&[1, 99]));
    let err = run(SimulationConfig::default())
        .run(&assignment, &mut store, &index)
        .expect_err("package 99 was never loaded");
    assert_eq!(
        err,
        RunError::Assignment(AssignmentError::UnknownPackage {
            vehicle: VehicleId::new(1),
            package: PackageId::new(99),
        })
    );
}

#[rstest]
fn planning_failure_stops_before_any_delivery(index: DistanceIndex, mut store: PackageStore) {
    store.insert(PackageId::new(6), Package::new(PackageId::new(6), "Nowhere Rd"));
    let assignment = Assignment::new()
        .with_vehicle(VehicleId::new(1), ids(&[1, 2]))
        .with_vehicle(VehicleId::new(2), ids(&[6]));
    let err = run(SimulationConfig::default())
        .run(&assignment, &mut store, &index)
        .expect_err("unknown address");

    assert!(matches!(err, RunError::Plan(PlanError::UnknownLocation { .. })));
    assert!(store.iter().all(|(_, package)| package.delivered_at().is_none()));
}
