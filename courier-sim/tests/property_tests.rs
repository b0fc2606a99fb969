//! Property-based tests for fleet simulation.
//!
//! # Invariants tested
//!
//! - **Status agreement:** After a run, a package is delivered exactly when
//!   it carries a timestamp, and every assigned package has one.
//! - **Monotonic time:** Timestamps never decrease along a route.
//! - **Holds:** A held vehicle never delivers before its departure time.
//! - **Determinism:** Identical inputs give identical timestamps and mileage.
//! - **Mileage:** Fleet mileage equals the sum of odometers and is stable
//!   across repeated queries.

use courier_core::test_support::line_index;
use courier_core::{
    Assignment, DeliveryStatus, DistanceIndex, Miles, Minutes, Package, PackageId, PackageStore,
    StatusQuery, Vehicle, VehicleId,
};
use courier_planner::NearestNeighbourPlanner;
use courier_sim::{DeliveryRun, DeliverySimulator, SimulationConfig};
use proptest::prelude::*;

/// A generated fleet problem on a straight road.
#[derive(Debug, Clone)]
struct FleetCase {
    posts: Vec<f64>,
    /// Address index per package, grouped per vehicle.
    loads: Vec<Vec<usize>>,
    hold: Option<(usize, f64)>,
}

fn address(stop: usize) -> String {
    format!("{stop} Milepost Rd")
}

fn fleet_case_strategy() -> impl Strategy<Value = FleetCase> {
    proptest::collection::vec(0.5_f64..40.0_f64, 2..8).prop_flat_map(|posts| {
        let stops = posts.len();
        (
            Just(posts),
            proptest::collection::vec(proptest::collection::vec(0..stops, 0..6), 1..4),
            proptest::option::of((0_usize..3, 0.0_f64..300.0)),
        )
            .prop_map(|(posts, loads, hold)| FleetCase { posts, loads, hold })
    })
}

struct Outcome {
    store: PackageStore,
    fleet: Vec<Vehicle>,
    index: DistanceIndex,
}

fn simulate(case: &FleetCase) -> Outcome {
    let names: Vec<String> = (0..case.posts.len()).map(address).collect();
    let stops: Vec<(&str, f64)> = names
        .iter()
        .map(String::as_str)
        .zip(case.posts.iter().copied())
        .collect();
    let index = line_index(&stops).expect("generated road is valid");

    let mut store = PackageStore::default();
    let mut assignment = Assignment::new();
    let mut next_id = 1_u32;
    for (vehicle, load) in case.loads.iter().enumerate() {
        let mut packages = Vec::with_capacity(load.len());
        for stop in load {
            let id = PackageId::new(next_id);
            next_id += 1;
            store.insert(id, Package::new(id, address(*stop)));
            packages.push(id);
        }
        assignment = assignment.with_vehicle(vehicle_id(vehicle), packages);
    }

    let mut config = SimulationConfig::default();
    if let Some((vehicle, depart_at)) = case.hold {
        config = config.with_hold(vehicle_id(vehicle), Minutes::new(depart_at));
    }
    let run = DeliveryRun::new(NearestNeighbourPlanner, DeliverySimulator::new(config));
    let fleet = run
        .run(&assignment, &mut store, &index)
        .expect("generated run succeeds");
    Outcome {
        store,
        fleet,
        index,
    }
}

fn vehicle_id(position: usize) -> VehicleId {
    VehicleId::new(u32::try_from(position).expect("small fleet") + 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// Property: every package is delivered and status agrees with the
    /// timestamp.
    #[test]
    fn delivered_iff_timestamped(case in fleet_case_strategy()) {
        let outcome = simulate(&case);
        for (_, package) in outcome.store.iter() {
            prop_assert!(package.delivered_at().is_some());
            prop_assert_eq!(package.status(), DeliveryStatus::Delivered);
        }
    }

    /// Property: timestamps are non-decreasing along each route and never
    /// precede a vehicle's hold.
    #[test]
    fn timestamps_follow_route_order(case in fleet_case_strategy()) {
        let outcome = simulate(&case);
        for vehicle in &outcome.fleet {
            let mut previous = Minutes::ZERO;
            if let Some((held, depart_at)) = case.hold {
                if vehicle.id() == vehicle_id(held) {
                    previous = Minutes::new(depart_at);
                }
            }
            for id in vehicle.packages() {
                let at = outcome
                    .store
                    .get(*id)
                    .expect("stored")
                    .delivered_at()
                    .expect("delivered");
                prop_assert!(at >= previous, "{id} at {at} precedes {previous}");
                previous = at;
            }
        }
    }

    /// Property: the same inputs give the same timestamps and mileage.
    #[test]
    fn runs_are_deterministic(case in fleet_case_strategy()) {
        let first = simulate(&case);
        let second = simulate(&case);
        prop_assert_eq!(&first.fleet, &second.fleet);
        for (id, package) in first.store.iter() {
            let again = second.store.get(id).expect("same packages");
            prop_assert_eq!(package.delivered_at(), again.delivered_at());
        }
    }

    /// Property: fleet mileage is the sum of odometers, repeated queries
    /// agree, and every vehicle ends at the depot.
    #[test]
    fn mileage_counts_return_legs_once(case in fleet_case_strategy()) {
        let outcome = simulate(&case);
        let query = StatusQuery::new(&outcome.store, &outcome.fleet, &outcome.index);
        let report = query.total_mileage().expect("mileage");
        let odometers: Miles = outcome.fleet.iter().map(Vehicle::odometer).sum();

        prop_assert!(outcome.fleet.iter().all(|vehicle| vehicle.location().is_depot()));
        prop_assert_eq!(report.total, odometers);
        prop_assert_eq!(query.total_mileage().expect("mileage"), report);
    }
}
