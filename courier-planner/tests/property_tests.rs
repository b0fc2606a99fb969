//! Property-based tests for the nearest-neighbour planner.
//!
//! # Invariants tested
//!
//! - **Permutation:** The route contains every loaded package exactly once.
//! - **Greedy choice:** Every stop is at the minimum distance from the
//!   previous one among the packages still undelivered.
//! - **Stable ties:** Among equally near candidates the earliest loaded
//!   package is chosen.
//! - **Determinism:** Planning the same load twice yields the same route.


use std::collections::HashMap;

use courier_core::{Location, Miles, PackageId, RoutePlanner};
use courier_planner::NearestNeighbourPlanner;
use proptest::prelude::*;

use proptest_support::{PlanningCase, planning_case_strategy};

fn planned(case: &PlanningCase) -> Vec<PackageId> {
    NearestNeighbourPlanner
        .plan_route(&case.vehicle(), &case.store, &case.index)
        .expect("generated loads are plannable")
}

fn location_of(case: &PlanningCase, id: PackageId) -> Location {
    let package = case.store.get(id).expect("generated package exists");
    Location::Address(package.address().to_owned())
}

fn leg(case: &PlanningCase, from: &Location, to: &Location) -> Miles {
    case.index
        .distance_between(from, to)
        .expect("generated addresses are indexed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the route is a permutation of the load.
    #[test]
    fn route_is_permutation_of_load(case in planning_case_strategy(6, 12)) {
        let route = planned(&case);
        let mut sorted_route = route.clone();
        sorted_route.sort();
        let mut sorted_load = case.load.clone();
        sorted_load.sort();
        prop_assert_eq!(sorted_route, sorted_load);
    }

    /// Property: each stop is a nearest remaining stop, and the earliest
    /// loaded one among those at the same distance.
    #[test]
    fn every_stop_is_the_earliest_nearest(case in planning_case_strategy(6, 12)) {
        let route = planned(&case);
        let load_position: HashMap<PackageId, usize> = case
            .load
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();

        let mut remaining = case.load.clone();
        let mut current = Location::Depot;
        for chosen in route {
            let target = location_of(&case, chosen);
            let chosen_leg = leg(&case, &current, &target);
            for other in &remaining {
                let other_leg = leg(&case, &current, &location_of(&case, *other));
                prop_assert!(
                    chosen_leg <= other_leg,
                    "package {chosen} at {chosen_leg} chosen over nearer {other} at {other_leg}"
                );
                if other_leg == chosen_leg {
                    prop_assert!(
                        load_position[&chosen] <= load_position[other],
                        "tie between {chosen} and {other} broken against load order"
                    );
                }
            }
            remaining.retain(|id| *id != chosen);
            current = target;
        }
        prop_assert!(remaining.is_empty());
    }

    /// Property: planning is a pure function of its inputs.
    #[test]
    fn planning_is_deterministic(case in planning_case_strategy(6, 12)) {
        prop_assert_eq!(planned(&case), planned(&case));
    }
}
