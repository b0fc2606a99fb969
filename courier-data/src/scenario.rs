//! Scenario file: the fixed fleet assignment plus simulation settings.
//!
//! ```json
//! {
//!   "assignment": { "1": [1, 13, 14], "2": [3, 18], "3": [2, 9] },
//!   "simulation": {
//!     "speed": 18.0,
//!     "holds": [{ "vehicle": 3, "depart_at": 140.0 }],
//!     "corrections": [{ "package": 9, "address": "410 S State St" }]
//!   }
//! }
//! ```
//!
//! Hold times are minutes after dispatch. Every section is optional.

use camino::Utf8Path;
use courier_core::Assignment;
use courier_sim::SimulationConfig;
use log::info;
use serde::{Deserialize, Serialize};

use crate::LoadError;

/// Decoded scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Packages per vehicle, in load order.
    pub assignment: Assignment,
    /// Speed, dispatch holds and address corrections.
    pub simulation: SimulationConfig,
}

/// Decode a scenario from JSON text.
///
/// # Examples
/// ```
/// use courier_core::{Minutes, VehicleId};
/// use courier_data::parse_scenario;
///
/// let scenario = parse_scenario(r#"{
///     "assignment": { "3": [2, 9] },
///     "simulation": { "holds": [{ "vehicle": 3, "depart_at": 140.0 }] }
/// }"#)?;
/// assert_eq!(scenario.assignment.packages_for(VehicleId::new(3)).map(<[_]>::len), Some(2));
/// assert_eq!(scenario.simulation.hold_for(VehicleId::new(3)), Some(Minutes::new(140.0)));
/// # Ok::<(), courier_data::LoadError>(())
/// ```
pub fn parse_scenario(json: &str) -> Result<Scenario, LoadError> {
    let scenario: Scenario = serde_json::from_str(json)?;
    info!(
        "scenario assigns {} vehicles with {} holds and {} corrections",
        scenario.assignment.vehicle_ids().count(),
        scenario.simulation.holds.len(),
        scenario.simulation.corrections.len()
    );
    Ok(scenario)
}

/// Load the scenario file at `path`.
pub fn load_scenario(path: &Utf8Path) -> Result<Scenario, LoadError> {
    let json = courier_fs::read_utf8_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&json).map_err(|err| err.in_file(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{PackageId, Speed, VehicleId};
    use rstest::rstest;

    #[rstest]
    fn empty_object_is_the_default_scenario() {
        assert_eq!(parse_scenario("{}").expect("valid"), Scenario::default());
    }

    #[rstest]
    fn reads_corrections_and_speed() {
        let scenario = parse_scenario(
            r#"{
                "simulation": {
                    "speed": 25.0,
                    "corrections": [{ "package": 9, "address": "410 S State St" }]
                }
            }"#,
        )
        .expect("valid");
        assert_eq!(scenario.simulation.speed, Speed::from_mph(25.0).expect("valid"));
        assert_eq!(
            scenario.simulation.corrections.first().map(|c| c.package),
            Some(PackageId::new(9))
        );
    }

    #[rstest]
    fn assignment_keeps_load_order() {
        let scenario = parse_scenario(r#"{ "assignment": { "2": [7, 3, 5] } }"#).expect("valid");
        let load = scenario.assignment.packages_for(VehicleId::new(2));
        assert_eq!(
            load,
            Some([PackageId::new(7), PackageId::new(3), PackageId::new(5)].as_slice())
        );
    }

    #[rstest]
    #[case(r#"{ "assignment": [1, 2] }"#)]
    #[case(r#"{ "fleet": {} }"#)]
    #[case(r#"{ "simulation": { "speed": -4 } }"#)]
    fn malformed_scenarios_are_rejected(#[case] json: &str) {
        assert!(matches!(parse_scenario(json), Err(LoadError::Scenario { .. })));
    }
}
