//! Scripted inputs for a simulation pass.

use courier_core::{Minutes, PackageId, Speed, VehicleId};

/// Keep a vehicle at the depot until a fixed elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchHold {
    /// Held vehicle.
    pub vehicle: VehicleId,
    /// Minutes after dispatch at which the vehicle may leave.
    pub depart_at: Minutes,
}

/// Replace a package's address before its vehicle sets off.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressCorrection {
    /// Package whose address was listed wrongly.
    pub package: PackageId,
    /// Address to deliver to instead.
    pub address: String,
}

/// Configuration for [`DeliverySimulator`](crate::DeliverySimulator).
///
/// # Examples
/// ```
/// use courier_core::{Minutes, PackageId, VehicleId};
/// use courier_sim::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_hold(VehicleId::new(3), Minutes::new(140.0))
///     .with_correction(PackageId::new(9), "410 S State St");
/// assert_eq!(config.speed.mph(), 18.0);
/// assert_eq!(config.hold_for(VehicleId::new(3)), Some(Minutes::new(140.0)));
/// assert_eq!(config.hold_for(VehicleId::new(1)), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Average vehicle speed.
    pub speed: Speed,
    /// Vehicles that leave after dispatch.
    pub holds: Vec<DispatchHold>,
    /// Addresses fixed before departure.
    pub corrections: Vec<AddressCorrection>,
}

impl SimulationConfig {
    /// Replace the average speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Add a dispatch hold.
    #[must_use]
    pub fn with_hold(mut self, vehicle: VehicleId, depart_at: Minutes) -> Self {
        self.holds.push(DispatchHold { vehicle, depart_at });
        self
    }

    /// Add an address correction.
    #[must_use]
    pub fn with_correction(mut self, package: PackageId, address: impl Into<String>) -> Self {
        self.corrections.push(AddressCorrection {
            package,
            address: address.into(),
        });
        self
    }

    /// Departure time for `vehicle`. When several holds name it, the latest
    /// one applies.
    #[must_use]
    pub fn hold_for(&self, vehicle: VehicleId) -> Option<Minutes> {
        self.holds
            .iter()
            .filter(|hold| hold.vehicle == vehicle)
            .map(|hold| hold.depart_at)
            .reduce(Minutes::max)
    }

    /// Corrections that touch one of `packages`, in configuration order.
    pub fn corrections_for<'a>(
        &'a self,
        packages: &'a [PackageId],
    ) -> impl Iterator<Item = &'a AddressCorrection> + 'a {
        self.corrections
            .iter()
            .filter(move |correction| packages.contains(&correction.package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_eighteen_mph_without_scripts() {
        let config = SimulationConfig::default();
        assert_eq!(config.speed, Speed::default());
        assert!(config.holds.is_empty());
        assert!(config.corrections.is_empty());
    }

    #[rstest]
    fn latest_hold_wins() {
        let vehicle = VehicleId::new(2);
        let config = SimulationConfig::default()
            .with_hold(vehicle, Minutes::new(90.0))
            .with_hold(vehicle, Minutes::new(65.0));
        assert_eq!(config.hold_for(vehicle), Some(Minutes::new(90.0)));
    }

    #[rstest]
    fn corrections_are_filtered_by_load() {
        let config = SimulationConfig::default()
            .with_correction(PackageId::new(9), "410 S State St")
            .with_correction(PackageId::new(4), "1060 Dalton Ave S");
        let load = [PackageId::new(1), PackageId::new(9)];
        let touched: Vec<_> = config
            .corrections_for(&load)
            .map(|correction| correction.package)
            .collect();
        assert_eq!(touched, vec![PackageId::new(9)]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn partial_json_falls_back_to_defaults() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{ "holds": [ { "vehicle": 3, "depart_at": 140.0 } ] }"#,
        )
        .expect("valid config");
        assert_eq!(config.speed, Speed::default());
        assert_eq!(config.hold_for(VehicleId::new(3)), Some(Minutes::new(140.0)));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn non_positive_speed_is_rejected() {
        let result = serde_json::from_str::<SimulationConfig>(r#"{ "speed": 0.0 }"#);
        assert!(result.is_err());
    }
}
