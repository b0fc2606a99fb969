//! Delivery simulation for the courier engine.
//!
//! [`DeliverySimulator`] drives a planned [`Vehicle`](courier_core::Vehicle)
//! along its route at a constant average speed, stamping each package with
//! its delivery time in elapsed dispatch minutes and accumulating mileage,
//! including the final leg back to the depot. Scripted exceptions (late
//! departures and address fixes) are explicit [`SimulationConfig`] values
//! rather than special cases in the loop.
//!
//! [`DeliveryRun`] ties an [`Assignment`](courier_core::Assignment), a
//! [`RoutePlanner`](courier_core::RoutePlanner) and the simulator together
//! for a whole fleet.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod run;
mod simulator;

pub use config::{AddressCorrection, DispatchHold, SimulationConfig};
pub use run::{DeliveryRun, RunError};
pub use simulator::{DeliverySimulator, SimulationError};
