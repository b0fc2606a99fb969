//! Command-line interface for the courier delivery engine.
//!
//! Every query subcommand loads the package file, distance table and
//! scenario, plans and simulates the full delivery day, then prints a JSON
//! report. Logging goes through `log`; the binary installs `env_logger`, so
//! `RUST_LOG=info` shows the run as it happens.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod report;

use commands::{DistancesArgs, MileageArgs, StatusArgs, VehicleArgs};

pub use error::CliError;

/// Run the courier CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli.command, &mut stdout)
}

fn run_with(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Status(args) => commands::run_status(args, writer),
        Command::Vehicle(args) => commands::run_vehicle(args, writer),
        Command::Mileage(args) => commands::run_mileage(args, writer),
        Command::Distances(args) => commands::run_distances(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Simulate a day of package deliveries and query the outcome",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report package statuses at a time of day.
    Status(StatusArgs),
    /// Report one vehicle's packages at a time of day.
    Vehicle(VehicleArgs),
    /// Report miles driven per vehicle and for the fleet.
    Mileage(MileageArgs),
    /// Print the loaded distance table.
    Distances(DistancesArgs),
}

#[cfg(test)]
mod tests;
