//! Subcommand implementations.
//!
//! Each query subcommand loads the input files, plans and simulates the
//! whole delivery day, then answers from the finished run.

use std::io::Write;

use chrono::NaiveTime;
use clap::Parser;
use courier_core::{DispatchClock, Minutes, PackageId, StatusQuery, Vehicle, VehicleId};
use courier_data::{Dataset, load_distance_table};
use courier_planner::NearestNeighbourPlanner;
use courier_sim::{DeliveryRun, DeliverySimulator};
use log::info;
use serde::Serialize;

use crate::CliError;
use crate::config::{DataArgs, DataConfig};
use crate::report::{
    DistancesReport, PackageReport, PackageView, StatusReport, VehicleReport, format_time,
};

pub(crate) const ARG_AT: &str = "at";
pub(crate) const ARG_PACKAGE: &str = "package";
pub(crate) const ARG_VEHICLE: &str = "id";

const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

#[derive(Debug, Clone, Parser)]
pub(crate) struct StatusArgs {
    /// Time of day, e.g. "10:25 AM" or "13:12".
    #[arg(long = ARG_AT, value_name = "time")]
    pub(crate) at: String,
    /// Report a single package instead of all of them.
    #[arg(long = ARG_PACKAGE, value_name = "id")]
    pub(crate) package: Option<u32>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct VehicleArgs {
    /// Vehicle number from the scenario assignment.
    #[arg(long = ARG_VEHICLE, value_name = "id")]
    pub(crate) id: u32,
    /// Time of day, e.g. "10:25 AM" or "13:12".
    #[arg(long = ARG_AT, value_name = "time")]
    pub(crate) at: String,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct MileageArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct DistancesArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

/// Parse `HH:MM AM/PM` or 24-hour `HH:MM` into elapsed dispatch minutes.
pub(crate) fn parse_time(value: &str, clock: &DispatchClock) -> Result<Minutes, CliError> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(|time| clock.elapsed_at(time))
        .ok_or_else(|| CliError::InvalidTime {
            value: value.to_owned(),
        })
}

/// A finished delivery day.
struct DeliveryDay {
    dataset: Dataset,
    fleet: Vec<Vehicle>,
}

impl DeliveryDay {
    fn simulate(data: DataArgs) -> Result<Self, CliError> {
        let config = resolve_data_config(data)?;
        let mut dataset = Dataset::load(config.paths())?;
        let run = DeliveryRun::new(
            NearestNeighbourPlanner,
            DeliverySimulator::new(dataset.scenario.simulation.clone()),
        );
        let fleet = run.run(
            &dataset.scenario.assignment,
            &mut dataset.store,
            &dataset.index,
        )?;
        info!("simulated {} vehicles", fleet.len());
        Ok(Self { dataset, fleet })
    }

    fn query(&self) -> StatusQuery<'_> {
        StatusQuery::new(&self.dataset.store, &self.fleet, &self.dataset.index)
    }
}

fn resolve_data_config(data: DataArgs) -> Result<DataConfig, CliError> {
    let config = data.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn run_status(args: StatusArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let clock = DispatchClock::default();
    let at = parse_time(&args.at, &clock)?;
    let day = DeliveryDay::simulate(args.data)?;
    let query = day.query();
    match args.package {
        Some(id) => {
            let snapshot = query.package_status(PackageId::new(id), at)?;
            let report = PackageReport {
                at: format_time(&clock, at),
                package: PackageView::new(snapshot, &clock),
            };
            write_json(writer, &report)
        }
        None => write_json(writer, &StatusReport::new(query.all_statuses(at), at, &clock)),
    }
}

pub(crate) fn run_vehicle(args: VehicleArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let clock = DispatchClock::default();
    let at = parse_time(&args.at, &clock)?;
    let day = DeliveryDay::simulate(args.data)?;
    let snapshot = day.query().vehicle_status(VehicleId::new(args.id), at)?;
    write_json(writer, &VehicleReport::new(snapshot, at, &clock))
}

pub(crate) fn run_mileage(args: MileageArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let day = DeliveryDay::simulate(args.data)?;
    write_json(writer, &day.query().total_mileage()?)
}

pub(crate) fn run_distances(args: DistancesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.data.into_config()?;
    config.validate_distances()?;
    let index = load_distance_table(&config.distances, &config.depot)?;
    write_json(writer, &DistancesReport::new(&index)?)
}

fn write_json<T: Serialize>(writer: &mut dyn Write, report: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
