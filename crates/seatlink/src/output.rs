//! Output rendering: tables for humans, JSON for scripts.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use seatlink_core::Vehicle;

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "VIN")]
    vin: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "BATTERY")]
    battery: String,
    #[tabled(rename = "RANGE")]
    range: String,
    #[tabled(rename = "LOCKED")]
    locked: String,
    #[tabled(rename = "CLIMATE")]
    climate: String,
}

impl From<&Vehicle> for VehicleRow {
    fn from(v: &Vehicle) -> Self {
        Self {
            vin: v.vin.clone(),
            name: v.name.clone(),
            model: v.model.clone(),
            battery: percent(v.battery_soc),
            range: km(v.battery_range_km),
            locked: tristate(v.is_locked),
            climate: tristate(v.climate_active),
        }
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "—".into(), |v| format!("{v:.0}%"))
}

fn km(value: Option<f64>) -> String {
    value.map_or_else(|| "—".into(), |v| format!("{v:.0} km"))
}

fn tristate(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".into(),
        Some(false) => "no".into(),
        None => "—".into(),
    }
}

/// Render a vehicle list in the requested format.
pub fn print_vehicles(vehicles: &[Vehicle], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(vehicles)?);
        }
        OutputFormat::Table => {
            let rows: Vec<VehicleRow> = vehicles.iter().map(Into::into).collect();
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{table}");
        }
    }
    Ok(())
}

/// Render one vehicle in the requested format.
pub fn print_vehicle(vehicle: &Vehicle, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(vehicle)?);
        }
        OutputFormat::Table => {
            println!("{}", vehicle.name.bold());
            println!("  VIN:            {}", vehicle.vin);
            println!("  Model:          {}", vehicle.model);
            println!("  Battery:        {}", percent(vehicle.battery_soc));
            println!("  Range:          {}", km(vehicle.battery_range_km));
            println!(
                "  Charging:       {}",
                vehicle.charging_state.as_deref().unwrap_or("—")
            );
            println!(
                "  Charging power: {}",
                vehicle
                    .charging_power_kw
                    .map_or_else(|| "—".into(), |v| format!("{v:.1} kW"))
            );
            println!("  Plug connected: {}", tristate(vehicle.plug_connected));
            println!("  Doors closed:   {}", tristate(vehicle.doors_closed));
            println!("  Windows closed: {}", tristate(vehicle.windows_closed));
            println!("  Locked:         {}", tristate(vehicle.is_locked));
            println!("  Climate:        {}", tristate(vehicle.climate_active));
        }
    }
    Ok(())
}

/// Banner line for `watch` output; colored stale marker on failures.
pub fn cycle_header(timestamp: &str, stale: bool) -> String {
    if stale {
        format!("{timestamp} {}", "(stale — last refresh failed)".yellow())
    } else {
        timestamp.to_string()
    }
}
