//! Remote command handlers: lock, unlock, climatization.
//!
//! Each handler dispatches through the registry (which refreshes the
//! owning account afterwards) and then prints the vehicle's new state.

use seatlink_core::AccountRegistry;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn lock(registry: &AccountRegistry, vin: &str, global: &GlobalOpts) -> Result<(), CliError> {
    registry.lock_vehicle(vin).await?;
    report(registry, vin, "Lock command sent", global).await
}

pub async fn unlock(
    registry: &AccountRegistry,
    vin: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    registry.unlock_vehicle(vin).await?;
    report(registry, vin, "Unlock command sent", global).await
}

pub async fn climate_start(
    registry: &AccountRegistry,
    vin: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    registry.start_climate(vin).await?;
    report(registry, vin, "Climatization start command sent", global).await
}

pub async fn climate_stop(
    registry: &AccountRegistry,
    vin: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    registry.stop_climate(vin).await?;
    report(registry, vin, "Climatization stop command sent", global).await
}

async fn report(
    registry: &AccountRegistry,
    vin: &str,
    message: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !global.quiet {
        eprintln!("{message}");
    }
    // The post-command refresh already ran (or was logged as failed);
    // show whatever state is published now.
    let vehicle = registry.vehicle(vin).await?;
    output::print_vehicle(&vehicle, global.output)
}
