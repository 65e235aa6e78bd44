//! Per-vehicle status command handler.

use seatlink_core::AccountRegistry;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    registry: &AccountRegistry,
    vin: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let vehicle = registry.vehicle(vin).await?;
    output::print_vehicle(&vehicle, global.output)
}
