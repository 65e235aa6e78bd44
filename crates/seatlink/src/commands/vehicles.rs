//! Vehicle list command handler.

use seatlink_core::AccountRegistry;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(registry: &AccountRegistry, global: &GlobalOpts) -> Result<(), CliError> {
    let vehicles = registry.all_vehicles().await;
    if vehicles.is_empty() && !global.quiet {
        eprintln!("No vehicles on this account");
        return Ok(());
    }
    output::print_vehicles(&vehicles, global.output)
}
