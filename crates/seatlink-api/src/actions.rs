// Remote vehicle actions
//
// Lock/unlock and climate pre-conditioning. All actions are fire-and-
// forget POSTs: a success response means the backend accepted the
// command, not that the vehicle has changed state. Callers re-poll to
// observe the effect.

use tracing::debug;

use crate::client::ConnectClient;
use crate::error::Error;
use crate::types::VehicleAction;

impl ConnectClient {
    /// Send a remote action to a vehicle.
    ///
    /// `POST /vehicles/{vin}/actions/{action}` — no request body, the
    /// response body is ignored. `Auth` is never retried; transient
    /// failures follow the retry policy.
    pub async fn execute_action(&self, vin: &str, action: VehicleAction) -> Result<(), Error> {
        debug!(vin, %action, "executing vehicle action");
        let _ = self
            .post(&format!("/vehicles/{vin}/actions/{}", action.endpoint()))
            .await?;
        Ok(())
    }

    /// Lock the vehicle.
    pub async fn lock_vehicle(&self, vin: &str) -> Result<(), Error> {
        self.execute_action(vin, VehicleAction::Lock).await
    }

    /// Unlock the vehicle.
    pub async fn unlock_vehicle(&self, vin: &str) -> Result<(), Error> {
        self.execute_action(vin, VehicleAction::Unlock).await
    }

    /// Start cabin pre-conditioning.
    pub async fn start_climate(&self, vin: &str) -> Result<(), Error> {
        self.execute_action(vin, VehicleAction::StartClimate).await
    }

    /// Stop cabin pre-conditioning.
    pub async fn stop_climate(&self, vin: &str) -> Result<(), Error> {
        self.execute_action(vin, VehicleAction::StopClimate).await
    }
}
