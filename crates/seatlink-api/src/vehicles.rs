// Vehicle read endpoints
//
// Account-level enumeration plus per-VIN status. Both return raw wire
// types; normalization into the domain model lives in seatlink-core.

use tracing::debug;

use crate::client::ConnectClient;
use crate::error::Error;
use crate::types::{EnumerationBody, VehicleEntry, VehicleStatus};

impl ConnectClient {
    /// List the vehicles attached to this account.
    ///
    /// `GET /vehicles`
    ///
    /// Accepts both enumeration shapes — `{"vehicles": [...]}` and a
    /// bare array. Any other payload is a [`Error::Protocol`].
    pub async fn list_vehicles(&self) -> Result<Vec<VehicleEntry>, Error> {
        debug!("listing vehicles");
        let body: EnumerationBody = self.get("/vehicles").await?.into_json()?;
        Ok(body.into_vehicles())
    }

    /// Fetch the current status snapshot for one vehicle.
    ///
    /// `GET /vehicles/{vin}/status`
    pub async fn vehicle_status(&self, vin: &str) -> Result<VehicleStatus, Error> {
        debug!(vin, "fetching vehicle status");
        self.get(&format!("/vehicles/{vin}/status"))
            .await?
            .into_json()
    }
}
