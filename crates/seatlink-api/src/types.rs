// Wire types for the SEAT Connect backend.
//
// Status leaf values are kept as `serde_json::Value` where the backend
// is loosely typed (numbers arrive as numbers or strings, booleans as
// whatever the upstream vehicle gateway emitted that day). Coercion into
// the domain model happens in `seatlink-core`.

use serde::Deserialize;

/// One element of the `/vehicles` enumeration.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleEntry {
    #[serde(default)]
    pub vin: String,
    pub nickname: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// The enumerate endpoint returns either `{"vehicles": [...]}` or a bare
/// array. Both shapes have been observed in the wild; anything else is a
/// protocol error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnumerationBody {
    Wrapped { vehicles: Vec<VehicleEntry> },
    Bare(Vec<VehicleEntry>),
}

impl EnumerationBody {
    pub(crate) fn into_vehicles(self) -> Vec<VehicleEntry> {
        match self {
            Self::Wrapped { vehicles } | Self::Bare(vehicles) => vehicles,
        }
    }
}

/// Response of `GET /vehicles/{vin}/status`.
///
/// Every section is optional — a vehicle that has never reported a
/// subsystem simply omits it, which the domain layer maps to "unknown".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleStatus {
    #[serde(default)]
    pub battery: BatterySection,
    #[serde(default)]
    pub charging: ChargingSection,
    #[serde(default)]
    pub doors: DoorsSection,
    #[serde(default)]
    pub locks: LocksSection,
    #[serde(default)]
    pub climate: ClimateSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySection {
    pub state_of_charge: Option<serde_json::Value>,
    pub remaining_range_km: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSection {
    pub power_kw: Option<serde_json::Value>,
    pub state: Option<String>,
    pub plug_connected: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorsSection {
    pub all_closed: Option<serde_json::Value>,
    pub windows_closed: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocksSection {
    pub locked: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClimateSection {
    pub active: Option<serde_json::Value>,
}

/// Remote actions a consumer can send to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAction {
    Lock,
    Unlock,
    StartClimate,
    StopClimate,
}

impl VehicleAction {
    /// The action's path segment under `/vehicles/{vin}/actions/`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::StartClimate => "start_climate",
            Self::StopClimate => "stop_climate",
        }
    }
}

impl std::fmt::Display for VehicleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}
