use std::collections::BTreeSet;

use serde::Serialize;

/// Normalized state of one vehicle within an account.
///
/// Tri-state fields are `Option<bool>`: the backend distinguishes
/// "reported false" from "never reported", and so do we — hosts map
/// `None` to an "unavailable" presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    /// Vehicle Identification Number. Non-empty, stable across refreshes.
    pub vin: String,
    /// Display name: nickname, falling back to factory name, then VIN.
    pub name: String,
    /// Model designation, `"Unknown"` when the backend omits it.
    pub model: String,

    /// State of charge, percent. Absent when the vehicle never reported it.
    pub battery_soc: Option<f64>,
    /// Remaining range in kilometres.
    pub battery_range_km: Option<f64>,
    /// Current charging power in kW.
    pub charging_power_kw: Option<f64>,
    /// Backend charging state string, passed through verbatim.
    pub charging_state: Option<String>,

    pub plug_connected: Option<bool>,
    pub doors_closed: Option<bool>,
    pub windows_closed: Option<bool>,
    pub is_locked: Option<bool>,
    pub climate_active: Option<bool>,

    /// Uppercase capability tags as reported by the enumeration entry.
    pub capabilities: BTreeSet<String>,
}

impl Vehicle {
    /// Whether this vehicle supports climate pre-conditioning.
    ///
    /// True when the `CLIMATE` capability is advertised (case-insensitive)
    /// or the vehicle has ever reported a climate state.
    pub fn supports_climate(&self) -> bool {
        self.climate_active.is_some()
            || self
                .capabilities
                .iter()
                .any(|cap| cap.eq_ignore_ascii_case("CLIMATE"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(vin: &str) -> Vehicle {
        Vehicle {
            vin: vin.into(),
            name: vin.into(),
            model: "Unknown".into(),
            battery_soc: None,
            battery_range_km: None,
            charging_power_kw: None,
            charging_state: None,
            plug_connected: None,
            doors_closed: None,
            windows_closed: None,
            is_locked: None,
            climate_active: None,
            capabilities: BTreeSet::new(),
        }
    }

    #[test]
    fn climate_support_from_capability_tag() {
        let mut vehicle = bare("V1");
        vehicle.capabilities.insert("climate".into());
        assert!(vehicle.supports_climate());
    }

    #[test]
    fn climate_support_from_reported_state() {
        let mut vehicle = bare("V1");
        vehicle.climate_active = Some(false);
        assert!(vehicle.supports_climate());
    }

    #[test]
    fn no_climate_support_by_default() {
        assert!(!bare("V1").supports_climate());
    }
}
