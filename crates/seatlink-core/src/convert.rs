// ── Wire-to-domain normalization ──
//
// Turns one (enumeration entry, status) pair into a `Vehicle`. The
// backend is loosely typed: numbers arrive as numbers or strings,
// booleans are sometimes missing entirely. Unparseable telemetry
// degrades to "unknown" rather than failing the snapshot; only a
// missing VIN is a hard protocol error.

use std::collections::BTreeSet;

use serde_json::Value;

use seatlink_api::types::{VehicleEntry, VehicleStatus};

use crate::error::{CoreError, ErrorKind};
use crate::model::Vehicle;

/// Normalize one vehicle. Fails only on a missing/empty VIN.
pub(crate) fn vehicle_from_parts(
    entry: &VehicleEntry,
    status: &VehicleStatus,
) -> Result<Vehicle, CoreError> {
    if entry.vin.is_empty() {
        return Err(CoreError::FetchFailed {
            kind: ErrorKind::Protocol,
            message: "vehicle entry without a VIN".into(),
        });
    }

    let name = entry
        .nickname
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(entry.name.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(&entry.vin)
        .to_owned();

    Ok(Vehicle {
        vin: entry.vin.clone(),
        name,
        model: entry.model.clone().unwrap_or_else(|| "Unknown".into()),
        battery_soc: coerce_float(status.battery.state_of_charge.as_ref()),
        battery_range_km: coerce_float(status.battery.remaining_range_km.as_ref()),
        charging_power_kw: coerce_float(status.charging.power_kw.as_ref()),
        charging_state: status.charging.state.clone(),
        // Absent key means unknown; a present value is read for truthiness,
        // matching what the backend's own apps do.
        plug_connected: status.charging.plug_connected.as_ref().map(truthy),
        doors_closed: coerce_bool(status.doors.all_closed.as_ref()),
        windows_closed: coerce_bool(status.doors.windows_closed.as_ref()),
        is_locked: coerce_bool(status.locks.locked.as_ref()),
        climate_active: coerce_bool(status.climate.active.as_ref()),
        capabilities: entry.capabilities.iter().cloned().collect::<BTreeSet<_>>(),
    })
}

// ── Helpers ────────────────────────────────────────────────────────

/// Coerce a loosely typed value into a finite, non-negative float.
/// Anything else (negative, non-numeric, absent) is unknown.
fn coerce_float(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite() && *f >= 0.0)
}

/// Strict boolean read: anything that isn't a JSON bool is unknown.
fn coerce_bool(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

/// JSON truthiness: null, false, 0, empty string/array/object are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
