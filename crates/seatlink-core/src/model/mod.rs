// ── Domain model ──
//
// Normalized vehicle state as consumers see it. Wire-shape quirks
// (loosely typed numbers, truthy plug flags) are resolved by
// `crate::convert` before anything lands here.

mod snapshot;
mod vehicle;

pub use snapshot::VehicleSnapshot;
pub use vehicle::Vehicle;
