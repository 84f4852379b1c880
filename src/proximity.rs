//! Geofence check for visit check-in.

use serde::Serialize;

use crate::geo::{GeoPoint, distance_meters};

/// Default check-in radius in meters.
pub const DEFAULT_CHECK_IN_RADIUS_M: f64 = 100.0;

/// Outcome of a proximity check, with the distance for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProximityCheck {
    pub distance_m: f64,
    pub threshold_m: f64,
    pub within_range: bool,
}

/// True when `current` is within `threshold_m` meters of `target`, inclusive.
///
/// A NaN distance is never in range.
pub fn is_within_range(current: GeoPoint, target: GeoPoint, threshold_m: f64) -> bool {
    verify(current, target, threshold_m).within_range
}

/// Measures the distance to `target` and compares it against `threshold_m`.
pub fn verify(current: GeoPoint, target: GeoPoint, threshold_m: f64) -> ProximityCheck {
    let distance_m = distance_meters(current, target);
    ProximityCheck {
        distance_m,
        threshold_m,
        within_range: distance_m <= threshold_m,
    }
}
