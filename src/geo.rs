//! Great-circle distance on a spherical Earth.
//!
//! One haversine implementation parameterized by unit. Meters are used for
//! check-in geofencing, kilometers for route summaries.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::traits::DistanceMatrixProvider;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point without validation. Out-of-range values pass through.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point, rejecting non-finite or out-of-range components.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        let point = Self::new(lat, lng);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(GeoError::InvalidCoordinate { lat, lng })
        }
    }

    /// True when latitude is within ±90 and longitude within ±180.
    ///
    /// NaN fails both range checks.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Unit for distance results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Meters,
    Kilometers,
}

impl DistanceUnit {
    pub fn radius(self) -> f64 {
        match self {
            DistanceUnit::Meters => EARTH_RADIUS_M,
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

/// Haversine distance between two points in the given unit.
///
/// NaN coordinates yield NaN.
pub fn distance(a: GeoPoint, b: GeoPoint, unit: DistanceUnit) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    unit.radius() * c
}

/// Haversine distance in meters.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    distance(a, b, DistanceUnit::Meters)
}

/// Haversine distance in kilometers.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    distance(a, b, DistanceUnit::Kilometers)
}

/// Distances from `origin` to each of `points`, in input order.
pub fn distances_from(origin: GeoPoint, points: &[GeoPoint], unit: DistanceUnit) -> Vec<f64> {
    points
        .par_iter()
        .map(|point| distance(origin, *point, unit))
        .collect()
}

/// Indices of `points` ordered closest-first from `origin`.
///
/// Equal distances keep input order. NaN distances sort last.
pub fn nearest_first(origin: GeoPoint, points: &[GeoPoint], unit: DistanceUnit) -> Vec<usize> {
    let distances = distances_from(origin, points, unit);
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order
}

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone, Default)]
pub struct HaversineMatrix {
    pub unit: DistanceUnit,
}

impl HaversineMatrix {
    pub fn new(unit: DistanceUnit) -> Self {
        Self { unit }
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[GeoPoint]) -> Vec<Vec<f64>> {
        locations
            .par_iter()
            .enumerate()
            .map(|(i, from)| {
                locations
                    .iter()
                    .enumerate()
                    .map(|(j, to)| if i == j { 0.0 } else { distance(*from, *to, self.unit) })
                    .collect()
            })
            .collect()
    }
}
