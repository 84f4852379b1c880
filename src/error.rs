//! Error types for the field planner.

use thiserror::Error;

/// Result type alias for planner operations.
pub type Result<T, E = PlannerError> = std::result::Result<T, E>;

/// Errors produced while constructing coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude/longitude outside ±90/±180, or not a finite number.
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// Errors produced by route planning and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("unknown optimization criterion: {0:?}")]
    UnknownCriterion(String),

    /// The caller asked to plan a route with no stops selected.
    #[error("no stops selected for route planning")]
    EmptySelection,

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Reasons the location collaborator could not produce a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("timed out waiting for a location fix")]
    Timeout,
}

/// Errors from the visit check-in/check-out flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VisitError {
    /// Position could not be obtained. Never equivalent to "in range".
    #[error("cannot verify check-in: {0}")]
    LocationUnavailable(#[from] LocationError),

    /// Outside the geofence and no override was given.
    #[error("{distance_m:.0} m from the site, check-in radius is {threshold_m:.0} m")]
    OutOfRange { distance_m: f64, threshold_m: f64 },

    #[error("check-in override is not permitted")]
    OverrideNotPermitted,

    #[error("already checked in")]
    AlreadyCheckedIn,

    #[error("not checked in")]
    NotCheckedIn,
}
