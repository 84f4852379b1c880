//! field-planner core
//!
//! Route ordering and geofenced check-in for field-sales visits.

pub mod traits;
pub mod error;
pub mod config;
pub mod geo;
pub mod stop;
pub mod optimizer;
pub mod proximity;
pub mod visit;

pub use error::{GeoError, LocationError, PlannerError, Result, VisitError};
pub use geo::{DistanceUnit, GeoPoint, distance, distance_km, distance_meters};
pub use optimizer::{OptimizeCriterion, Route, RoutePlanner, RouteSummary, optimize, optimize_with};
pub use proximity::{DEFAULT_CHECK_IN_RADIUS_M, is_within_range};
