//! Core domain traits for the field planner.
//!
//! These are intentionally minimal. Apps implement them for their own
//! customer and device models.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::LocationError;
use crate::geo::GeoPoint;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A stop is a single visitable customer site in a route-planning session.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Site coordinates.
    fn location(&self) -> GeoPoint;

    /// Visit priority. `None` is treated as [`Priority::Medium`].
    fn priority(&self) -> Option<Priority>;

    /// Estimated time on site in minutes.
    fn estimated_duration_minutes(&self) -> u32;
}

/// Provides a distance matrix for a set of locations.
///
/// The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[GeoPoint]) -> Vec<Vec<f64>>;
}

/// Supplies the device's current position.
pub trait LocationProvider {
    fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Visit priority for priority-ordered routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Parses a label, falling back to `Medium` for anything unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl From<String> for Priority {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

/// Rank used for ordering, with missing priority treated as medium.
pub(crate) fn effective_rank(priority: Option<Priority>) -> u8 {
    priority.unwrap_or_default().rank()
}
