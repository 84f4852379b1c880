//! Ready-made stop record for callers without their own customer type.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::traits::{Priority, Stop};

/// A customer site to visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStop {
    pub id: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Estimated time on site in minutes.
    #[serde(default)]
    pub duration_minutes: u32,
}

impl SiteStop {
    pub fn new(id: impl Into<String>, location: impl Into<GeoPoint>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            priority: None,
            duration_minutes: 0,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }
}

impl Stop for SiteStop {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> GeoPoint {
        self.location
    }

    fn priority(&self) -> Option<Priority> {
        self.priority
    }

    fn estimated_duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}
