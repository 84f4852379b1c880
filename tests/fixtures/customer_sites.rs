//! Customer sites for a Las Vegas sales territory.
//!
//! Coordinates sourced from OpenStreetMap.

use field_planner::GeoPoint;
use field_planner::stop::SiteStop;
use field_planner::traits::Priority;

/// A named account location.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Site {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn stop(&self) -> SiteStop {
        SiteStop::new(self.name, self.point())
    }
}

// ============================================================================
// Strip accounts (dense, a few hundred meters apart)
// ============================================================================

pub const STRIP_ACCOUNTS: &[Site] = &[
    Site::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Site::new("Grand Lux Cafe", 36.1216416, -115.1685024),
    Site::new("Yard House", 36.1177147, -115.1691992),
    Site::new("Bellagio", 36.1126, -115.1767),
    Site::new("P.F. Chang's", 36.1103352, -115.1723830),
    Site::new("MGM Grand", 36.1023654, -115.1688720),
];

// ============================================================================
// Outlying accounts (several kilometers apart)
// ============================================================================

pub const OUTLYING_ACCOUNTS: &[Site] = &[
    Site::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Site::new("Longhorn Casino", 36.1070664, -115.0591256),
    Site::new("Sunset Station Area", 36.0614, -115.0631),
    Site::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Site::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Site::new("Bootlegger Bistro", 36.0492047, -115.1715744),
];

/// A day's selection mixing both territories, with priorities and visit lengths.
pub fn daily_selection() -> Vec<SiteStop> {
    let plan = [
        (OUTLYING_ACCOUNTS[4], Some(Priority::Low), 20),
        (STRIP_ACCOUNTS[0], Some(Priority::High), 45),
        (OUTLYING_ACCOUNTS[0], None, 30),
        (STRIP_ACCOUNTS[3], Some(Priority::Medium), 60),
        (OUTLYING_ACCOUNTS[2], Some(Priority::High), 15),
        (STRIP_ACCOUNTS[5], Some(Priority::Low), 30),
    ];

    plan.into_iter()
        .map(|(site, priority, minutes)| {
            let mut stop = site.stop().with_duration(minutes);
            stop.priority = priority;
            stop
        })
        .collect()
}
