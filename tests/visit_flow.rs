//! End-to-end check-in flow: plan a route, then visit each stop.

mod fixtures;

use std::cell::Cell;

use chrono::{DateTime, Duration, TimeZone, Utc};

use field_planner::config::PlannerConfig;
use field_planner::error::{LocationError, VisitError};
use field_planner::geo::GeoPoint;
use field_planner::optimizer::{OptimizeCriterion, optimize};
use field_planner::proximity::{DEFAULT_CHECK_IN_RADIUS_M, is_within_range, verify};
use field_planner::traits::LocationProvider;
use field_planner::visit::{CheckInOutcome, OverrideDecision, VisitSession, VisitState};

use fixtures::{OUTLYING_ACCOUNTS, STRIP_ACCOUNTS, daily_selection};

/// Device that reports a fixed position, or fails.
struct FixedLocation(Result<GeoPoint, LocationError>);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.0.clone()
    }
}

/// Device that counts how often it was asked.
struct CountingLocation {
    position: GeoPoint,
    calls: Cell<usize>,
}

impl LocationProvider for CountingLocation {
    fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.position)
    }
}

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 8, 30, 0).unwrap()
}

#[test]
fn test_full_day_on_site() {
    let config = PlannerConfig::default();
    let route = optimize(&daily_selection(), OptimizeCriterion::Distance);

    let mut clock = morning();
    let mut total = Duration::zero();
    for stop in &route {
        let mut visit = VisitSession::for_stop(stop, &config);
        let device = CountingLocation {
            position: stop.location,
            calls: Cell::new(0),
        };

        let outcome = visit
            .check_in_with(&device, clock, OverrideDecision::None)
            .unwrap();
        assert!(matches!(outcome, CheckInOutcome::Verified { .. }));
        assert_eq!(device.calls.get(), 1);

        clock += Duration::minutes(i64::from(stop.duration_minutes));
        let record = visit.check_out(clock).unwrap();
        assert_eq!(&record.stop_id, &stop.id);
        total += record.elapsed;
    }

    let planned: u32 = route.iter().map(|stop| stop.duration_minutes).sum();
    assert_eq!(total, Duration::minutes(i64::from(planned)));
}

#[test]
fn test_next_account_is_too_far() {
    let config = PlannerConfig::default();
    let wynn = STRIP_ACCOUNTS[0];
    let grand_lux = STRIP_ACCOUNTS[1];

    let mut visit = VisitSession::new(wynn.name, wynn.point(), &config);
    let err = visit
        .check_in(Ok(grand_lux.point()), morning(), OverrideDecision::None)
        .unwrap_err();

    let VisitError::OutOfRange { distance_m, threshold_m } = err else {
        panic!("expected OutOfRange, got {:?}", err);
    };
    assert_eq!(threshold_m, DEFAULT_CHECK_IN_RADIUS_M);
    let shown = verify(grand_lux.point(), wynn.point(), threshold_m);
    assert_eq!(distance_m, shown.distance_m);
    assert_eq!(visit.state(), VisitState::NotCheckedIn);
}

#[test]
fn test_override_after_seeing_distance() {
    let config = PlannerConfig::default();
    let site = OUTLYING_ACCOUNTS[1];
    let parking_lot = GeoPoint::new(site.lat + 0.002, site.lng);

    let mut visit = VisitSession::new(site.name, site.point(), &config);
    assert!(visit.check_in(Ok(parking_lot), morning(), OverrideDecision::None).is_err());

    let outcome = visit
        .check_in(Ok(parking_lot), morning(), OverrideDecision::Confirmed)
        .unwrap();
    let CheckInOutcome::Overridden { distance_m } = outcome else {
        panic!("expected override, got {:?}", outcome);
    };
    assert!(distance_m > 200.0 && distance_m < 250.0, "got {}", distance_m);

    let record = visit.check_out(morning() + Duration::minutes(20)).unwrap();
    assert_eq!(record.outcome, outcome);
}

#[test]
fn test_location_failures_are_distinct_from_distance() {
    let config = PlannerConfig::default();
    let site = STRIP_ACCOUNTS[3];

    for failure in [
        LocationError::PermissionDenied,
        LocationError::Timeout,
        LocationError::Unavailable("gps off".to_string()),
    ] {
        let mut visit = VisitSession::new(site.name, site.point(), &config);
        let device = FixedLocation(Err(failure.clone()));
        let err = visit
            .check_in_with(&device, morning(), OverrideDecision::Confirmed)
            .unwrap_err();
        assert_eq!(err, VisitError::LocationUnavailable(failure));
        assert!(!visit.is_checked_in());
    }
}

#[test]
fn test_wider_radius_from_config() {
    let config = PlannerConfig::from_toml_str("check_in_radius_m = 500.0").unwrap();
    let site = OUTLYING_ACCOUNTS[1];
    let parking_lot = GeoPoint::new(site.lat + 0.002, site.lng);

    assert!(!is_within_range(parking_lot, site.point(), DEFAULT_CHECK_IN_RADIUS_M));

    let mut visit = VisitSession::new(site.name, site.point(), &config);
    let outcome = visit
        .check_in(Ok(parking_lot), morning(), OverrideDecision::None)
        .unwrap();
    assert!(matches!(outcome, CheckInOutcome::Verified { .. }));
}

#[test]
fn test_revisit_after_checkout() {
    let config = PlannerConfig::default();
    let site = STRIP_ACCOUNTS[2];
    let mut visit = VisitSession::new(site.name, site.point(), &config);

    visit.check_in(Ok(site.point()), morning(), OverrideDecision::None).unwrap();
    visit.check_out(morning() + Duration::minutes(10)).unwrap();
    assert!(visit.check_out(morning() + Duration::minutes(11)).is_err());

    visit
        .check_in(Ok(site.point()), morning() + Duration::hours(2), OverrideDecision::None)
        .unwrap();
    assert!(visit.is_checked_in());
}
