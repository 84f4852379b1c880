//! Check-in/check-out flow for a single stop.
//!
//! A session moves `NotCheckedIn -> CheckedIn -> NotCheckedIn`. Check-in is
//! gated by the geofence in [`crate::proximity`]; outside it, the caller must
//! show the distance and pass an explicit override. Check-out needs no
//! position and records the elapsed wall-clock time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::{LocationError, VisitError};
use crate::geo::GeoPoint;
use crate::proximity::verify;
use crate::traits::{Id, LocationProvider, Stop};

/// Who may check in outside the geofence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Allowed after the user confirms having seen the distance.
    #[default]
    AllowWithConfirmation,
    /// Never allowed.
    Deny,
}

/// The user's answer to the "check in anyway?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideDecision {
    /// No override given (first attempt, or the user declined).
    None,
    /// The user saw the failing distance and chose to proceed.
    Confirmed,
}

/// How a check-in was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckInOutcome {
    Verified { distance_m: f64 },
    Overridden { distance_m: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisitState {
    NotCheckedIn,
    CheckedIn {
        at: DateTime<Utc>,
        outcome: CheckInOutcome,
    },
}

/// A completed visit.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRecord<I> {
    pub stop_id: I,
    pub checked_in_at: DateTime<Utc>,
    pub checked_out_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub outcome: CheckInOutcome,
}

/// Check-in state for one stop in one session.
#[derive(Debug, Clone)]
pub struct VisitSession<I: Id> {
    stop_id: I,
    target: GeoPoint,
    radius_m: f64,
    override_policy: OverridePolicy,
    state: VisitState,
}

impl<I: Id> VisitSession<I> {
    pub fn new(stop_id: I, target: GeoPoint, config: &PlannerConfig) -> Self {
        Self {
            stop_id,
            target,
            radius_m: config.check_in_radius_m,
            override_policy: config.override_policy,
            state: VisitState::NotCheckedIn,
        }
    }

    pub fn for_stop<S>(stop: &S, config: &PlannerConfig) -> Self
    where
        S: Stop<Id = I>,
    {
        Self::new(stop.id().clone(), stop.location(), config)
    }

    pub fn stop_id(&self) -> &I {
        &self.stop_id
    }

    pub fn state(&self) -> VisitState {
        self.state
    }

    pub fn is_checked_in(&self) -> bool {
        matches!(self.state, VisitState::CheckedIn { .. })
    }

    /// Attempts a check-in from `position`.
    ///
    /// On any error the session stays `NotCheckedIn`.
    pub fn check_in(
        &mut self,
        position: Result<GeoPoint, LocationError>,
        at: DateTime<Utc>,
        decision: OverrideDecision,
    ) -> Result<CheckInOutcome, VisitError> {
        if self.is_checked_in() {
            return Err(VisitError::AlreadyCheckedIn);
        }

        let position = position.inspect_err(|err| {
            warn!(error = %err, "check-in location unavailable");
        })?;

        let check = verify(position, self.target, self.radius_m);
        let outcome = if check.within_range {
            CheckInOutcome::Verified {
                distance_m: check.distance_m,
            }
        } else {
            match (decision, self.override_policy) {
                (OverrideDecision::None, _) => {
                    warn!(
                        distance_m = check.distance_m,
                        threshold_m = check.threshold_m,
                        "check-in outside radius"
                    );
                    return Err(VisitError::OutOfRange {
                        distance_m: check.distance_m,
                        threshold_m: check.threshold_m,
                    });
                }
                (OverrideDecision::Confirmed, OverridePolicy::Deny) => {
                    return Err(VisitError::OverrideNotPermitted);
                }
                (OverrideDecision::Confirmed, OverridePolicy::AllowWithConfirmation) => {
                    warn!(distance_m = check.distance_m, "check-in override used");
                    CheckInOutcome::Overridden {
                        distance_m: check.distance_m,
                    }
                }
            }
        };

        info!(?outcome, "checked in");
        self.state = VisitState::CheckedIn { at, outcome };
        Ok(outcome)
    }

    /// Pulls the position from `provider` and attempts a check-in.
    pub fn check_in_with<P: LocationProvider>(
        &mut self,
        provider: &P,
        at: DateTime<Utc>,
        decision: OverrideDecision,
    ) -> Result<CheckInOutcome, VisitError> {
        self.check_in(provider.current_position(), at, decision)
    }

    /// Ends the visit. A check-out stamped before the check-in counts as zero time.
    pub fn check_out(&mut self, at: DateTime<Utc>) -> Result<VisitRecord<I>, VisitError> {
        let VisitState::CheckedIn {
            at: checked_in_at,
            outcome,
        } = self.state
        else {
            return Err(VisitError::NotCheckedIn);
        };

        let elapsed = (at - checked_in_at).max(Duration::zero());
        self.state = VisitState::NotCheckedIn;
        info!(elapsed_min = elapsed.num_minutes(), "checked out");

        Ok(VisitRecord {
            stop_id: self.stop_id.clone(),
            checked_in_at,
            checked_out_at: at,
            elapsed,
            outcome,
        })
    }
}
