//! Route ordering for a day's field visits.
//!
//! Orders a selection of stops by travel distance (greedy nearest neighbor),
//! time on site, or priority. Every call works on a copy of the input and
//! is deterministic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::geo::{DistanceUnit, GeoPoint, HaversineMatrix, distance};
use crate::traits::{DistanceMatrixProvider, Stop, effective_rank};

/// How to order a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeCriterion {
    /// Nearest-neighbor chaining from the first stop.
    Distance,
    /// Shortest estimated visit first.
    Time,
    /// Highest priority first.
    Priority,
}

impl FromStr for OptimizeCriterion {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "time" => Ok(Self::Time),
            "priority" => Ok(Self::Priority),
            _ => Err(PlannerError::UnknownCriterion(s.to_string())),
        }
    }
}

impl fmt::Display for OptimizeCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Distance => "distance",
            Self::Time => "time",
            Self::Priority => "priority",
        };
        f.write_str(label)
    }
}

/// An ordered visit sequence produced by one optimization call.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<S> {
    pub criterion: OptimizeCriterion,
    pub stops: Vec<S>,
}

impl<S: Stop> Route<S> {
    pub fn summary(&self) -> RouteSummary {
        summarize(&self.stops)
    }

    pub fn stop_ids(&self) -> Vec<&S::Id> {
        self.stops.iter().map(|stop| stop.id()).collect()
    }
}

/// Totals for displaying a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub stop_count: usize,
    /// Sum of straight-line legs between consecutive stops.
    pub total_distance_km: f64,
    /// Saturates at `u32::MAX`.
    pub total_duration_minutes: u32,
}

impl RouteSummary {
    /// Total leg distance converted to `unit`.
    pub fn distance_in(&self, unit: DistanceUnit) -> f64 {
        match unit {
            DistanceUnit::Kilometers => self.total_distance_km,
            DistanceUnit::Meters => self.total_distance_km * 1000.0,
        }
    }
}

/// Computes leg distance and visit-time totals in route order.
pub fn summarize<S: Stop>(stops: &[S]) -> RouteSummary {
    let total_distance_km = stops
        .windows(2)
        .map(|leg| distance(leg[0].location(), leg[1].location(), DistanceUnit::Kilometers))
        .sum();
    let total_duration_minutes = stops
        .iter()
        .map(|stop| stop.estimated_duration_minutes())
        .fold(0u32, u32::saturating_add);

    RouteSummary {
        stop_count: stops.len(),
        total_distance_km,
        total_duration_minutes,
    }
}

/// Orders `stops` by `criterion` using haversine distances.
///
/// Returns a reordered copy; the input is left untouched. Empty and
/// single-stop inputs come back unchanged.
pub fn optimize<S>(stops: &[S], criterion: OptimizeCriterion) -> Vec<S>
where
    S: Stop + Clone,
{
    optimize_with(stops, criterion, &HaversineMatrix::default())
}

/// Like [`optimize`], with a caller-supplied matrix for the distance criterion.
pub fn optimize_with<S, M>(stops: &[S], criterion: OptimizeCriterion, matrix_provider: &M) -> Vec<S>
where
    S: Stop + Clone,
    M: DistanceMatrixProvider,
{
    if stops.len() <= 1 {
        return stops.to_vec();
    }

    let order = match criterion {
        OptimizeCriterion::Time => order_by_time(stops),
        OptimizeCriterion::Priority => order_by_priority(stops),
        OptimizeCriterion::Distance => {
            let locations: Vec<GeoPoint> = stops.iter().map(|stop| stop.location()).collect();
            let matrix = matrix_provider.matrix_for(&locations);
            if !is_square(&matrix, stops.len()) {
                warn!(
                    stops = stops.len(),
                    rows = matrix.len(),
                    "distance matrix does not match stops, keeping input order"
                );
                return stops.to_vec();
            }
            nearest_neighbor_order(&matrix)
        }
    };

    order.into_iter().map(|idx| stops[idx].clone()).collect()
}

/// Ascending by estimated duration. `sort_by_key` is stable.
fn order_by_time<S: Stop>(stops: &[S]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..stops.len()).collect();
    order.sort_by_key(|&idx| stops[idx].estimated_duration_minutes());
    order
}

/// Descending by priority rank, stable on ties.
fn order_by_priority<S: Stop>(stops: &[S]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..stops.len()).collect();
    order.sort_by_key(|&idx| std::cmp::Reverse(effective_rank(stops[idx].priority())));
    order
}

fn is_square(matrix: &[Vec<f64>], n: usize) -> bool {
    matrix.len() == n && matrix.iter().all(|row| row.len() == n)
}

/// Greedy tour over a square matrix, seeded at index 0.
///
/// Each step picks the closest remaining index; the first one in the
/// remaining pool wins ties. A NaN distance never wins.
fn nearest_neighbor_order(matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(n);
    let mut remaining: Vec<usize> = (1..n).collect();
    let mut current = 0;
    order.push(current);

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_dist = f64::INFINITY;
        for (pos, &candidate) in remaining.iter().enumerate() {
            let dist = matrix[current][candidate];
            if dist < best_dist {
                best_dist = dist;
                best_pos = pos;
            }
        }

        current = remaining.remove(best_pos);
        order.push(current);
    }

    order
}

/// Route planner bound to a distance provider.
#[derive(Debug, Clone)]
pub struct RoutePlanner<M = HaversineMatrix> {
    matrix_provider: M,
    summary_unit: DistanceUnit,
}

impl<M: Default> Default for RoutePlanner<M> {
    fn default() -> Self {
        Self {
            matrix_provider: M::default(),
            summary_unit: DistanceUnit::Kilometers,
        }
    }
}

impl<M: DistanceMatrixProvider> RoutePlanner<M> {
    pub fn new(matrix_provider: M) -> Self {
        Self {
            matrix_provider,
            summary_unit: DistanceUnit::Kilometers,
        }
    }

    /// Planner that reports route length in the configured `summary_unit`.
    pub fn from_config(matrix_provider: M, config: &PlannerConfig) -> Self {
        Self {
            matrix_provider,
            summary_unit: config.summary_unit,
        }
    }

    pub fn summary_unit(&self) -> DistanceUnit {
        self.summary_unit
    }

    /// Total leg distance of `route` in this planner's summary unit.
    pub fn route_distance<S: Stop>(&self, route: &Route<S>) -> f64 {
        route.summary().distance_in(self.summary_unit)
    }

    /// Orders the selection, rejecting an empty one.
    ///
    /// Use [`optimize_with`] directly when an empty selection is not an error.
    pub fn plan<S>(&self, stops: &[S], criterion: OptimizeCriterion) -> Result<Route<S>>
    where
        S: Stop + Clone,
    {
        if stops.is_empty() {
            return Err(PlannerError::EmptySelection);
        }

        debug!(%criterion, stops = stops.len(), "optimizing route");
        let ordered = optimize_with(stops, criterion, &self.matrix_provider);
        let route = Route {
            criterion,
            stops: ordered,
        };

        let summary = route.summary();
        debug!(
            %criterion,
            distance = summary.distance_in(self.summary_unit),
            unit = ?self.summary_unit,
            duration_min = summary.total_duration_minutes,
            "route optimized"
        );

        Ok(route)
    }
}
