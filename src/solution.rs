//! Route representation and chromosome decoding.

use crate::problem::Problem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One vehicle's route. The depot is implicit at both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// The sequence of customer indices (excluding the depot)
    pub stops: Vec<usize>,
    /// The total distance of the route, depot to depot
    pub distance: f64,
}

impl Route {
    /// Create a route from a slice of customer indices, computing its distance.
    pub fn new(stops: Vec<usize>, problem: &Problem) -> Self {
        let distance = Self::calculate_distance(&stops, problem);
        Route { stops, distance }
    }

    /// Depot -> first -> ... -> last -> depot distance for a stop sequence.
    fn calculate_distance(stops: &[usize], problem: &Problem) -> f64 {
        if stops.is_empty() {
            return 0.0;
        }

        let depot = problem.depot_index;
        let mut total = problem.get_distance(depot, stops[0]);

        for i in 0..stops.len() - 1 {
            total += problem.get_distance(stops[i], stops[i + 1]);
        }

        total + problem.get_distance(stops[stops.len() - 1], depot)
    }

    /// Check if the route is empty (depot-to-depot, zero distance).
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Coordinates of the full route including the depot at both ends,
    /// ready for the plotting layer.
    pub fn waypoints(&self, problem: &Problem) -> Vec<(f64, f64)> {
        let depot = problem.depot();
        let mut points = Vec::with_capacity(self.stops.len() + 2);

        points.push((depot.x, depot.y));
        for &stop in &self.stops {
            let loc = &problem.locations[stop];
            points.push((loc.x, loc.y));
        }
        points.push((depot.x, depot.y));

        points
    }
}

/// Split a chromosome into one route per vehicle.
///
/// The permutation is cut into `num_vehicles` contiguous segments whose sizes
/// differ by at most one: the first `n mod k` vehicles take the longer
/// segments. With more vehicles than customers the trailing routes are empty,
/// which is a valid degenerate solution rather than an error.
///
/// Decoding is pure and deterministic: equal chromosomes always yield equal
/// route sets, and concatenating the stops recovers the chromosome exactly.
pub fn decode(chromosome: &[usize], problem: &Problem) -> Vec<Route> {
    let n = chromosome.len();
    let k = problem.num_vehicles;

    if k == 0 {
        return Vec::new();
    }

    let base = n / k;
    let remainder = n % k;

    let mut routes = Vec::with_capacity(k);
    let mut start = 0;

    for vehicle in 0..k {
        let len = if vehicle < remainder { base + 1 } else { base };
        let stops = chromosome[start..start + len].to_vec();
        routes.push(Route::new(stops, problem));
        start += len;
    }

    routes
}

/// A decoded solution: routes plus the chromosome they came from.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    pub routes: Vec<Route>,
    pub chromosome: Vec<usize>,
    /// The total distance over all routes
    pub total_distance: f64,
}

impl Solution {
    /// Decode a chromosome into a full solution.
    pub fn from_chromosome(chromosome: Vec<usize>, problem: &Problem) -> Self {
        let routes = decode(&chromosome, problem);
        let total_distance = routes.iter().map(|r| r.distance).sum();

        Solution {
            routes,
            chromosome,
            total_distance,
        }
    }

    /// Get the number of non-empty routes.
    pub fn active_route_count(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Total Distance: {:.2}", self.total_distance)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for (i, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  Route {}: {:?} (Distance: {:.2})",
                i, route.stops, route.distance
            )?;
        }

        Ok(())
    }
}
