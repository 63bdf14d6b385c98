//! Problem definition and data structures for the multi-vehicle VRP.

use crate::error::ConfigError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// A location (customer or depot) on the plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Carried for future capacity extensions; unused by the objective.
    pub demand: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(id: usize, x: f64, y: f64, demand: f64) -> Self {
        Location { id, x, y, demand }
    }

    /// Euclidean distance to another location.
    pub fn distance(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A VRP problem instance: locations, a depot, and a fixed fleet size.
///
/// Immutable for the lifetime of all solves against it; the distance matrix
/// is computed once up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub locations: Vec<Location>,
    pub depot_index: usize,
    pub num_vehicles: usize,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Create a new problem instance.
    pub fn new(
        name: String,
        locations: Vec<Location>,
        depot_index: usize,
        num_vehicles: usize,
    ) -> Self {
        let distance_matrix = Self::compute_distance_matrix(&locations);

        Problem {
            name,
            locations,
            depot_index,
            num_vehicles,
            distance_matrix,
        }
    }

    /// Generate a random instance with uniformly placed customers.
    ///
    /// The same seed always yields the same instance.
    pub fn generate(
        name: String,
        num_customers: usize,
        x_range: (f64, f64),
        y_range: (f64, f64),
        depot: (f64, f64),
        num_vehicles: usize,
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut locations = Vec::with_capacity(num_customers + 1);

        locations.push(Location::new(0, depot.0, depot.1, 0.0));

        for id in 1..=num_customers {
            let x = rng.gen_range(x_range.0..=x_range.1);
            let y = rng.gen_range(y_range.0..=y_range.1);
            locations.push(Location::new(id, x, y, 1.0));
        }

        Problem::new(name, locations, 0, num_vehicles)
    }

    /// Look up the precomputed distance between two location indices.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Number of customers (excluding the depot).
    pub fn customer_count(&self) -> usize {
        self.locations.len().saturating_sub(1)
    }

    /// Get the depot location.
    pub fn depot(&self) -> &Location {
        &self.locations[self.depot_index]
    }

    /// Indices of all non-depot locations, in id order.
    pub fn customer_indices(&self) -> Vec<usize> {
        (0..self.locations.len())
            .filter(|&i| i != self.depot_index)
            .collect()
    }

    /// Reject instances the solver cannot work with.
    ///
    /// A depot-only instance is a valid degenerate case, but an instance
    /// with no locations at all has no depot to route from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_vehicles == 0 {
            return Err(ConfigError::InvalidVehicleCount);
        }
        if self.locations.is_empty() {
            return Err(ConfigError::MissingDepot);
        }
        Ok(())
    }

    fn compute_distance_matrix(locations: &[Location]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = locations[i].distance(&locations[j]);
                }
            }
        }

        matrix
    }

    /// Load a problem from a whitespace-separated file.
    ///
    /// Line 1: instance name. Line 2: vehicle count. Remaining lines:
    /// `id x y demand`, with demand 0 marking the depot.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);
        let mut lines = reader.lines();

        let name = match lines.next() {
            Some(line) => line?.trim().to_string(),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "missing instance name",
                ))
            }
        };

        let num_vehicles = match lines.next() {
            Some(line) => line?
                .trim()
                .parse::<usize>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "missing vehicle count",
                ))
            }
        };

        let mut locations = Vec::new();
        let mut depot_index = 0;

        for line_result in lines {
            let line = line_result?;
            let parts: Vec<&str> = line.split_whitespace().collect();

            if parts.len() >= 4 {
                let id = locations.len();
                let x = parts[1]
                    .parse::<f64>()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                let y = parts[2]
                    .parse::<f64>()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                let demand = parts[3]
                    .parse::<f64>()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

                if demand == 0.0 {
                    depot_index = id;
                }

                locations.push(Location::new(id, x, y, demand));
            }
        }

        Ok(Problem::new(name, locations, depot_index, num_vehicles))
    }
}
