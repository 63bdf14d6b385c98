//! Individuals, fitness evaluation, and fitness comparison strategies.

use crate::problem::Problem;
use crate::solution::decode;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Multi-objective fitness of a chromosome. Lower is better for both parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    /// Sum of all route distances
    pub total_distance: f64,
    /// Dispersion of per-route distances across the fleet
    pub balance_penalty: f64,
}

impl Fitness {
    /// Fold both objectives into a single weighted score.
    pub fn scalar(&self, distance_weight: f64, balance_weight: f64) -> f64 {
        distance_weight * self.total_distance + balance_weight * self.balance_penalty
    }

    /// Zero fitness for degenerate (customer-free) instances.
    pub fn zero() -> Self {
        Fitness {
            total_distance: 0.0,
            balance_penalty: 0.0,
        }
    }
}

/// Dispersion statistic used for the balance penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceMetric {
    /// Population standard deviation of per-route distances
    StdDev,
    /// Max minus min per-route distance
    Spread,
}

impl BalanceMetric {
    /// Compute the dispersion over a list of per-route distances.
    pub fn dispersion(&self, route_distances: &[f64]) -> f64 {
        if route_distances.is_empty() {
            return 0.0;
        }

        match self {
            BalanceMetric::StdDev => {
                let n = route_distances.len() as f64;
                let mean = route_distances.iter().sum::<f64>() / n;
                let variance = route_distances
                    .iter()
                    .map(|d| (d - mean) * (d - mean))
                    .sum::<f64>()
                    / n;
                variance.sqrt()
            }
            BalanceMetric::Spread => {
                let max = route_distances.iter().cloned().fold(f64::MIN, f64::max);
                let min = route_distances.iter().cloned().fold(f64::MAX, f64::min);
                max - min
            }
        }
    }
}

/// Strategy for comparing two fitness values during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Compare by `distance_weight * distance + balance_weight * penalty`
    WeightedSum,
    /// Compare by total distance first, balance penalty as tie-break
    Lexicographic,
}

/// Evaluates chromosomes against one problem instance.
///
/// Evaluation is a pure function of the chromosome and the fixed location
/// set: decoding, route distances, and the dispersion statistic involve no
/// randomness and never mutate the inputs.
pub struct Evaluator<'a> {
    problem: &'a Problem,
    balance_metric: BalanceMetric,
    objective: Objective,
    distance_weight: f64,
    balance_weight: f64,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator for a problem with the given comparison strategy.
    pub fn new(
        problem: &'a Problem,
        balance_metric: BalanceMetric,
        objective: Objective,
        distance_weight: f64,
        balance_weight: f64,
    ) -> Self {
        Evaluator {
            problem,
            balance_metric,
            objective,
            distance_weight,
            balance_weight,
        }
    }

    /// Compute the fitness of a chromosome.
    pub fn evaluate(&self, chromosome: &[usize]) -> Fitness {
        if chromosome.is_empty() {
            return Fitness::zero();
        }

        let routes = decode(chromosome, self.problem);
        let route_distances: Vec<f64> = routes.iter().map(|r| r.distance).collect();

        Fitness {
            total_distance: route_distances.iter().sum(),
            balance_penalty: self.balance_metric.dispersion(&route_distances),
        }
    }

    /// Scalarize a fitness with the configured weights.
    pub fn scalar(&self, fitness: &Fitness) -> f64 {
        fitness.scalar(self.distance_weight, self.balance_weight)
    }

    /// Compare two fitness values under the configured strategy.
    pub fn compare(&self, a: &Fitness, b: &Fitness) -> Ordering {
        match self.objective {
            Objective::WeightedSum => self
                .scalar(a)
                .partial_cmp(&self.scalar(b))
                .unwrap_or(Ordering::Equal),
            Objective::Lexicographic => a
                .total_distance
                .partial_cmp(&b.total_distance)
                .unwrap_or(Ordering::Equal)
                .then(
                    a.balance_penalty
                        .partial_cmp(&b.balance_penalty)
                        .unwrap_or(Ordering::Equal),
                ),
        }
    }
}

/// An individual in the genetic algorithm population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    /// Permutation of all customer indices
    pub chromosome: Vec<usize>,
    /// Cached fitness; cleared whenever the genes change
    pub fitness: Option<Fitness>,
}

impl Individual {
    /// Create a new, unevaluated individual.
    pub fn new(chromosome: Vec<usize>) -> Self {
        Individual {
            chromosome,
            fitness: None,
        }
    }

    /// Ensure the fitness cache is filled, evaluating if necessary.
    pub fn evaluate_with(&mut self, evaluator: &Evaluator) {
        if self.fitness.is_none() {
            self.fitness = Some(evaluator.evaluate(&self.chromosome));
        }
    }

    /// Drop the cached fitness after a genetic operation changed the genes.
    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Check whether the chromosome is a valid permutation of 1..=n
    /// customer indices with the depot at index 0.
    pub fn is_valid_permutation(&self, customer_indices: &[usize]) -> bool {
        if self.chromosome.len() != customer_indices.len() {
            return false;
        }

        let mut sorted = self.chromosome.clone();
        sorted.sort_unstable();

        let mut expected = customer_indices.to_vec();
        expected.sort_unstable();

        sorted == expected
    }
}
