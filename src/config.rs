//! Configuration parameters for the genetic algorithm.

use crate::error::ConfigError;
use crate::individual::{BalanceMetric, Objective};
use serde::{Deserialize, Serialize};

/// Hyperparameters of one GA run.
///
/// Validated once when a solver is constructed and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals in the population
    pub pop_size: usize,
    /// Number of generations to run
    pub ngen: usize,
    /// Probability of applying crossover to a parent pair
    pub cx_prob: f64,
    /// Probability of mutating an individual
    pub mut_prob: f64,
    /// Number of individuals sampled per tournament
    pub tournament_size: usize,
    /// Weight of total distance in the scalarized objective
    pub distance_weight: f64,
    /// Weight of the balance penalty in the scalarized objective
    pub balance_weight: f64,
    /// How two fitness values are compared during selection
    pub objective: Objective,
    /// Dispersion statistic used for the balance penalty
    pub balance_metric: BalanceMetric,
    /// Carry the best individual unchanged into the next generation
    pub elitism: bool,
    /// Seed for the solver-local random source
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            pop_size: 300,
            ngen: 300,
            cx_prob: 0.7,
            mut_prob: 0.2,
            tournament_size: 3,
            distance_weight: 1.0,
            balance_weight: 1.0,
            objective: Objective::WeightedSum,
            balance_metric: BalanceMetric::StdDev,
            elitism: true,
            seed: 42,
        }
    }
}

impl GaConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        GaConfig::default()
    }

    /// Set the population size.
    pub fn with_pop_size(mut self, size: usize) -> Self {
        self.pop_size = size;
        self
    }

    /// Set the number of generations.
    pub fn with_ngen(mut self, ngen: usize) -> Self {
        self.ngen = ngen;
        self
    }

    /// Set the crossover probability.
    pub fn with_cx_prob(mut self, prob: f64) -> Self {
        self.cx_prob = prob;
        self
    }

    /// Set the mutation probability.
    pub fn with_mut_prob(mut self, prob: f64) -> Self {
        self.mut_prob = prob;
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the objective weights for the weighted-sum scalarization.
    pub fn with_weights(mut self, distance_weight: f64, balance_weight: f64) -> Self {
        self.distance_weight = distance_weight;
        self.balance_weight = balance_weight;
        self
    }

    /// Set the fitness comparison strategy.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Set the balance dispersion statistic.
    pub fn with_balance_metric(mut self, metric: BalanceMetric) -> Self {
        self.balance_metric = metric;
        self
    }

    /// Enable or disable elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check all parameters, failing fast before any generation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pop_size == 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        if self.ngen == 0 {
            return Err(ConfigError::InvalidGenerationCount);
        }
        if !(0.0..=1.0).contains(&self.cx_prob) {
            return Err(ConfigError::InvalidProbability {
                name: "cx_prob",
                value: self.cx_prob,
            });
        }
        if !(0.0..=1.0).contains(&self.mut_prob) {
            return Err(ConfigError::InvalidProbability {
                name: "mut_prob",
                value: self.mut_prob,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        Ok(())
    }
}
