//! Hyperparameter search over GA configurations.
//!
//! Both searches run one independent GA per candidate configuration, with
//! trial `i` seeded as `seed_base + i` so results are reproducible and no
//! state leaks between trials.

use crate::config::GaConfig;
use crate::problem::Problem;
use crate::{GaSolver, SolveOutcome};

use itertools::iproduct;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Inclusive sampling ranges for random search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamRanges {
    pub pop_size: (usize, usize),
    pub cx_prob: (f64, f64),
    pub mut_prob: (f64, f64),
    pub tournament_size: (usize, usize),
}

impl Default for ParamRanges {
    fn default() -> Self {
        ParamRanges {
            pop_size: (200, 800),
            cx_prob: (0.5, 0.9),
            mut_prob: (0.05, 0.25),
            tournament_size: (2, 4),
        }
    }
}

/// Discrete values per parameter for grid search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamGrid {
    pub pop_size: Vec<usize>,
    pub cx_prob: Vec<f64>,
    pub mut_prob: Vec<f64>,
    pub tournament_size: Vec<usize>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        ParamGrid {
            pop_size: vec![200, 400, 600],
            cx_prob: vec![0.6, 0.8],
            mut_prob: vec![0.1, 0.2],
            tournament_size: vec![2, 3, 4],
        }
    }
}

/// One tuning trial: the configuration tried and what came of it.
///
/// A rejected configuration is kept with its error message instead of
/// aborting the whole search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub config: GaConfig,
    pub outcome: Option<SolveOutcome>,
    pub error: Option<String>,
}

impl TrialRecord {
    /// Weighted-scalar score of this trial's best individual, if it ran.
    pub fn score(&self) -> Option<f64> {
        self.outcome.as_ref().map(|o| {
            o.best_fitness
                .scalar(self.config.distance_weight, self.config.balance_weight)
        })
    }
}

/// All trials of one tuning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningResult {
    pub trials: Vec<TrialRecord>,
}

impl TuningResult {
    /// The trial with the best (lowest) score, skipping failed trials.
    pub fn best(&self) -> Option<&TrialRecord> {
        self.trials
            .iter()
            .filter(|t| t.score().is_some())
            .min_by(|a, b| {
                a.score()
                    .partial_cmp(&b.score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Number of trials that ran to completion.
    pub fn completed_count(&self) -> usize {
        self.trials.iter().filter(|t| t.outcome.is_some()).count()
    }
}

/// Runs repeated GA solves over one problem instance with varying
/// hyperparameters.
pub struct Tuner<'a> {
    problem: &'a Problem,
    /// Parameters not under search (weights, objective, elitism) come from here.
    base: GaConfig,
}

impl<'a> Tuner<'a> {
    /// Create a tuner for a problem, taking non-searched parameters from
    /// the base configuration.
    pub fn new(problem: &'a Problem, base: GaConfig) -> Self {
        Tuner { problem, base }
    }

    /// Sample `n_trials` configurations uniformly from the given ranges and
    /// run each for `ngen` generations.
    pub fn random_search(
        &self,
        ranges: &ParamRanges,
        n_trials: usize,
        ngen: usize,
        seed_base: u64,
    ) -> TuningResult {
        let mut rng = ChaCha8Rng::seed_from_u64(seed_base);
        let mut trials = Vec::with_capacity(n_trials);

        info!("random search: {} trials, {} generations each", n_trials, ngen);

        for trial in 0..n_trials {
            let config = self
                .base
                .clone()
                .with_pop_size(rng.gen_range(ranges.pop_size.0..=ranges.pop_size.1))
                .with_cx_prob(rng.gen_range(ranges.cx_prob.0..=ranges.cx_prob.1))
                .with_mut_prob(rng.gen_range(ranges.mut_prob.0..=ranges.mut_prob.1))
                .with_tournament_size(
                    rng.gen_range(ranges.tournament_size.0..=ranges.tournament_size.1),
                )
                .with_ngen(ngen)
                .with_seed(seed_base + trial as u64);

            trials.push(self.run_trial(trial, config));
        }

        TuningResult { trials }
    }

    /// Run one GA per point of the full Cartesian product of the grid.
    pub fn grid_search(&self, grid: &ParamGrid, ngen: usize, seed_base: u64) -> TuningResult {
        let combinations = iproduct!(
            &grid.pop_size,
            &grid.cx_prob,
            &grid.mut_prob,
            &grid.tournament_size
        );

        let mut trials = Vec::new();

        for (trial, (&pop_size, &cx_prob, &mut_prob, &tournament_size)) in
            combinations.enumerate()
        {
            let config = self
                .base
                .clone()
                .with_pop_size(pop_size)
                .with_cx_prob(cx_prob)
                .with_mut_prob(mut_prob)
                .with_tournament_size(tournament_size)
                .with_ngen(ngen)
                .with_seed(seed_base + trial as u64);

            trials.push(self.run_trial(trial, config));
        }

        info!("grid search: {} combinations evaluated", trials.len());

        TuningResult { trials }
    }

    fn run_trial(&self, trial: usize, config: GaConfig) -> TrialRecord {
        match GaSolver::new(self.problem.clone(), config.clone()) {
            Ok(mut solver) => {
                let outcome = solver.solve();
                info!(
                    "trial {}: distance {:.1}, balance {:.1}",
                    trial + 1,
                    outcome.best_fitness.total_distance,
                    outcome.best_fitness.balance_penalty
                );

                TrialRecord {
                    trial,
                    config,
                    outcome: Some(outcome),
                    error: None,
                }
            }
            Err(err) => {
                warn!("trial {} skipped: {}", trial + 1, err);

                TrialRecord {
                    trial,
                    config,
                    outcome: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
