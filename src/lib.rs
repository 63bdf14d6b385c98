//! # VRP-GA
//!
//! A genetic algorithm solver for the multi-vehicle routing problem.
//!
//! A candidate solution is a permutation of customer indices; vehicle
//! boundaries are derived at decode time by splitting the permutation into
//! contiguous near-equal segments. The fitness pairs total travel distance
//! with a workload-balance penalty, and tournament selection, ordered
//! crossover, and swap/inversion mutations drive the population toward
//! shorter, better-balanced route sets.
//!
//! The [`tuner`] module wraps the solver in random-search and grid-search
//! loops over the GA hyperparameters.

pub mod config;
pub mod error;
pub mod genetic;
pub mod individual;
pub mod population;
pub mod problem;
pub mod solution;
pub mod tuner;
pub mod utils;

use crate::config::GaConfig;
use crate::error::ConfigError;
use crate::individual::{Evaluator, Fitness, Individual};
use crate::population::Population;
use crate::problem::Problem;
use crate::solution::Solution;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Best and average scalarized fitness of one generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub average: f64,
}

/// The result of one GA run: the all-time best individual and the
/// per-generation convergence log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub best: Individual,
    pub best_fitness: Fitness,
    pub history: Vec<GenerationStats>,
}

impl SolveOutcome {
    /// Decode the best chromosome into routes for the given problem.
    pub fn best_solution(&self, problem: &Problem) -> Solution {
        Solution::from_chromosome(self.best.chromosome.clone(), problem)
    }
}

/// The main solver structure driving the evolutionary loop.
pub struct GaSolver {
    pub problem: Problem,
    pub config: GaConfig,
    rng: ChaCha8Rng,
}

impl GaSolver {
    /// Create a new solver, validating the configuration and fleet up front.
    pub fn new(problem: Problem, config: GaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        problem.validate()?;

        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Ok(GaSolver {
            problem,
            config,
            rng,
        })
    }

    /// Run the evolutionary loop for the configured number of generations
    /// and return the all-time best individual.
    ///
    /// The best individual is tracked across every generation seen, not just
    /// the final population, so stochastic drift cannot lose it. With
    /// elitism enabled the tracked best is monotonically non-worsening.
    pub fn solve(&mut self) -> SolveOutcome {
        let evaluator = Evaluator::new(
            &self.problem,
            self.config.balance_metric,
            self.config.objective,
            self.config.distance_weight,
            self.config.balance_weight,
        );

        // A customer-free instance has exactly one (empty) solution.
        if self.problem.customer_count() == 0 {
            let mut best = Individual::new(Vec::new());
            best.fitness = Some(Fitness::zero());
            return SolveOutcome {
                best_fitness: Fitness::zero(),
                best,
                history: Vec::new(),
            };
        }

        let mut population = Population::with_capacity(self.config.pop_size);
        population.initialize(&self.problem, self.config.pop_size, &mut self.rng);
        population.evaluate_all(&evaluator);

        let mut best = population.individuals[population.best_index(&evaluator)].clone();
        let mut history = Vec::with_capacity(self.config.ngen + 1);
        history.push(Self::stats(0, &population, &evaluator));

        for generation in 1..=self.config.ngen {
            let children =
                Self::next_generation(&self.config, &mut self.rng, &population, &evaluator);
            population.individuals = children;
            population.evaluate_all(&evaluator);

            // Elitism: the previous best replaces the worst child unchanged,
            // cached fitness and all.
            if self.config.elitism {
                let worst = population.worst_index(&evaluator);
                population.individuals[worst] = best.clone();
            }

            let gen_best_idx = population.best_index(&evaluator);
            let gen_best = &population.individuals[gen_best_idx];

            if evaluator.compare(
                gen_best.fitness.as_ref().unwrap(),
                best.fitness.as_ref().unwrap(),
            ) == std::cmp::Ordering::Less
            {
                best = gen_best.clone();
            }

            let stats = Self::stats(generation, &population, &evaluator);
            debug!(
                "generation {}: best {:.2}, average {:.2}",
                generation, stats.best, stats.average
            );
            history.push(stats);
        }

        let best_fitness = best.fitness.unwrap();
        info!(
            "solve finished: distance {:.2}, balance penalty {:.2}",
            best_fitness.total_distance, best_fitness.balance_penalty
        );

        SolveOutcome {
            best,
            best_fitness,
            history,
        }
    }

    /// Produce the next generation: selection, crossover, mutation.
    fn next_generation(
        config: &GaConfig,
        rng: &mut ChaCha8Rng,
        population: &Population,
        evaluator: &Evaluator,
    ) -> Vec<Individual> {
        // Parent pool of population size via tournament selection.
        let mut children: Vec<Individual> = (0..config.pop_size)
            .map(|_| {
                genetic::tournament_select(
                    &population.individuals,
                    config.tournament_size,
                    evaluator,
                    rng,
                )
                .clone()
            })
            .collect();

        // Crossover on adjacent pairs.
        for pair in children.chunks_exact_mut(2) {
            if rng.gen::<f64>() < config.cx_prob {
                let (child1, child2) =
                    genetic::ordered_crossover(&pair[0].chromosome, &pair[1].chromosome, rng);
                pair[0].chromosome = child1;
                pair[1].chromosome = child2;
                pair[0].invalidate_fitness();
                pair[1].invalidate_fitness();
            }
        }

        // Per-individual mutation.
        for child in &mut children {
            if rng.gen::<f64>() < config.mut_prob {
                genetic::mutate(&mut child.chromosome, rng);
                child.invalidate_fitness();
            }
        }

        children
    }

    fn stats(generation: usize, population: &Population, evaluator: &Evaluator) -> GenerationStats {
        let best_idx = population.best_index(evaluator);
        let best = evaluator.scalar(population.individuals[best_idx].fitness.as_ref().unwrap());

        GenerationStats {
            generation,
            best,
            average: population.average_scalar(evaluator),
        }
    }
}
