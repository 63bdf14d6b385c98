//! Population management for the genetic algorithm.

use crate::individual::{Evaluator, Individual};
use crate::problem::Problem;
use rand::seq::SliceRandom;
use rand::Rng;

/// A fixed-size population of individuals.
///
/// The population is rebuilt from children every generation; individuals are
/// independent copies and never share chromosome storage.
pub struct Population {
    pub individuals: Vec<Individual>,
}

impl Population {
    /// Create an empty population with reserved capacity.
    pub fn with_capacity(size: usize) -> Self {
        Population {
            individuals: Vec::with_capacity(size),
        }
    }

    /// Fill the population with random permutations of the customer indices.
    pub fn initialize<R: Rng>(&mut self, problem: &Problem, size: usize, rng: &mut R) {
        self.individuals.clear();

        for _ in 0..size {
            let mut chromosome = problem.customer_indices();
            chromosome.shuffle(rng);
            self.individuals.push(Individual::new(chromosome));
        }
    }

    /// Evaluate every individual whose fitness cache is empty.
    pub fn evaluate_all(&mut self, evaluator: &Evaluator) {
        for individual in &mut self.individuals {
            individual.evaluate_with(evaluator);
        }
    }

    /// Index of the best individual under the evaluator's comparison.
    pub fn best_index(&self, evaluator: &Evaluator) -> usize {
        let mut best = 0;

        for i in 1..self.individuals.len() {
            let a = self.individuals[i].fitness.as_ref().unwrap();
            let b = self.individuals[best].fitness.as_ref().unwrap();
            if evaluator.compare(a, b) == std::cmp::Ordering::Less {
                best = i;
            }
        }

        best
    }

    /// Index of the worst individual under the evaluator's comparison.
    pub fn worst_index(&self, evaluator: &Evaluator) -> usize {
        let mut worst = 0;

        for i in 1..self.individuals.len() {
            let a = self.individuals[i].fitness.as_ref().unwrap();
            let b = self.individuals[worst].fitness.as_ref().unwrap();
            if evaluator.compare(a, b) == std::cmp::Ordering::Greater {
                worst = i;
            }
        }

        worst
    }

    /// Average weighted-scalar fitness across the population.
    pub fn average_scalar(&self, evaluator: &Evaluator) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }

        let sum: f64 = self
            .individuals
            .iter()
            .map(|ind| evaluator.scalar(ind.fitness.as_ref().unwrap()))
            .sum();

        sum / self.individuals.len() as f64
    }

    /// Get the population size.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }
}
