//! Unit tests for the genetic operators and fitness evaluation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vrp_ga::genetic::{inversion_mutation, ordered_crossover, swap_mutation, tournament_select};
use vrp_ga::individual::{BalanceMetric, Evaluator, Fitness, Individual, Objective};
use vrp_ga::problem::{Location, Problem};

fn grid_problem(num_vehicles: usize) -> Problem {
    let mut locations = vec![Location::new(0, 0.0, 0.0, 0.0)];

    // 9 customers in a 3x3 grid
    for i in 0..3 {
        for j in 0..3 {
            let id = i * 3 + j + 1;
            let x = (i as f64 + 1.0) * 10.0;
            let y = (j as f64 + 1.0) * 10.0;
            locations.push(Location::new(id, x, y, 1.0));
        }
    }

    Problem::new("GridProblem".to_string(), locations, 0, num_vehicles)
}

fn default_evaluator(problem: &Problem) -> Evaluator<'_> {
    Evaluator::new(
        problem,
        BalanceMetric::StdDev,
        Objective::WeightedSum,
        1.0,
        1.0,
    )
}

fn assert_permutation_of(chromosome: &[usize], expected: &[usize]) {
    let mut sorted = chromosome.to_vec();
    sorted.sort_unstable();

    let mut want = expected.to_vec();
    want.sort_unstable();

    assert_eq!(sorted, want, "chromosome is not a valid permutation");
}

#[test]
fn test_ordered_crossover_preserves_permutation() {
    let parent1: Vec<usize> = (1..=9).collect();
    let parent2: Vec<usize> = (1..=9).rev().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    // Repeated draws exercise many cut point choices.
    for _ in 0..200 {
        let (child1, child2) = ordered_crossover(&parent1, &parent2, &mut rng);
        assert_permutation_of(&child1, &parent1);
        assert_permutation_of(&child2, &parent1);
    }
}

#[test]
fn test_ordered_crossover_inherits_from_both_parents() {
    let parent1: Vec<usize> = (1..=9).collect();
    let parent2: Vec<usize> = (1..=9).rev().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let (child1, _) = ordered_crossover(&parent1, &parent2, &mut rng);

    let from_p1 = child1
        .iter()
        .zip(parent1.iter())
        .filter(|&(&a, &b)| a == b)
        .count();
    let from_p2 = child1
        .iter()
        .zip(parent2.iter())
        .filter(|&(&a, &b)| a == b)
        .count();

    assert!(from_p1 > 0 || from_p2 > 0);
}

#[test]
fn test_ordered_crossover_empty_parents() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (child1, child2) = ordered_crossover(&[], &[], &mut rng);

    assert!(child1.is_empty());
    assert!(child2.is_empty());
}

#[test]
fn test_swap_mutation_preserves_permutation() {
    let original: Vec<usize> = (1..=9).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..100 {
        let mut chromosome = original.clone();
        swap_mutation(&mut chromosome, &mut rng);
        assert_permutation_of(&chromosome, &original);
    }
}

#[test]
fn test_inversion_mutation_preserves_permutation() {
    let original: Vec<usize> = (1..=9).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(13);

    for _ in 0..100 {
        let mut chromosome = original.clone();
        inversion_mutation(&mut chromosome, &mut rng);
        assert_permutation_of(&chromosome, &original);
    }
}

#[test]
fn test_mutation_on_tiny_chromosomes() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    let mut single = vec![1];
    swap_mutation(&mut single, &mut rng);
    inversion_mutation(&mut single, &mut rng);
    assert_eq!(single, vec![1]);

    let mut empty: Vec<usize> = Vec::new();
    swap_mutation(&mut empty, &mut rng);
    assert!(empty.is_empty());
}

#[test]
fn test_tournament_select_full_tournament_picks_best() {
    let problem = grid_problem(3);
    let evaluator = default_evaluator(&problem);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let mut population = Vec::new();
    for seed in 0..6u64 {
        let mut chromosome: Vec<usize> = (1..=9).collect();
        chromosome.rotate_left((seed as usize) % 9);
        let mut individual = Individual::new(chromosome);
        individual.evaluate_with(&evaluator);
        population.push(individual);
    }

    // A tournament spanning the whole population must return the global best.
    let winner = tournament_select(&population, population.len(), &evaluator, &mut rng);

    let best_scalar = population
        .iter()
        .map(|ind| evaluator.scalar(ind.fitness.as_ref().unwrap()))
        .fold(f64::INFINITY, f64::min);

    assert!(
        (evaluator.scalar(winner.fitness.as_ref().unwrap()) - best_scalar).abs() < 1e-9,
        "tournament over the full population did not return the best individual"
    );
}

#[test]
fn test_fitness_is_deterministic() {
    let problem = grid_problem(3);
    let evaluator = default_evaluator(&problem);
    let chromosome = vec![4, 7, 1, 9, 2, 5, 8, 3, 6];

    let first = evaluator.evaluate(&chromosome);
    let second = evaluator.evaluate(&chromosome);

    assert_eq!(first.total_distance, second.total_distance);
    assert_eq!(first.balance_penalty, second.balance_penalty);
}

#[test]
fn test_single_vehicle_has_zero_balance_penalty() {
    let problem = grid_problem(1);
    let evaluator = default_evaluator(&problem);

    let fitness = evaluator.evaluate(&(1..=9).collect::<Vec<usize>>());
    assert_eq!(fitness.balance_penalty, 0.0);
}

#[test]
fn test_balance_metric_stddev() {
    let metric = BalanceMetric::StdDev;

    assert_eq!(metric.dispersion(&[10.0, 10.0, 10.0]), 0.0);

    // Population std of [2, 4]: mean 3, variance 1.
    assert!((metric.dispersion(&[2.0, 4.0]) - 1.0).abs() < 1e-9);
}

#[test]
fn test_balance_metric_spread() {
    let metric = BalanceMetric::Spread;

    assert_eq!(metric.dispersion(&[10.0, 10.0, 10.0]), 0.0);
    assert!((metric.dispersion(&[3.0, 9.0, 5.0]) - 6.0).abs() < 1e-9);
}

#[test]
fn test_objective_weighted_sum_uses_weights() {
    let problem = grid_problem(3);
    let evaluator = Evaluator::new(
        &problem,
        BalanceMetric::StdDev,
        Objective::WeightedSum,
        1.0,
        0.0,
    );

    let a = Fitness {
        total_distance: 100.0,
        balance_penalty: 50.0,
    };
    let b = Fitness {
        total_distance: 110.0,
        balance_penalty: 0.0,
    };

    // With a zero balance weight only distance matters.
    assert_eq!(evaluator.compare(&a, &b), std::cmp::Ordering::Less);
}

#[test]
fn test_objective_lexicographic_tie_break() {
    let problem = grid_problem(3);
    let evaluator = Evaluator::new(
        &problem,
        BalanceMetric::StdDev,
        Objective::Lexicographic,
        1.0,
        1.0,
    );

    let a = Fitness {
        total_distance: 100.0,
        balance_penalty: 5.0,
    };
    let b = Fitness {
        total_distance: 100.0,
        balance_penalty: 8.0,
    };

    assert_eq!(evaluator.compare(&a, &b), std::cmp::Ordering::Less);
}

#[test]
fn test_individual_fitness_cache_invalidation() {
    let problem = grid_problem(3);
    let evaluator = default_evaluator(&problem);

    let mut individual = Individual::new((1..=9).collect());
    individual.evaluate_with(&evaluator);
    assert!(individual.fitness.is_some());

    individual.invalidate_fitness();
    assert!(individual.fitness.is_none());
}

#[test]
fn test_individual_is_valid_permutation() {
    let problem = grid_problem(3);
    let customers = problem.customer_indices();

    let valid = Individual::new(vec![9, 1, 5, 3, 7, 2, 8, 4, 6]);
    assert!(valid.is_valid_permutation(&customers));

    let duplicated = Individual::new(vec![1, 1, 5, 3, 7, 2, 8, 4, 6]);
    assert!(!duplicated.is_valid_permutation(&customers));

    let short = Individual::new(vec![1, 2, 3]);
    assert!(!short.is_valid_permutation(&customers));
}
