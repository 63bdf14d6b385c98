//! Genetic operators: tournament selection, ordered crossover, and
//! permutation-safe mutations.

use crate::individual::{Evaluator, Individual};
use rand::seq::index::sample;
use rand::Rng;
use std::collections::HashSet;

/// Select one parent by tournament.
///
/// Samples `tournament_size` distinct individuals uniformly without
/// replacement and keeps the one with the best fitness. On an exact fitness
/// tie the first-sampled individual wins.
pub fn tournament_select<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    evaluator: &Evaluator,
    rng: &mut R,
) -> &'a Individual {
    let size = tournament_size.min(population.len());
    let contenders = sample(rng, population.len(), size);

    let mut best: Option<&Individual> = None;

    for idx in contenders.iter() {
        let candidate = &population[idx];
        best = match best {
            None => Some(candidate),
            Some(current) => {
                let a = candidate.fitness.as_ref().unwrap();
                let b = current.fitness.as_ref().unwrap();
                if evaluator.compare(a, b) == std::cmp::Ordering::Less {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        };
    }

    best.expect("tournament over empty population")
}

/// Perform ordered crossover (OX) between two parent chromosomes.
///
/// Two cut points are drawn; each child copies the slice between them from
/// one parent verbatim and fills the remaining positions with the other
/// parent's genes in their relative order, skipping genes already present.
/// Both children are valid permutations of the parents' index set for any
/// choice of cut points.
pub fn ordered_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    if parent1.is_empty() || parent2.is_empty() {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let size = parent1.len();
    let cut1 = rng.gen_range(0..size);
    let cut2 = rng.gen_range(0..size);

    let (start, end) = if cut1 <= cut2 {
        (cut1, cut2)
    } else {
        (cut2, cut1)
    };

    (
        ox_child(parent1, parent2, start, end),
        ox_child(parent2, parent1, start, end),
    )
}

/// Build one OX child: the slice donor contributes `[start, end]`, the order
/// donor fills the rest starting after the slice.
fn ox_child(slice_donor: &[usize], order_donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let size = slice_donor.len();
    let mut child = vec![0; size];
    let mut used = HashSet::with_capacity(size);

    for i in start..=end {
        child[i] = slice_donor[i];
        used.insert(slice_donor[i]);
    }

    let mut write = (end + 1) % size;
    let mut read = (end + 1) % size;

    while used.len() < size {
        if !used.contains(&order_donor[read]) {
            child[write] = order_donor[read];
            used.insert(order_donor[read]);
            write = (write + 1) % size;
        }
        read = (read + 1) % size;
    }

    debug_assert_eq!(used.len(), size);
    child
}

/// Exchange two randomly chosen positions.
pub fn swap_mutation<R: Rng>(chromosome: &mut [usize], rng: &mut R) {
    if chromosome.len() < 2 {
        return;
    }

    let i = rng.gen_range(0..chromosome.len());
    let j = rng.gen_range(0..chromosome.len());
    chromosome.swap(i, j);
}

/// Reverse a randomly chosen contiguous subsequence.
pub fn inversion_mutation<R: Rng>(chromosome: &mut [usize], rng: &mut R) {
    if chromosome.len() < 2 {
        return;
    }

    let a = rng.gen_range(0..chromosome.len());
    let b = rng.gen_range(0..chromosome.len());
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    chromosome[start..=end].reverse();
}

/// Apply one of the two mutation operators, chosen uniformly.
pub fn mutate<R: Rng>(chromosome: &mut [usize], rng: &mut R) {
    if rng.gen_bool(0.5) {
        swap_mutation(chromosome, rng);
    } else {
        inversion_mutation(chromosome, rng);
    }
}
