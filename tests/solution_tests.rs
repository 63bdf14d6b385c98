//! Unit tests for chromosome decoding and route representation.

use vrp_ga::problem::{Location, Problem};
use vrp_ga::solution::{decode, Solution};

/// Creates a problem with the depot at the origin and `n` customers on a line.
fn line_problem(n: usize, num_vehicles: usize) -> Problem {
    let mut locations = vec![Location::new(0, 0.0, 0.0, 0.0)];

    for i in 1..=n {
        locations.push(Location::new(i, i as f64 * 10.0, 0.0, 1.0));
    }

    Problem::new("LineProblem".to_string(), locations, 0, num_vehicles)
}

#[test]
fn test_decode_round_trip() {
    let problem = line_problem(10, 3);
    let chromosome = vec![3, 1, 4, 2, 10, 9, 5, 7, 6, 8];

    let routes = decode(&chromosome, &problem);

    // Concatenated stops must recover the chromosome exactly.
    let recovered: Vec<usize> = routes.iter().flat_map(|r| r.stops.clone()).collect();
    assert_eq!(recovered, chromosome);
}

#[test]
fn test_decode_segment_sizes_differ_by_at_most_one() {
    let problem = line_problem(10, 3);
    let chromosome: Vec<usize> = (1..=10).collect();

    let routes = decode(&chromosome, &problem);

    // 10 customers over 3 vehicles: the first gets 4 stops, the rest 3.
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0].stops.len(), 4);
    assert_eq!(routes[1].stops.len(), 3);
    assert_eq!(routes[2].stops.len(), 3);
}

#[test]
fn test_decode_even_split() {
    let problem = line_problem(9, 3);
    let chromosome: Vec<usize> = (1..=9).collect();

    let routes = decode(&chromosome, &problem);

    assert_eq!(routes.len(), 3);
    for route in &routes {
        assert_eq!(route.stops.len(), 3);
    }
}

#[test]
fn test_decode_more_vehicles_than_customers() {
    let problem = line_problem(2, 5);
    let chromosome = vec![2, 1];

    let routes = decode(&chromosome, &problem);

    // Trailing vehicles get empty depot-to-depot routes, not an error.
    assert_eq!(routes.len(), 5);
    assert_eq!(routes[0].stops, vec![2]);
    assert_eq!(routes[1].stops, vec![1]);

    for route in &routes[2..] {
        assert!(route.is_empty());
        assert_eq!(route.distance, 0.0);
    }
}

#[test]
fn test_decode_is_deterministic() {
    let problem = line_problem(8, 3);
    let chromosome = vec![5, 3, 8, 1, 2, 7, 4, 6];

    let first = decode(&chromosome, &problem);
    let second = decode(&chromosome, &problem);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.stops, b.stops);
        assert_eq!(a.distance, b.distance);
    }
}

#[test]
fn test_route_distance_includes_depot_legs() {
    let problem = line_problem(2, 1);
    let chromosome = vec![1, 2];

    let routes = decode(&chromosome, &problem);

    // Depot(0,0) -> (10,0) -> (20,0) -> depot: 10 + 10 + 20.
    assert_eq!(routes.len(), 1);
    assert!((routes[0].distance - 40.0).abs() < 1e-9);
}

#[test]
fn test_route_waypoints_bracketed_by_depot() {
    let problem = line_problem(3, 1);
    let chromosome = vec![2, 1, 3];

    let routes = decode(&chromosome, &problem);
    let waypoints = routes[0].waypoints(&problem);

    assert_eq!(waypoints.len(), 5);
    assert_eq!(waypoints[0], (0.0, 0.0));
    assert_eq!(waypoints[4], (0.0, 0.0));
    assert_eq!(waypoints[1], (20.0, 0.0));
}

#[test]
fn test_solution_total_distance() {
    let problem = line_problem(4, 2);
    let solution = Solution::from_chromosome(vec![1, 2, 3, 4], &problem);

    let sum: f64 = solution.routes.iter().map(|r| r.distance).sum();
    assert!((solution.total_distance - sum).abs() < 1e-9);
}

#[test]
fn test_solution_active_route_count() {
    let problem = line_problem(2, 4);
    let solution = Solution::from_chromosome(vec![1, 2], &problem);

    assert_eq!(solution.routes.len(), 4);
    assert_eq!(solution.active_route_count(), 2);
}
