//! Persistence helpers and run statistics.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::problem::Problem;
use crate::solution::Solution;
use crate::GenerationStats;

/// Save a solution to a text file, one depot-to-depot route per block.
pub fn save_solution<P: AsRef<Path>>(
    solution: &Solution,
    problem: &Problem,
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "VRP Solution for instance: {}", problem.name)?;
    writeln!(file, "Total Distance: {:.2}", solution.total_distance)?;
    writeln!(file, "Number of Routes: {}", solution.routes.len())?;
    writeln!(file)?;

    for (i, route) in solution.routes.iter().enumerate() {
        write!(file, "Route #{}: ", i + 1)?;

        if route.is_empty() {
            writeln!(file, "Empty")?;
            continue;
        }

        write!(file, "{}", problem.depot_index)?;

        for &stop in &route.stops {
            write!(file, " -> {}", stop)?;
        }

        writeln!(file, " -> {}", problem.depot_index)?;
        writeln!(file, "  Distance: {:.2}", route.distance)?;
        writeln!(file)?;
    }

    Ok(())
}

/// Write the convergence log as `generation,best,average` CSV rows for the
/// plotting layer.
pub fn save_convergence_csv<P: AsRef<Path>>(
    history: &[GenerationStats],
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "generation,best,average")?;
    for stats in history {
        writeln!(
            file,
            "{},{:.4},{:.4}",
            stats.generation, stats.best, stats.average
        )?;
    }

    Ok(())
}

/// Per-route coordinate polylines, depot included at both ends.
///
/// This is the hand-off format for the external plotting adapter.
pub fn route_waypoints(solution: &Solution, problem: &Problem) -> Vec<Vec<(f64, f64)>> {
    solution
        .routes
        .iter()
        .map(|route| route.waypoints(problem))
        .collect()
}

/// Summary of one completed run.
pub struct SearchStatistics {
    pub generations: usize,
    pub best_distance: f64,
    pub best_balance_penalty: f64,
    pub active_routes: usize,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Generations: {}
- Best Distance: {:.2}
- Best Balance Penalty: {:.2}
- Active Routes: {}",
            self.generations, self.best_distance, self.best_balance_penalty, self.active_routes
        )
    }
}
