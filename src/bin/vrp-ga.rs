//! Command-line front end: solve a single instance or tune GA parameters.

use clap::{Parser, Subcommand};
use vrp_ga::config::GaConfig;
use vrp_ga::problem::Problem;
use vrp_ga::tuner::{ParamGrid, ParamRanges, Tuner};
use vrp_ga::utils::{save_convergence_csv, save_solution, SearchStatistics};
use vrp_ga::GaSolver;

#[derive(Parser)]
#[command(name = "vrp-ga", about = "Genetic algorithm VRP solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one instance and print the best route set
    Solve {
        /// Instance file; a random instance is generated when omitted
        #[arg(long)]
        instance: Option<String>,
        /// Number of customers for a generated instance
        #[arg(long, default_value_t = 20)]
        customers: usize,
        /// Number of vehicles
        #[arg(long, default_value_t = 3)]
        vehicles: usize,
        #[arg(long, default_value_t = 300)]
        pop_size: usize,
        #[arg(long, default_value_t = 300)]
        ngen: usize,
        #[arg(long, default_value_t = 0.7)]
        cx_prob: f64,
        #[arg(long, default_value_t = 0.2)]
        mut_prob: f64,
        #[arg(long, default_value_t = 3)]
        tournament_size: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Write the best route set to this file
        #[arg(long)]
        output: Option<String>,
        /// Write the convergence log to this CSV file
        #[arg(long)]
        convergence: Option<String>,
    },
    /// Search GA hyperparameter space on one instance
    Tune {
        #[arg(long)]
        instance: Option<String>,
        #[arg(long, default_value_t = 20)]
        customers: usize,
        #[arg(long, default_value_t = 3)]
        vehicles: usize,
        /// `random` or `grid`
        #[arg(long, default_value = "random")]
        method: String,
        /// Number of random-search trials
        #[arg(long, default_value_t = 25)]
        trials: usize,
        /// Generations per trial
        #[arg(long, default_value_t = 20)]
        ngen: usize,
        #[arg(long, default_value_t = 0)]
        seed_base: u64,
        /// Write the full per-trial result table as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn load_or_generate(
    instance: &Option<String>,
    customers: usize,
    vehicles: usize,
    seed: u64,
) -> Result<Problem, Box<dyn std::error::Error>> {
    match instance {
        Some(path) => {
            let problem = Problem::from_file(path)?;
            println!(
                "Loaded instance {} with {} customers",
                problem.name,
                problem.customer_count()
            );
            Ok(problem)
        }
        None => {
            let problem = Problem::generate(
                "random".to_string(),
                customers,
                (0.0, 1000.0),
                (0.0, 1000.0),
                (550.0, 470.0),
                vehicles,
                seed,
            );
            println!("Generated random instance with {} customers", customers);
            Ok(problem)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            instance,
            customers,
            vehicles,
            pop_size,
            ngen,
            cx_prob,
            mut_prob,
            tournament_size,
            seed,
            output,
            convergence,
        } => {
            let problem = load_or_generate(&instance, customers, vehicles, seed)?;

            let config = GaConfig::new()
                .with_pop_size(pop_size)
                .with_ngen(ngen)
                .with_cx_prob(cx_prob)
                .with_mut_prob(mut_prob)
                .with_tournament_size(tournament_size)
                .with_seed(seed);

            let mut solver = GaSolver::new(problem, config)?;
            let outcome = solver.solve();
            let solution = outcome.best_solution(&solver.problem);

            let stats = SearchStatistics {
                generations: outcome.history.len().saturating_sub(1),
                best_distance: outcome.best_fitness.total_distance,
                best_balance_penalty: outcome.best_fitness.balance_penalty,
                active_routes: solution.active_route_count(),
            };
            println!("{}", stats.format());
            println!("{:?}", solution);

            if let Some(path) = output {
                save_solution(&solution, &solver.problem, &path)?;
                println!("Solution saved to {}", path);
            }

            if let Some(path) = convergence {
                save_convergence_csv(&outcome.history, &path)?;
                println!("Convergence log saved to {}", path);
            }
        }
        Command::Tune {
            instance,
            customers,
            vehicles,
            method,
            trials,
            ngen,
            seed_base,
            output,
        } => {
            let problem = load_or_generate(&instance, customers, vehicles, seed_base)?;
            let tuner = Tuner::new(&problem, GaConfig::new());

            let result = match method.as_str() {
                "grid" => tuner.grid_search(&ParamGrid::default(), ngen, seed_base),
                _ => tuner.random_search(&ParamRanges::default(), trials, ngen, seed_base),
            };

            println!(
                "Completed {}/{} trials",
                result.completed_count(),
                result.trials.len()
            );

            match result.best() {
                Some(best) => {
                    println!(
                        "Best distance: {:.1}",
                        best.outcome.as_ref().unwrap().best_fitness.total_distance
                    );
                    println!(
                        "Best parameters: pop_size={}, cx_prob={:.2}, mut_prob={:.2}, tournament_size={}",
                        best.config.pop_size,
                        best.config.cx_prob,
                        best.config.mut_prob,
                        best.config.tournament_size
                    );
                }
                None => println!("No trial completed successfully"),
            }

            if let Some(path) = output {
                let file = std::fs::File::create(&path)?;
                serde_json::to_writer_pretty(file, &result)?;
                println!("Trial table saved to {}", path);
            }
        }
    }

    Ok(())
}
