//! Error types for solver construction and tuning.

use thiserror::Error;

/// Raised when a [`GaConfig`](crate::config::GaConfig) or problem setup is
/// rejected before any generation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size must be positive")]
    InvalidPopulationSize,

    #[error("generation count must be positive")]
    InvalidGenerationCount,

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("tournament size must be positive")]
    InvalidTournamentSize,

    #[error("vehicle count must be positive")]
    InvalidVehicleCount,

    #[error("instance has no locations (missing depot)")]
    MissingDepot,
}
