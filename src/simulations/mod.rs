// Module declarations
pub(crate) mod projection;
pub(crate) mod simulations_constants;
pub(crate) mod simulations_errors;
pub(crate) mod simulations_model;
pub(crate) mod simulations_repository;
pub(crate) mod simulations_service;

#[cfg(test)]
pub(crate) mod tests;

// Re-export the public interface
pub use projection::{project_series, ProjectionParameters, ProjectionPoint};
pub use simulations_constants::*;
pub use simulations_model::{
    ConsolidatedResult, ConsolidatedResultDB, NewSimulation, Simulation, SimulationDB,
    SimulationUpdate,
};
pub use simulations_repository::SimulationRepository;
pub use simulations_service::SimulationService;

// Re-export error types for convenience
pub use simulations_errors::{Result, SimulationError};
