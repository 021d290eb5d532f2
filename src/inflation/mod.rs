// Module declarations
pub(crate) mod inflation_model;
pub(crate) mod inflation_repository;
pub(crate) mod inflation_service;
pub(crate) mod inflation_traits;

// Re-export the public interface
pub use inflation_model::{AnnualInflationRate, AnnualInflationRateDB, NewInflationRate};
pub use inflation_repository::InflationRateRepository;
pub use inflation_service::{rate_history_chart, InflationRateService};
pub use inflation_traits::{InflationRateRepositoryTrait, InflationRateServiceTrait};
