// Module declarations
pub(crate) mod real_data_model;
pub(crate) mod real_data_repository;
pub(crate) mod real_data_service;

// Re-export the public interface
pub use real_data_model::{adjust_for_inflation, NewRealData, RealAccountData, RealAccountDataDB};
pub use real_data_repository::RealDataRepository;
pub use real_data_service::RealDataService;
