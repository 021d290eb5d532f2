// Module declarations
pub(crate) mod stocks_constants;
pub(crate) mod stocks_errors;
pub(crate) mod stocks_model;
pub(crate) mod stocks_repository;
pub(crate) mod stocks_service;

// Re-export the public interface
pub use stocks_constants::*;
pub use stocks_model::{AssetType, NewStock, Stock, StockDB};
pub use stocks_repository::StockRepository;
pub use stocks_service::StockService;

// Re-export error types for convenience
pub use stocks_errors::{Result, StockError};
