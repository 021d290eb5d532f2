// Module declarations
pub(crate) mod market_data_constants;
pub(crate) mod market_data_errors;
pub(crate) mod market_data_model;
pub(crate) mod market_data_provider;
pub(crate) mod market_data_service;
pub(crate) mod providers;

// Re-export the public interface
pub use market_data_constants::*;
pub use market_data_model::StockQuote;
pub use market_data_provider::MarketDataProvider;
pub use market_data_service::MarketDataService;

// Re-export provider types
pub use providers::alpha_vantage_provider::AlphaVantageProvider;

// Re-export error types for convenience
pub use market_data_errors::MarketDataError;
