// Module declarations
pub(crate) mod ledger;
pub(crate) mod portfolio_constants;
pub(crate) mod portfolio_errors;
pub(crate) mod portfolio_model;
pub(crate) mod portfolio_repository;
pub(crate) mod portfolio_service;

#[cfg(test)]
pub(crate) mod tests;

// Re-export the public interface
pub use ledger::{apply_buy, apply_sell, reverse_buy, reverse_sell, PositionState};
pub use portfolio_constants::*;
pub use portfolio_model::{
    NewPortfolio, NewTransaction, Portfolio, PortfolioDB, PortfolioDetail, Position, PositionDB,
    PositionDetail, Transaction, TransactionDB, TransactionType,
};
pub use portfolio_repository::PortfolioRepository;
pub use portfolio_service::PortfolioService;

// Re-export error types for convenience
pub use portfolio_errors::{PortfolioError, Result};
