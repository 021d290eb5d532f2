use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use std::sync::Arc;

use super::stocks_errors::{Result, StockError};
use super::stocks_model::{NewStock, Stock};
use super::stocks_repository::StockRepository;

/// Service for managing tradable instruments
pub struct StockService {
    repository: StockRepository,
}

impl StockService {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self {
            repository: StockRepository::new(pool),
        }
    }

    /// Registers a new instrument, rejecting duplicate symbols
    pub fn create_stock(&self, new_stock: NewStock) -> Result<Stock> {
        let stock = self.repository.create(new_stock)?;
        info!("Registered instrument {}", stock.symbol);
        Ok(stock)
    }

    /// Retrieves an instrument by its ID
    pub fn get_stock(&self, stock_id: &str) -> Result<Stock> {
        self.repository.get_by_id(stock_id)
    }

    /// Lists all instruments ordered by symbol
    pub fn get_stocks(&self) -> Result<Vec<Stock>> {
        self.repository.list()
    }

    /// Deletes an instrument, refusing while any position references it
    pub fn delete_stock(&self, stock_id: &str) -> Result<()> {
        let stock = self.repository.get_by_id(stock_id)?;

        let references = self.repository.count_positions(stock_id)?;
        if references > 0 {
            return Err(StockError::InUse(format!(
                "{} is held in {} position(s)",
                stock.symbol, references
            )));
        }

        self.repository.delete(stock_id)?;
        info!("Deleted instrument {}", stock.symbol);
        Ok(())
    }
}
