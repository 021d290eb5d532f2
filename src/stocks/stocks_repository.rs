use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::prelude::*;
use std::sync::Arc;

use super::stocks_errors::{Result, StockError};
use super::stocks_model::{NewStock, Stock, StockDB};
use crate::db::get_connection;
use crate::market_data::StockQuote;
use crate::schema::{positions, stocks};

/// Repository for managing instrument data in the database
pub struct StockRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl StockRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Registers a new instrument
    pub fn create(&self, new_stock: NewStock) -> Result<Stock> {
        new_stock.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        let mut stock_db: StockDB = new_stock.into();

        let existing: Option<StockDB> = stocks::table
            .filter(stocks::symbol.eq(&stock_db.symbol))
            .first::<StockDB>(&mut conn)
            .optional()?;
        if existing.is_some() {
            return Err(StockError::DuplicateEntity(stock_db.symbol));
        }

        stock_db.id = uuid::Uuid::new_v4().to_string();

        diesel::insert_into(stocks::table)
            .values(&stock_db)
            .execute(&mut conn)?;

        Ok(stock_db.into())
    }

    /// Retrieves an instrument by its ID
    pub fn get_by_id(&self, stock_id: &str) -> Result<Stock> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        let stock = stocks::table
            .find(stock_id)
            .first::<StockDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    StockError::NotFound(format!("Stock with id {} not found", stock_id))
                }
                _ => StockError::DatabaseError(e.to_string()),
            })?;

        Ok(stock.into())
    }

    /// Retrieves an instrument by its symbol
    pub fn get_by_symbol(&self, symbol: &str) -> Result<Option<Stock>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        let stock = stocks::table
            .filter(stocks::symbol.eq(symbol))
            .first::<StockDB>(&mut conn)
            .optional()?;

        Ok(stock.map(Stock::from))
    }

    /// Lists all instruments ordered by symbol
    pub fn list(&self) -> Result<Vec<Stock>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        stocks::table
            .order(stocks::symbol.asc())
            .load::<StockDB>(&mut conn)
            .map_err(|e| StockError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Stock::from).collect())
    }

    /// Counts positions referencing an instrument
    pub fn count_positions(&self, stock_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        let count = positions::table
            .filter(positions::stock_id.eq(stock_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    /// Overwrites the market snapshot of an instrument
    pub fn save_quote(
        &self,
        stock_id: &str,
        quote: &StockQuote,
        updated_at: NaiveDateTime,
    ) -> Result<()> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        diesel::update(stocks::table.find(stock_id))
            .set((
                stocks::current_price.eq(quote.price.to_f64()),
                stocks::price_change.eq(quote.change.to_f64()),
                stocks::price_change_percent.eq(quote.change_percent.to_f64()),
                stocks::volume.eq(Some(quote.volume)),
                stocks::last_update.eq(Some(updated_at)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    /// Deletes an instrument by its ID
    pub fn delete(&self, stock_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        let affected = diesel::delete(stocks::table.find(stock_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(StockError::NotFound(format!(
                "Stock with id {} not found",
                stock_id
            )));
        }

        Ok(affected)
    }
}
