use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::ledger::{apply_buy, apply_sell, reverse_buy, reverse_sell, PositionState};
use super::portfolio_errors::{PortfolioError, Result};
use super::portfolio_model::{
    NewPortfolio, NewTransaction, Portfolio, PortfolioDetail, PositionDetail, Transaction,
    TransactionDB, TransactionType,
};
use super::portfolio_repository::PortfolioRepository;
use crate::stocks::StockRepository;

/// Service for portfolios and their transaction-driven positions.
///
/// A position is nothing but the replay of its pair's transaction
/// history; every apply or reverse therefore shares one database
/// transaction with the transaction-row write.
pub struct PortfolioService {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl PortfolioService {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn repository(&self) -> PortfolioRepository {
        PortfolioRepository::new(self.pool.clone())
    }

    fn owned_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio> {
        let portfolio = self.repository().get_by_id(portfolio_id)?;
        if portfolio.user_id != user_id {
            return Err(PortfolioError::PermissionDenied(format!(
                "Portfolio {} does not belong to the requesting user",
                portfolio_id
            )));
        }
        Ok(portfolio)
    }

    /// Creates a portfolio; the name is unique per user
    pub fn create_portfolio(
        &self,
        user_id: &str,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio> {
        let portfolio = self.repository().create(user_id, new_portfolio)?;
        info!("Created portfolio {}", portfolio.name);
        Ok(portfolio)
    }

    /// Retrieves a portfolio, enforcing ownership
    pub fn get_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio> {
        self.owned_portfolio(user_id, portfolio_id)
    }

    /// Lists a user's portfolios
    pub fn get_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        self.repository().list_by_user(user_id)
    }

    /// Deletes a portfolio with its positions and transactions
    pub fn delete_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<()> {
        self.owned_portfolio(user_id, portfolio_id)?;
        self.repository().delete_cascade(portfolio_id)?;
        info!("Deleted portfolio {}", portfolio_id);
        Ok(())
    }

    /// Records a transaction and applies it to the pair's position,
    /// atomically.
    pub fn add_transaction(
        &self,
        user_id: &str,
        portfolio_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        self.owned_portfolio(user_id, portfolio_id)?;
        new_transaction.validate()?;

        let transaction_type = TransactionType::from_str(&new_transaction.transaction_type)?;

        StockRepository::new(self.pool.clone())
            .get_by_id(&new_transaction.stock_id)
            .map_err(|e| PortfolioError::NotFound(e.to_string()))?;

        let transaction_db = TransactionDB {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            stock_id: new_transaction.stock_id.clone(),
            transaction_type: new_transaction.transaction_type.clone(),
            quantity: new_transaction.quantity.to_f64().unwrap_or_default(),
            price: new_transaction.price.to_f64().unwrap_or_default(),
            date: new_transaction.date,
            fees: new_transaction.fees.to_f64().unwrap_or_default(),
            notes: new_transaction.notes.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = self
            .pool
            .get()
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        let transaction: Transaction = conn.transaction::<_, PortfolioError, _>(|conn| {
            PortfolioRepository::insert_transaction_tx(conn, &transaction_db)?;

            let existing = PortfolioRepository::find_position_tx(
                conn,
                portfolio_id,
                &new_transaction.stock_id,
            )?;
            let state = existing.as_ref().map(|row| PositionState {
                quantity: Decimal::from_f64_retain(row.quantity).unwrap_or_default(),
                average_price: Decimal::from_f64_retain(row.average_price).unwrap_or_default(),
            });

            let new_state = match transaction_type {
                TransactionType::Buy => Some(apply_buy(
                    state.as_ref(),
                    new_transaction.quantity,
                    new_transaction.price,
                )),
                TransactionType::Sell => {
                    apply_sell(state.as_ref(), new_transaction.quantity)?
                }
            };

            PortfolioRepository::save_position_state_tx(
                conn,
                existing.as_ref(),
                portfolio_id,
                &new_transaction.stock_id,
                new_state,
                new_transaction.date,
            )?;

            Ok(transaction_db.clone().into())
        })?;

        info!(
            "Recorded {} of {} x {}",
            transaction.transaction_type, transaction.quantity, transaction.stock_id
        );
        Ok(transaction)
    }

    /// Deletes a transaction and reverses its effect on the position,
    /// atomically.
    pub fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let transaction = self.repository().get_transaction(transaction_id)?;
        self.owned_portfolio(user_id, &transaction.portfolio_id)?;

        let transaction_type = TransactionType::from_str(&transaction.transaction_type)?;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, PortfolioError, _>(|conn| {
            let existing = PortfolioRepository::find_position_tx(
                conn,
                &transaction.portfolio_id,
                &transaction.stock_id,
            )?
            .ok_or_else(|| {
                PortfolioError::InvalidData(
                    "No position found for this transaction".to_string(),
                )
            })?;

            let state = PositionState {
                quantity: Decimal::from_f64_retain(existing.quantity).unwrap_or_default(),
                average_price: Decimal::from_f64_retain(existing.average_price)
                    .unwrap_or_default(),
            };

            let new_state = match transaction_type {
                TransactionType::Buy => {
                    reverse_buy(&state, transaction.quantity, transaction.price)?
                }
                TransactionType::Sell => Some(reverse_sell(&state, transaction.quantity)),
            };

            PortfolioRepository::save_position_state_tx(
                conn,
                Some(&existing),
                &transaction.portfolio_id,
                &transaction.stock_id,
                new_state,
                existing.opened_at,
            )?;

            PortfolioRepository::delete_transaction_tx(conn, transaction_id)?;
            Ok(())
        })?;

        info!("Deleted transaction {}", transaction_id);
        Ok(())
    }

    /// Loads a portfolio with valued positions and its history
    pub fn get_portfolio_detail(
        &self,
        user_id: &str,
        portfolio_id: &str,
    ) -> Result<PortfolioDetail> {
        let portfolio = self.owned_portfolio(user_id, portfolio_id)?;

        let stock_repository = StockRepository::new(self.pool.clone());
        let positions = self.repository().positions_for_portfolio(portfolio_id)?;

        let mut details = Vec::with_capacity(positions.len());
        for position in positions {
            let stock = stock_repository
                .get_by_id(&position.stock_id)
                .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;
            details.push(PositionDetail { position, stock });
        }

        let total_cost: Decimal = details.iter().map(|d| d.position.total_cost()).sum();
        let total_market_value: Decimal =
            details.iter().filter_map(|d| d.current_value()).sum();
        let has_quotes = details.iter().any(|d| d.current_value().is_some());
        let total_gain_loss = has_quotes.then(|| total_market_value - total_cost);

        let transactions = self.repository().transactions_for_portfolio(portfolio_id)?;

        Ok(PortfolioDetail {
            portfolio,
            positions: details,
            transactions,
            total_market_value,
            total_cost,
            total_gain_loss,
        })
    }
}
