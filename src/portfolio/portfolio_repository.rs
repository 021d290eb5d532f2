use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::ledger::PositionState;
use super::portfolio_errors::{PortfolioError, Result};
use super::portfolio_model::{
    NewPortfolio, Portfolio, PortfolioDB, Position, PositionDB, Transaction, TransactionDB,
};
use crate::db::get_connection;
use crate::schema::{portfolios, positions, transactions};

/// Repository for portfolios, positions and transactions
pub struct PortfolioRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Creates a portfolio, enforcing the per-user name uniqueness
    pub fn create(&self, user_id: &str, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        let existing: Option<PortfolioDB> = portfolios::table
            .filter(portfolios::user_id.eq(user_id))
            .filter(portfolios::name.eq(&new_portfolio.name))
            .first::<PortfolioDB>(&mut conn)
            .optional()?;
        if existing.is_some() {
            return Err(PortfolioError::DuplicateEntity(new_portfolio.name));
        }

        let now = chrono::Utc::now().naive_utc();
        let portfolio_db = PortfolioDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_portfolio.name,
            description: new_portfolio.description,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(portfolios::table)
            .values(&portfolio_db)
            .execute(&mut conn)?;

        Ok(portfolio_db.into())
    }

    /// Retrieves a portfolio by its ID
    pub fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        let portfolio = portfolios::table
            .find(portfolio_id)
            .first::<PortfolioDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => PortfolioError::NotFound(format!(
                    "Portfolio with id {} not found",
                    portfolio_id
                )),
                _ => PortfolioError::DatabaseError(e.to_string()),
            })?;

        Ok(portfolio.into())
    }

    /// Lists a user's portfolios ordered by name
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        portfolios::table
            .filter(portfolios::user_id.eq(user_id))
            .order(portfolios::name.asc())
            .load::<PortfolioDB>(&mut conn)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Portfolio::from).collect())
    }

    /// Positions of a portfolio
    pub fn positions_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        positions::table
            .filter(positions::portfolio_id.eq(portfolio_id))
            .load::<PositionDB>(&mut conn)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Position::from).collect())
    }

    /// Transactions of a portfolio, most recent first
    pub fn transactions_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        transactions::table
            .filter(transactions::portfolio_id.eq(portfolio_id))
            .order(transactions::date.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
    }

    /// Retrieves a transaction by its ID
    pub fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        let transaction = transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => PortfolioError::NotFound(format!(
                    "Transaction with id {} not found",
                    transaction_id
                )),
                _ => PortfolioError::DatabaseError(e.to_string()),
            })?;

        Ok(transaction.into())
    }

    /// Removes a portfolio with its positions and transactions
    pub fn delete_cascade(&self, portfolio_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PortfolioError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, PortfolioError, _>(|conn| {
            diesel::delete(
                positions::table.filter(positions::portfolio_id.eq(portfolio_id)),
            )
            .execute(conn)?;
            diesel::delete(
                transactions::table.filter(transactions::portfolio_id.eq(portfolio_id)),
            )
            .execute(conn)?;
            diesel::delete(portfolios::table.find(portfolio_id)).execute(conn)?;
            Ok(())
        })
    }

    // In-transaction helpers. The ledger mutation and the transaction-row
    // mutation must share one atomic unit.

    pub fn find_position_tx(
        conn: &mut SqliteConnection,
        portfolio_id: &str,
        stock_id: &str,
    ) -> QueryResult<Option<PositionDB>> {
        positions::table
            .filter(positions::portfolio_id.eq(portfolio_id))
            .filter(positions::stock_id.eq(stock_id))
            .first::<PositionDB>(conn)
            .optional()
    }

    pub fn insert_transaction_tx(
        conn: &mut SqliteConnection,
        transaction: &TransactionDB,
    ) -> QueryResult<()> {
        diesel::insert_into(transactions::table)
            .values(transaction)
            .execute(conn)?;
        Ok(())
    }

    pub fn delete_transaction_tx(
        conn: &mut SqliteConnection,
        transaction_id: &str,
    ) -> QueryResult<()> {
        diesel::delete(transactions::table.find(transaction_id)).execute(conn)?;
        Ok(())
    }

    /// Writes the new ledger state of a pair: update, insert or remove.
    pub fn save_position_state_tx(
        conn: &mut SqliteConnection,
        existing: Option<&PositionDB>,
        portfolio_id: &str,
        stock_id: &str,
        state: Option<PositionState>,
        opened_at: NaiveDate,
    ) -> QueryResult<()> {
        match (existing, state) {
            (Some(row), Some(state)) => {
                diesel::update(positions::table.find(&row.id))
                    .set((
                        positions::quantity.eq(state.quantity.to_f64().unwrap_or_default()),
                        positions::average_price
                            .eq(state.average_price.to_f64().unwrap_or_default()),
                    ))
                    .execute(conn)?;
            }
            (Some(row), None) => {
                diesel::delete(positions::table.find(&row.id)).execute(conn)?;
            }
            (None, Some(state)) => {
                let position_db = PositionDB {
                    id: Uuid::new_v4().to_string(),
                    portfolio_id: portfolio_id.to_string(),
                    stock_id: stock_id.to_string(),
                    quantity: state.quantity.to_f64().unwrap_or_default(),
                    average_price: state.average_price.to_f64().unwrap_or_default(),
                    opened_at,
                    notes: None,
                };
                diesel::insert_into(positions::table)
                    .values(&position_db)
                    .execute(conn)?;
            }
            (None, None) => {}
        }
        Ok(())
    }
}
