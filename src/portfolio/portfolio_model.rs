use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::portfolio_constants::{TRANSACTION_TYPE_BUY, TRANSACTION_TYPE_SELL};
use super::portfolio_errors::{PortfolioError, Result};
use crate::stocks::Stock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => TRANSACTION_TYPE_BUY,
            TransactionType::Sell => TRANSACTION_TYPE_SELL,
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            TRANSACTION_TYPE_BUY => Ok(TransactionType::Buy),
            TRANSACTION_TYPE_SELL => Ok(TransactionType::Sell),
            other => Err(PortfolioError::InvalidData(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// Domain model for a user's portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub name: String,
    pub description: Option<String>,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PortfolioError::InvalidData(
                "Portfolio name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for portfolios
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<PortfolioDB> for Portfolio {
    fn from(db: PortfolioDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Domain model for a derived position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub portfolio_id: String,
    pub stock_id: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub opened_at: NaiveDate,
    pub notes: Option<String>,
}

impl Position {
    /// Cost basis of the position
    pub fn total_cost(&self) -> Decimal {
        self.quantity * self.average_price
    }
}

/// Database model for positions
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub id: String,
    pub portfolio_id: String,
    pub stock_id: String,
    pub quantity: f64,
    pub average_price: f64,
    pub opened_at: NaiveDate,
    pub notes: Option<String>,
}

impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            stock_id: db.stock_id,
            quantity: Decimal::from_f64_retain(db.quantity).unwrap_or_default(),
            average_price: Decimal::from_f64_retain(db.average_price).unwrap_or_default(),
            opened_at: db.opened_at,
            notes: db.notes,
        }
    }
}

/// Domain model for a recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub portfolio_id: String,
    pub stock_id: String,
    pub transaction_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
    pub fees: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// Gross amount of the transaction including fees
    pub fn total_amount(&self) -> Decimal {
        self.quantity * self.price + self.fees
    }
}

/// Input model for recording a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub stock_id: String,
    pub transaction_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
    pub fees: Decimal,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.stock_id.trim().is_empty() {
            return Err(PortfolioError::InvalidData(
                "Stock is required".to_string(),
            ));
        }
        TransactionType::from_str(&self.transaction_type)?;
        if self.quantity <= Decimal::ZERO {
            return Err(PortfolioError::InvalidData(
                "Quantity must be positive".to_string(),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(PortfolioError::InvalidData(
                "Price must not be negative".to_string(),
            ));
        }
        if self.fees < Decimal::ZERO {
            return Err(PortfolioError::InvalidData(
                "Fees must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for transactions
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub portfolio_id: String,
    pub stock_id: String,
    pub transaction_type: String,
    pub quantity: f64,
    pub price: f64,
    pub date: NaiveDate,
    pub fees: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            stock_id: db.stock_id,
            transaction_type: db.transaction_type,
            quantity: Decimal::from_f64_retain(db.quantity).unwrap_or_default(),
            price: Decimal::from_f64_retain(db.price).unwrap_or_default(),
            date: db.date,
            fees: Decimal::from_f64_retain(db.fees).unwrap_or_default(),
            notes: db.notes,
            created_at: db.created_at,
        }
    }
}

/// A position joined with its instrument for valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDetail {
    pub position: Position,
    pub stock: Stock,
}

impl PositionDetail {
    /// Market value, `None` while no quote is known
    pub fn current_value(&self) -> Option<Decimal> {
        self.stock
            .current_price
            .map(|price| self.position.quantity * price)
    }

    /// Unrealized gain or loss, `None` while no quote is known
    pub fn gain_loss(&self) -> Option<Decimal> {
        self.current_value()
            .map(|value| value - self.position.total_cost())
    }

    /// Unrealized gain or loss in percent of the cost basis.
    ///
    /// Zero when the cost basis is zero, so a free position never
    /// divides by zero.
    pub fn gain_loss_percent(&self) -> Option<Decimal> {
        let gain_loss = self.gain_loss()?;
        let cost = self.position.total_cost();
        if cost.is_zero() {
            return Some(Decimal::ZERO);
        }
        Some(gain_loss / cost * Decimal::ONE_HUNDRED)
    }
}

/// A portfolio with its valued positions and transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDetail {
    pub portfolio: Portfolio,
    pub positions: Vec<PositionDetail>,
    pub transactions: Vec<Transaction>,
    /// Sum over positions with a known price
    pub total_market_value: Decimal,
    pub total_cost: Decimal,
    /// `None` when no position has a known price
    pub total_gain_loss: Option<Decimal>,
}

impl PortfolioDetail {
    /// Positions holding instruments of one asset type
    pub fn positions_of_type(&self, asset_type: &str) -> Vec<&PositionDetail> {
        self.positions
            .iter()
            .filter(|p| p.stock.asset_type == asset_type)
            .collect()
    }
}
