use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::projection::ProjectionParameters;
use super::simulations_constants::SUPPORTED_CURRENCIES;
use super::simulations_errors::{Result, SimulationError};

/// Domain model representing a savings simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub account_name: String,
    pub initial_amount: Decimal,
    pub currency: String,
    pub return_rate: Decimal,
    pub period_years: i32,
    pub start_year: i32,
    pub annual_contribution: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Simulation {
    pub fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters {
            initial_amount: self.initial_amount,
            return_rate: self.return_rate,
            period_years: self.period_years,
            start_year: self.start_year,
            annual_contribution: self.annual_contribution,
        }
    }
}

/// Input model for creating a new simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSimulation {
    pub category_id: String,
    pub account_name: String,
    pub initial_amount: Decimal,
    pub currency: String,
    pub return_rate: Decimal,
    pub period_years: i32,
    pub start_year: i32,
    pub annual_contribution: Decimal,
}

impl NewSimulation {
    pub fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters {
            initial_amount: self.initial_amount,
            return_rate: self.return_rate,
            period_years: self.period_years,
            start_year: self.start_year,
            annual_contribution: self.annual_contribution,
        }
    }

    /// Validates the new simulation data
    pub fn validate(&self, current_year: i32) -> Result<()> {
        if self.account_name.trim().is_empty() {
            return Err(SimulationError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        if self.category_id.trim().is_empty() {
            return Err(SimulationError::InvalidData(
                "Category is required".to_string(),
            ));
        }
        if !SUPPORTED_CURRENCIES.contains(&self.currency.as_str()) {
            return Err(SimulationError::InvalidData(format!(
                "Currency '{}' is not supported",
                self.currency
            )));
        }
        self.parameters().validate(current_year)
    }
}

/// Input model for updating an existing simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationUpdate {
    pub id: String,
    pub category_id: String,
    pub account_name: String,
    pub initial_amount: Decimal,
    pub return_rate: Decimal,
    pub period_years: i32,
    pub start_year: i32,
    pub annual_contribution: Decimal,
}

impl SimulationUpdate {
    pub fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters {
            initial_amount: self.initial_amount,
            return_rate: self.return_rate,
            period_years: self.period_years,
            start_year: self.start_year,
            annual_contribution: self.annual_contribution,
        }
    }

    pub fn validate(&self, current_year: i32) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SimulationError::InvalidData(
                "Simulation ID is required for updates".to_string(),
            ));
        }
        if self.account_name.trim().is_empty() {
            return Err(SimulationError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        self.parameters().validate(current_year)
    }
}

/// Database model for simulations
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::simulations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SimulationDB {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub account_name: String,
    pub initial_amount: f64,
    pub currency: String,
    pub return_rate: f64,
    pub period_years: i32,
    pub start_year: i32,
    pub annual_contribution: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<SimulationDB> for Simulation {
    fn from(db: SimulationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            account_name: db.account_name,
            initial_amount: Decimal::from_f64_retain(db.initial_amount).unwrap_or_default(),
            currency: db.currency,
            return_rate: Decimal::from_f64_retain(db.return_rate).unwrap_or_default(),
            period_years: db.period_years,
            start_year: db.start_year,
            annual_contribution: Decimal::from_f64_retain(db.annual_contribution)
                .unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl SimulationDB {
    pub fn from_new(new: NewSimulation, user_id: &str) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),
            user_id: user_id.to_string(),
            category_id: new.category_id,
            account_name: new.account_name,
            initial_amount: new.initial_amount.to_f64().unwrap_or_default(),
            currency: new.currency,
            return_rate: new.return_rate.to_f64().unwrap_or_default(),
            period_years: new.period_years,
            start_year: new.start_year,
            annual_contribution: new.annual_contribution.to_f64().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Domain model for one derived year/amount point of a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedResult {
    pub id: String,
    pub simulation_id: String,
    pub year: i32,
    pub amount: Decimal,
    pub account_name: String,
}

/// Database model for consolidated results
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::consolidated_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConsolidatedResultDB {
    pub id: String,
    pub simulation_id: String,
    pub year: i32,
    pub amount: f64,
    pub account_name: String,
}

impl From<ConsolidatedResultDB> for ConsolidatedResult {
    fn from(db: ConsolidatedResultDB) -> Self {
        Self {
            id: db.id,
            simulation_id: db.simulation_id,
            year: db.year,
            amount: Decimal::from_f64_retain(db.amount).unwrap_or_default(),
            account_name: db.account_name,
        }
    }
}
