use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model for a yearly inflation rate.
///
/// The table is global: one row per year, shared by every user. Editing a
/// rate never touches existing real-data entries; those keep the rate they
/// captured until an explicit recalculation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualInflationRate {
    pub id: String,
    pub year: i32,
    pub rate: Decimal,
    pub comment: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating or updating a yearly rate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInflationRate {
    pub year: i32,
    pub rate: Decimal,
    pub comment: Option<String>,
}

impl NewInflationRate {
    pub fn validate(&self) -> Result<()> {
        if self.rate < Decimal::from(-100) || self.rate > Decimal::from(100) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Inflation rate {} is outside [-100, 100]",
                self.rate
            ))));
        }
        Ok(())
    }
}

/// Database model for annual inflation rates
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::annual_inflation_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AnnualInflationRateDB {
    pub id: String,
    pub year: i32,
    pub rate: f64,
    pub comment: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<AnnualInflationRateDB> for AnnualInflationRate {
    fn from(db: AnnualInflationRateDB) -> Self {
        Self {
            id: db.id,
            year: db.year,
            rate: Decimal::from_f64_retain(db.rate).unwrap_or_default(),
            comment: db.comment,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewInflationRate> for AnnualInflationRateDB {
    fn from(domain: NewInflationRate) -> Self {
        Self {
            id: String::new(),
            year: domain.year,
            rate: domain.rate.to_f64().unwrap_or_default(),
            comment: domain.comment,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
