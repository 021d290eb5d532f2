use rust_decimal::Decimal;

use super::inflation_model::{AnnualInflationRate, NewInflationRate};
use crate::errors::Result;

/// Trait defining the contract for inflation rate repository operations.
pub trait InflationRateRepositoryTrait: Send + Sync {
    fn get_rates(&self) -> Result<Vec<AnnualInflationRate>>;
    fn get_rate_for_year(&self, year: i32) -> Result<Option<AnnualInflationRate>>;
    fn upsert_rate(&self, rate: NewInflationRate) -> Result<AnnualInflationRate>;
    fn delete_rate(&self, year: i32) -> Result<()>;
}

/// Trait defining the contract for inflation rate service operations.
pub trait InflationRateServiceTrait: Send + Sync {
    fn get_rates(&self) -> Result<Vec<AnnualInflationRate>>;
    /// Rate for a year, `None` when the table has no row for it.
    fn get_rate(&self, year: i32) -> Result<Option<Decimal>>;
    fn upsert_rate(&self, rate: NewInflationRate) -> Result<AnnualInflationRate>;
    fn delete_rate(&self, year: i32) -> Result<()>;
}
