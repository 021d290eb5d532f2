use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Divides a nominal amount by (1 + rate/100).
///
/// The captured rate travels with the entry; a later change to the global
/// table only lands here again through an explicit recalculation pass.
pub fn adjust_for_inflation(nominal: Decimal, rate: Decimal) -> Decimal {
    nominal / (Decimal::ONE + rate / Decimal::ONE_HUNDRED)
}

/// Domain model for an observed account balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealAccountData {
    pub id: String,
    pub simulation_id: String,
    pub year: i32,
    pub nominal_amount: Decimal,
    pub inflation_rate: Decimal,
    pub adjusted_amount: Decimal,
    pub updated_at: NaiveDateTime,
}

/// Input model for recording an observed balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRealData {
    pub simulation_id: String,
    pub year: i32,
    pub nominal_amount: Decimal,
}

/// Database model for real account data
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::real_account_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RealAccountDataDB {
    pub id: String,
    pub simulation_id: String,
    pub year: i32,
    pub nominal_amount: f64,
    pub inflation_rate: f64,
    pub adjusted_amount: f64,
    pub updated_at: NaiveDateTime,
}

impl From<RealAccountDataDB> for RealAccountData {
    fn from(db: RealAccountDataDB) -> Self {
        Self {
            id: db.id,
            simulation_id: db.simulation_id,
            year: db.year,
            nominal_amount: Decimal::from_f64_retain(db.nominal_amount).unwrap_or_default(),
            inflation_rate: Decimal::from_f64_retain(db.inflation_rate).unwrap_or_default(),
            adjusted_amount: Decimal::from_f64_retain(db.adjusted_amount).unwrap_or_default(),
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn adjustment_divides_by_one_plus_rate() {
        assert_eq!(adjust_for_inflation(dec!(102), dec!(2)), dec!(100));
        assert_eq!(adjust_for_inflation(dec!(1000), dec!(0)), dec!(1000));
    }

    #[test]
    fn negative_rate_raises_the_adjusted_amount() {
        assert_eq!(adjust_for_inflation(dec!(95), dec!(-5)), dec!(100));
    }
}
