use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::real_data_model::{RealAccountData, RealAccountDataDB};
use crate::comparison::RealPoint;
use crate::db::get_connection;
use crate::errors::{Error, Result};
use crate::schema::{real_account_data, simulations};

/// Repository for observed account balances
pub struct RealDataRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl RealDataRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub fn get_by_id(&self, entry_id: &str) -> Result<RealAccountData> {
        let mut conn = get_connection(&self.pool)?;

        let entry = real_account_data::table
            .find(entry_id)
            .first::<RealAccountDataDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Real-data entry {} not found", entry_id))
                }
                _ => Error::from(e),
            })?;

        Ok(entry.into())
    }

    /// Entries of one simulation, ordered by year
    pub fn list_for_simulation(&self, simulation_id: &str) -> Result<Vec<RealAccountData>> {
        let mut conn = get_connection(&self.pool)?;

        real_account_data::table
            .filter(real_account_data::simulation_id.eq(simulation_id))
            .order(real_account_data::year.asc())
            .load::<RealAccountDataDB>(&mut conn)
            .map_err(Error::from)
            .map(|rows| rows.into_iter().map(RealAccountData::from).collect())
    }

    /// All of a user's entries joined with their simulation's account name
    pub fn list_points_for_user(&self, user_id: &str) -> Result<Vec<RealPoint>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = real_account_data::table
            .inner_join(simulations::table)
            .filter(simulations::user_id.eq(user_id))
            .select((
                real_account_data::simulation_id,
                simulations::account_name,
                real_account_data::year,
                real_account_data::nominal_amount,
                real_account_data::inflation_rate,
                real_account_data::adjusted_amount,
            ))
            .order((simulations::account_name.asc(), real_account_data::year.asc()))
            .load::<(String, String, i32, f64, f64, f64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(simulation_id, account_name, year, nominal, rate, adjusted)| RealPoint {
                    simulation_id,
                    account_name,
                    year,
                    nominal_amount: Decimal::from_f64_retain(nominal).unwrap_or_default(),
                    inflation_rate: Decimal::from_f64_retain(rate).unwrap_or_default(),
                    adjusted_amount: Decimal::from_f64_retain(adjusted).unwrap_or_default(),
                },
            )
            .collect())
    }

    pub fn delete(&self, entry_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let affected =
            diesel::delete(real_account_data::table.find(entry_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Real-data entry {} not found",
                entry_id
            )));
        }

        Ok(())
    }

    // In-transaction helpers

    pub fn list_for_simulation_tx(
        conn: &mut SqliteConnection,
        simulation_id: &str,
    ) -> QueryResult<Vec<RealAccountDataDB>> {
        real_account_data::table
            .filter(real_account_data::simulation_id.eq(simulation_id))
            .order(real_account_data::year.asc())
            .load::<RealAccountDataDB>(conn)
    }

    /// Inserts or replaces the entry for (simulation, year)
    pub fn upsert_tx(
        conn: &mut SqliteConnection,
        simulation_id: &str,
        year: i32,
        nominal: Decimal,
        rate: Decimal,
        adjusted: Decimal,
    ) -> QueryResult<RealAccountDataDB> {
        let existing = real_account_data::table
            .filter(real_account_data::simulation_id.eq(simulation_id))
            .filter(real_account_data::year.eq(year))
            .first::<RealAccountDataDB>(conn)
            .optional()?;

        let entry = RealAccountDataDB {
            id: existing
                .as_ref()
                .map(|e| e.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            simulation_id: simulation_id.to_string(),
            year,
            nominal_amount: nominal.to_f64().unwrap_or_default(),
            inflation_rate: rate.to_f64().unwrap_or_default(),
            adjusted_amount: adjusted.to_f64().unwrap_or_default(),
            updated_at: chrono::Utc::now().naive_utc(),
        };

        if existing.is_some() {
            diesel::update(real_account_data::table.find(&entry.id))
                .set(&entry)
                .execute(conn)?;
        } else {
            diesel::insert_into(real_account_data::table)
                .values(&entry)
                .execute(conn)?;
        }

        Ok(entry)
    }

    pub fn set_rate_and_adjusted_tx(
        conn: &mut SqliteConnection,
        entry_id: &str,
        rate: Decimal,
        adjusted: Decimal,
    ) -> QueryResult<()> {
        diesel::update(real_account_data::table.find(entry_id))
            .set((
                real_account_data::inflation_rate.eq(rate.to_f64().unwrap_or_default()),
                real_account_data::adjusted_amount.eq(adjusted.to_f64().unwrap_or_default()),
                real_account_data::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)?;
        Ok(())
    }
}
