use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::inflation_model::{AnnualInflationRate, AnnualInflationRateDB, NewInflationRate};
use super::inflation_traits::InflationRateRepositoryTrait;
use crate::db::get_connection;
use crate::errors::{Error, Result};
use crate::schema::annual_inflation_rates;

pub struct InflationRateRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl InflationRateRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        InflationRateRepository { pool }
    }
}

impl InflationRateRepositoryTrait for InflationRateRepository {
    fn get_rates(&self) -> Result<Vec<AnnualInflationRate>> {
        let mut conn = get_connection(&self.pool)?;
        annual_inflation_rates::table
            .order(annual_inflation_rates::year.desc())
            .load::<AnnualInflationRateDB>(&mut conn)
            .map_err(Error::from)
            .map(|rows| rows.into_iter().map(AnnualInflationRate::from).collect())
    }

    fn get_rate_for_year(&self, year: i32) -> Result<Option<AnnualInflationRate>> {
        let mut conn = get_connection(&self.pool)?;
        let row = annual_inflation_rates::table
            .filter(annual_inflation_rates::year.eq(year))
            .first::<AnnualInflationRateDB>(&mut conn)
            .optional()?;
        Ok(row.map(AnnualInflationRate::from))
    }

    fn upsert_rate(&self, rate: NewInflationRate) -> Result<AnnualInflationRate> {
        rate.validate()?;

        let mut conn = get_connection(&self.pool)?;

        let existing = annual_inflation_rates::table
            .filter(annual_inflation_rates::year.eq(rate.year))
            .first::<AnnualInflationRateDB>(&mut conn)
            .optional()?;

        let mut rate_db: AnnualInflationRateDB = rate.into();
        match existing {
            Some(current) => {
                rate_db.id = current.id.clone();
                diesel::update(annual_inflation_rates::table.find(&current.id))
                    .set(&rate_db)
                    .execute(&mut conn)?;
            }
            None => {
                rate_db.id = Uuid::new_v4().to_string();
                diesel::insert_into(annual_inflation_rates::table)
                    .values(&rate_db)
                    .execute(&mut conn)?;
            }
        }

        Ok(rate_db.into())
    }

    fn delete_rate(&self, year: i32) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::delete(
            annual_inflation_rates::table.filter(annual_inflation_rates::year.eq(year)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "No inflation rate recorded for {}",
                year
            )));
        }

        Ok(())
    }
}
