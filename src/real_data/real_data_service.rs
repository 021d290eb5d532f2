use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::real_data_model::{adjust_for_inflation, NewRealData, RealAccountData};
use super::real_data_repository::RealDataRepository;
use crate::db::DbTransactionExecutor;
use crate::errors::{Error, Result};
use crate::inflation::{InflationRateRepository, InflationRateRepositoryTrait};
use crate::simulations::SimulationRepository;

/// Service for observed balances and their inflation adjustment.
///
/// The global rate table is only read at save time; existing entries keep
/// their captured rate until `recalculate` rewrites them.
pub struct RealDataService {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl RealDataService {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn repository(&self) -> RealDataRepository {
        RealDataRepository::new(self.pool.clone())
    }

    fn check_ownership(&self, user_id: &str, simulation_id: &str) -> Result<()> {
        let simulation = SimulationRepository::new(self.pool.clone())
            .get_by_id(simulation_id)
            .map_err(Error::from)?;
        if simulation.user_id != user_id {
            return Err(Error::PermissionDenied(format!(
                "Simulation {} does not belong to the requesting user",
                simulation_id
            )));
        }
        Ok(())
    }

    /// Records an observed balance, capturing the current global rate.
    ///
    /// Overwrites any prior entry for the same (simulation, year).
    pub fn upsert(&self, user_id: &str, new_data: NewRealData) -> Result<RealAccountData> {
        self.check_ownership(user_id, &new_data.simulation_id)?;

        let rate = InflationRateRepository::new(self.pool.clone())
            .get_rate_for_year(new_data.year)?
            .map(|r| r.rate)
            .unwrap_or(Decimal::ZERO);
        let adjusted = adjust_for_inflation(new_data.nominal_amount, rate);

        let entry = self.pool.execute(|conn| {
            RealDataRepository::upsert_tx(
                conn,
                &new_data.simulation_id,
                new_data.year,
                new_data.nominal_amount,
                rate,
                adjusted,
            )
        })?;

        info!(
            "Saved real data for simulation {} year {}",
            new_data.simulation_id, new_data.year
        );
        Ok(entry.into())
    }

    /// Re-applies the current global rates to every entry of a simulation.
    ///
    /// This is the only path that propagates rate-table edits to stored
    /// adjusted amounts.
    pub fn recalculate(&self, user_id: &str, simulation_id: &str) -> Result<usize> {
        self.check_ownership(user_id, simulation_id)?;

        let rates: HashMap<i32, Decimal> = InflationRateRepository::new(self.pool.clone())
            .get_rates()?
            .into_iter()
            .map(|r| (r.year, r.rate))
            .collect();

        let updated = self.pool.execute(|conn| {
            let entries = RealDataRepository::list_for_simulation_tx(conn, simulation_id)?;
            let count = entries.len();

            for entry in entries {
                let rate = rates.get(&entry.year).copied().unwrap_or(Decimal::ZERO);
                let nominal =
                    Decimal::from_f64_retain(entry.nominal_amount).unwrap_or_default();
                let adjusted = adjust_for_inflation(nominal, rate);
                RealDataRepository::set_rate_and_adjusted_tx(conn, &entry.id, rate, adjusted)?;
            }

            Ok::<usize, diesel::result::Error>(count)
        })?;

        info!(
            "Recalculated {} real-data entries for simulation {}",
            updated, simulation_id
        );
        Ok(updated)
    }

    /// Deletes a single entry; no derived rows depend on it
    pub fn delete(&self, user_id: &str, entry_id: &str) -> Result<()> {
        let entry = self.repository().get_by_id(entry_id)?;
        self.check_ownership(user_id, &entry.simulation_id)?;

        self.repository().delete(entry_id)?;
        info!("Deleted real-data entry {}", entry_id);
        Ok(())
    }

    /// Entries of one simulation, ordered by year
    pub fn get_entries(
        &self,
        user_id: &str,
        simulation_id: &str,
    ) -> Result<Vec<RealAccountData>> {
        self.check_ownership(user_id, simulation_id)?;
        self.repository().list_for_simulation(simulation_id)
    }
}
