use chrono::Datelike;
use diesel::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};
use std::sync::Arc;

use super::projection::project_series;
use super::simulations_errors::{Result, SimulationError};
use super::simulations_model::{
    ConsolidatedResult, NewSimulation, Simulation, SimulationDB, SimulationUpdate,
};
use super::simulations_repository::SimulationRepository;
use crate::schema::categories;

/// Service for managing simulations and their derived result series.
///
/// Every mutation that touches a result series runs inside one database
/// transaction: a simulation row is never visible without a complete,
/// up-to-date series.
pub struct SimulationService {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl SimulationService {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn repository(&self) -> SimulationRepository {
        SimulationRepository::new(self.pool.clone())
    }

    fn owned_simulation(&self, user_id: &str, simulation_id: &str) -> Result<Simulation> {
        let simulation = self.repository().get_by_id(simulation_id)?;
        if simulation.user_id != user_id {
            return Err(SimulationError::PermissionDenied(format!(
                "Simulation {} does not belong to the requesting user",
                simulation_id
            )));
        }
        Ok(simulation)
    }

    /// Creates a simulation and its projection series atomically
    pub fn create_simulation(
        &self,
        user_id: &str,
        new_simulation: NewSimulation,
    ) -> Result<Simulation> {
        let current_year = chrono::Utc::now().year();
        new_simulation.validate(current_year)?;

        let params = new_simulation.parameters();
        let mut simulation_db = SimulationDB::from_new(new_simulation, user_id);
        simulation_db.id = uuid::Uuid::new_v4().to_string();

        debug!(
            "Creating simulation '{}' ({} years from {})",
            simulation_db.account_name, simulation_db.period_years, simulation_db.start_year
        );

        let mut conn = self
            .pool
            .get()
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        let simulation: Simulation = conn.transaction::<_, SimulationError, _>(|conn| {
            let known: i64 = categories::table
                .filter(categories::id.eq(&simulation_db.category_id))
                .count()
                .get_result(conn)?;
            if known == 0 {
                return Err(SimulationError::NotFound(format!(
                    "Category with id {} not found",
                    simulation_db.category_id
                )));
            }

            SimulationRepository::insert(conn, &simulation_db)?;

            let series = project_series(&params);
            SimulationRepository::replace_results(
                conn,
                &simulation_db.id,
                &simulation_db.account_name,
                &series,
            )?;

            Ok(simulation_db.clone().into())
        })?;

        info!("Created simulation {}", simulation.id);
        Ok(simulation)
    }

    /// Applies a parameter edit and fully regenerates the result series
    pub fn update_simulation(
        &self,
        user_id: &str,
        update: SimulationUpdate,
    ) -> Result<Simulation> {
        let current_year = chrono::Utc::now().year();
        update.validate(current_year)?;

        let existing = self.owned_simulation(user_id, &update.id)?;
        let params = update.parameters();

        let simulation_db = SimulationDB {
            id: existing.id.clone(),
            user_id: existing.user_id.clone(),
            category_id: update.category_id.clone(),
            account_name: update.account_name.clone(),
            initial_amount: update.initial_amount.to_f64().unwrap_or_default(),
            currency: existing.currency.clone(),
            return_rate: update.return_rate.to_f64().unwrap_or_default(),
            period_years: update.period_years,
            start_year: update.start_year,
            annual_contribution: update.annual_contribution.to_f64().unwrap_or_default(),
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = self
            .pool
            .get()
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        let simulation: Simulation = conn.transaction::<_, SimulationError, _>(|conn| {
            SimulationRepository::update(conn, &simulation_db)?;

            let series = project_series(&params);
            SimulationRepository::replace_results(
                conn,
                &simulation_db.id,
                &simulation_db.account_name,
                &series,
            )?;

            Ok(simulation_db.clone().into())
        })?;

        info!("Regenerated results for simulation {}", simulation.id);
        Ok(simulation)
    }

    /// Deletes a simulation with its result series and real-data entries
    pub fn delete_simulation(&self, user_id: &str, simulation_id: &str) -> Result<()> {
        self.owned_simulation(user_id, simulation_id)?;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, SimulationError, _>(|conn| {
            SimulationRepository::delete_cascade(conn, simulation_id)?;
            Ok(())
        })?;

        info!("Deleted simulation {}", simulation_id);
        Ok(())
    }

    /// Deletes every simulation sharing an account name.
    ///
    /// Refuses when the name is also used by another user's simulations;
    /// a group delete must never silently skip rows.
    pub fn delete_account(&self, user_id: &str, account_name: &str) -> Result<usize> {
        let all = self.repository().list_by_account_name(account_name)?;
        if all.is_empty() {
            return Err(SimulationError::NotFound(format!(
                "No simulations found for account '{}'",
                account_name
            )));
        }

        let owned: Vec<&Simulation> = all.iter().filter(|s| s.user_id == user_id).collect();
        if owned.is_empty() {
            return Err(SimulationError::PermissionDenied(format!(
                "Account '{}' does not belong to the requesting user",
                account_name
            )));
        }
        if owned.len() != all.len() {
            return Err(SimulationError::PermissionDenied(format!(
                "Account '{}' also contains simulations of other users",
                account_name
            )));
        }

        let mut conn = self
            .pool
            .get()
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        let deleted = conn.transaction::<_, SimulationError, _>(|conn| {
            let mut deleted = 0;
            for simulation in &all {
                deleted += SimulationRepository::delete_cascade(conn, &simulation.id)?;
            }
            Ok(deleted)
        })?;

        info!(
            "Deleted account '{}' ({} simulation(s))",
            account_name, deleted
        );
        Ok(deleted)
    }

    /// Retrieves a simulation, enforcing ownership
    pub fn get_simulation(&self, user_id: &str, simulation_id: &str) -> Result<Simulation> {
        self.owned_simulation(user_id, simulation_id)
    }

    /// Lists all simulations of a user
    pub fn get_simulations(&self, user_id: &str) -> Result<Vec<Simulation>> {
        self.repository().list_by_user(user_id)
    }

    /// Distinct account names of a user
    pub fn get_account_names(&self, user_id: &str) -> Result<Vec<String>> {
        self.repository().list_account_names(user_id)
    }

    /// Result series of a simulation, ordered by year
    pub fn get_results(
        &self,
        user_id: &str,
        simulation_id: &str,
    ) -> Result<Vec<ConsolidatedResult>> {
        self.owned_simulation(user_id, simulation_id)?;
        self.repository().results_for_simulation(simulation_id)
    }
}
