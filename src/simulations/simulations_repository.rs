use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::projection::ProjectionPoint;
use super::simulations_errors::{Result, SimulationError};
use super::simulations_model::{
    ConsolidatedResult, ConsolidatedResultDB, Simulation, SimulationDB,
};
use crate::comparison::ResultPoint;
use crate::db::get_connection;
use crate::schema::{categories, consolidated_results, real_account_data, simulations};

/// Repository for managing simulation data in the database
pub struct SimulationRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl SimulationRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Retrieves a simulation by its ID
    pub fn get_by_id(&self, simulation_id: &str) -> Result<Simulation> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        let simulation = simulations::table
            .find(simulation_id)
            .first::<SimulationDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => SimulationError::NotFound(format!(
                    "Simulation with id {} not found",
                    simulation_id
                )),
                _ => SimulationError::DatabaseError(e.to_string()),
            })?;

        Ok(simulation.into())
    }

    /// Lists all simulations belonging to a user, ordered by account name
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<Simulation>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        simulations::table
            .filter(simulations::user_id.eq(user_id))
            .order(simulations::account_name.asc())
            .load::<SimulationDB>(&mut conn)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Simulation::from).collect())
    }

    /// Lists every simulation sharing an account name, regardless of owner.
    ///
    /// Account names are not unique per user, so group deletion has to see
    /// other users' rows to refuse partial removals.
    pub fn list_by_account_name(&self, account_name: &str) -> Result<Vec<Simulation>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        simulations::table
            .filter(simulations::account_name.eq(account_name))
            .load::<SimulationDB>(&mut conn)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(Simulation::from).collect())
    }

    /// Distinct account names for a user
    pub fn list_account_names(&self, user_id: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        simulations::table
            .filter(simulations::user_id.eq(user_id))
            .select(simulations::account_name)
            .distinct()
            .order(simulations::account_name.asc())
            .load::<String>(&mut conn)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))
    }

    /// Result series for one simulation, ordered by year
    pub fn results_for_simulation(&self, simulation_id: &str) -> Result<Vec<ConsolidatedResult>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        consolidated_results::table
            .filter(consolidated_results::simulation_id.eq(simulation_id))
            .order(consolidated_results::year.asc())
            .load::<ConsolidatedResultDB>(&mut conn)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))
            .map(|rows| rows.into_iter().map(ConsolidatedResult::from).collect())
    }

    /// Result rows joined with their simulation's category and account name,
    /// optionally narrowed to one category or one account name.
    pub fn list_result_points(
        &self,
        user_id: &str,
        category_name: Option<&str>,
        account_name: Option<&str>,
    ) -> Result<Vec<ResultPoint>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        let mut query = consolidated_results::table
            .inner_join(simulations::table.inner_join(categories::table))
            .select((
                consolidated_results::simulation_id,
                simulations::account_name,
                categories::name,
                consolidated_results::year,
                consolidated_results::amount,
            ))
            .filter(simulations::user_id.eq(user_id))
            .order((
                consolidated_results::year.asc(),
                simulations::account_name.asc(),
            ))
            .into_boxed();

        if let Some(name) = category_name {
            query = query.filter(categories::name.eq(name.to_string()));
        }
        if let Some(name) = account_name {
            query = query.filter(simulations::account_name.eq(name.to_string()));
        }

        let rows = query
            .load::<(String, String, String, i32, f64)>(&mut conn)
            .map_err(|e| SimulationError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(simulation_id, account, category, year, amount)| ResultPoint {
                simulation_id,
                account_name: account,
                category,
                year,
                amount: Decimal::from_f64_retain(amount).unwrap_or_default(),
            })
            .collect())
    }

    // In-transaction helpers. These take the borrowed connection so the
    // service can compose them inside a single atomic unit.

    pub fn insert(conn: &mut SqliteConnection, simulation: &SimulationDB) -> Result<()> {
        diesel::insert_into(simulations::table)
            .values(simulation)
            .execute(conn)?;
        Ok(())
    }

    pub fn update(conn: &mut SqliteConnection, simulation: &SimulationDB) -> Result<()> {
        diesel::update(simulations::table.find(&simulation.id))
            .set(simulation)
            .execute(conn)?;
        Ok(())
    }

    /// Replaces the whole result series of a simulation.
    ///
    /// Always delete-then-insert: a shorter new period must not leave
    /// orphaned future-year rows behind.
    pub fn replace_results(
        conn: &mut SqliteConnection,
        simulation_id: &str,
        account_name: &str,
        series: &[ProjectionPoint],
    ) -> Result<()> {
        diesel::delete(
            consolidated_results::table
                .filter(consolidated_results::simulation_id.eq(simulation_id)),
        )
        .execute(conn)?;

        let rows: Vec<ConsolidatedResultDB> = series
            .iter()
            .map(|point| ConsolidatedResultDB {
                id: Uuid::new_v4().to_string(),
                simulation_id: simulation_id.to_string(),
                year: point.year,
                amount: point.amount.to_f64().unwrap_or_default(),
                account_name: account_name.to_string(),
            })
            .collect();

        diesel::insert_into(consolidated_results::table)
            .values(&rows)
            .execute(conn)?;

        Ok(())
    }

    /// Removes a simulation together with its derived and observed rows.
    pub fn delete_cascade(conn: &mut SqliteConnection, simulation_id: &str) -> Result<usize> {
        diesel::delete(
            real_account_data::table.filter(real_account_data::simulation_id.eq(simulation_id)),
        )
        .execute(conn)?;

        diesel::delete(
            consolidated_results::table
                .filter(consolidated_results::simulation_id.eq(simulation_id)),
        )
        .execute(conn)?;

        let affected =
            diesel::delete(simulations::table.find(simulation_id)).execute(conn)?;

        Ok(affected)
    }
}
