use chrono::Datelike;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::imports_errors::ImportError;
use super::imports_model::{
    format_decimal_comma, parse_decimal_comma, RealDataCsvRecord, RealDataCsvRow,
    RealDataImportReport, SimulationCsvRecord, SimulationCsvRow, REAL_DATA_CSV_HEADERS,
    SIMULATION_CSV_HEADERS,
};
use crate::categories::CategoryRepository;
use crate::errors::{Error, Result};
use crate::real_data::{adjust_for_inflation, RealDataRepository};
use crate::simulations::{
    project_series, NewSimulation, Simulation, SimulationDB, SimulationRepository,
};

/// CSV exchange for simulations and real data.
///
/// Files are semicolon-delimited with decimal commas. A simulation file
/// is validated completely before the first write and imported in one
/// transaction; a real-data file skips unmatched accounts with a warning
/// instead of failing.
pub struct ImportService {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ImportService {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Parses and converts a simulation file, reporting the first bad row
    pub fn parse_simulations(
        content: &str,
    ) -> std::result::Result<Vec<SimulationCsvRow>, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (idx, record) in reader.deserialize::<SimulationCsvRecord>().enumerate() {
            // Row numbers are file lines; line 1 is the header
            let row = idx + 2;
            let record = record.map_err(|e| ImportError::InvalidRow {
                row,
                message: e.to_string(),
            })?;

            let parse_number = |field: &str, value: &str| {
                parse_decimal_comma(value).map_err(|_| ImportError::InvalidRow {
                    row,
                    message: format!("Invalid number '{}' in column {}", value, field),
                })
            };
            let parse_int = |field: &str, value: &str| {
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ImportError::InvalidRow {
                        row,
                        message: format!("Invalid integer '{}' in column {}", value, field),
                    })
            };

            rows.push(SimulationCsvRow {
                category: record.categorie,
                account_name: record.nom_compte,
                initial_amount: parse_number("montant_initial", &record.montant_initial)?,
                currency: record.currency,
                return_rate: parse_number("taux_rentabilite", &record.taux_rentabilite)?,
                period_years: parse_int("periode", &record.periode)?,
                start_year: parse_int("annee_depart", &record.annee_depart)?,
                annual_contribution: parse_number(
                    "montant_fixe_annuel",
                    &record.montant_fixe_annuel,
                )?,
            });
        }

        Ok(rows)
    }

    /// Imports a simulation file for a user: all rows or none.
    ///
    /// Every row is validated (category existence, currency, parameter
    /// ranges) before anything is written; the inserts and the generated
    /// result series then share a single transaction.
    pub fn import_simulations(&self, user_id: &str, content: &str) -> Result<Vec<Simulation>> {
        let rows = Self::parse_simulations(content).map_err(Error::Import)?;
        let current_year = chrono::Utc::now().year();

        let categories: HashMap<String, String> = CategoryRepository::new(self.pool.clone())
            .list()
            .map_err(Error::Category)?
            .into_iter()
            .map(|c| (c.name, c.id))
            .collect();

        let mut validated = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 2;

            let category_id = categories.get(&row.category).ok_or_else(|| {
                Error::Import(ImportError::InvalidRow {
                    row: row_number,
                    message: format!("Unknown category '{}'", row.category),
                })
            })?;

            let new_simulation = NewSimulation {
                category_id: category_id.clone(),
                account_name: row.account_name,
                initial_amount: row.initial_amount,
                currency: row.currency,
                return_rate: row.return_rate,
                period_years: row.period_years,
                start_year: row.start_year,
                annual_contribution: row.annual_contribution,
            };
            new_simulation.validate(current_year).map_err(|e| {
                Error::Import(ImportError::InvalidRow {
                    row: row_number,
                    message: e.to_string(),
                })
            })?;

            validated.push(new_simulation);
        }

        let mut conn = self.pool.get().map_err(Error::from)?;
        let imported = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut imported = Vec::with_capacity(validated.len());
            for new_simulation in validated.drain(..) {
                let params = new_simulation.parameters();
                let mut simulation_db = SimulationDB::from_new(new_simulation, user_id);
                simulation_db.id = uuid::Uuid::new_v4().to_string();

                SimulationRepository::insert(conn, &simulation_db)
                    .map_err(|_| diesel::result::Error::RollbackTransaction)?;

                let series = project_series(&params);
                SimulationRepository::replace_results(
                    conn,
                    &simulation_db.id,
                    &simulation_db.account_name,
                    &series,
                )
                .map_err(|_| diesel::result::Error::RollbackTransaction)?;

                imported.push(Simulation::from(simulation_db));
            }
            Ok(imported)
        })?;

        info!("Imported {} simulation(s) for {}", imported.len(), user_id);
        Ok(imported)
    }

    /// Exports a user's simulations, optionally narrowed to one category
    /// or one account name. One row per simulation, import-compatible.
    pub fn export_simulations(
        &self,
        user_id: &str,
        category_name: Option<&str>,
        account_name: Option<&str>,
    ) -> Result<String> {
        let category_names: HashMap<String, String> =
            CategoryRepository::new(self.pool.clone())
                .list()
                .map_err(Error::Category)?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

        let simulations = SimulationRepository::new(self.pool.clone())
            .list_by_user(user_id)
            .map_err(Error::Simulation)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(Vec::new());

        writer
            .write_record(SIMULATION_CSV_HEADERS)
            .map_err(|e| Error::Import(ImportError::from(e)))?;

        for simulation in simulations {
            let category = category_names
                .get(&simulation.category_id)
                .cloned()
                .unwrap_or_default();

            if category_name.is_some_and(|name| name != category) {
                continue;
            }
            if account_name.is_some_and(|name| name != simulation.account_name) {
                continue;
            }

            writer
                .write_record([
                    category.as_str(),
                    simulation.account_name.as_str(),
                    format_decimal_comma(&simulation.initial_amount).as_str(),
                    simulation.currency.as_str(),
                    format_decimal_comma(&simulation.return_rate).as_str(),
                    simulation.period_years.to_string().as_str(),
                    simulation.start_year.to_string().as_str(),
                    format_decimal_comma(&simulation.annual_contribution).as_str(),
                ])
                .map_err(|e| Error::Import(ImportError::from(e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Import(ImportError::InvalidFile(e.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::Import(ImportError::InvalidFile(e.to_string())))
    }

    /// Parses a real-data file, reporting the first bad row
    pub fn parse_real_data(
        content: &str,
    ) -> std::result::Result<Vec<RealDataCsvRow>, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (idx, record) in reader.deserialize::<RealDataCsvRecord>().enumerate() {
            let row = idx + 2;
            let record = record.map_err(|e| ImportError::InvalidRow {
                row,
                message: e.to_string(),
            })?;

            rows.push(RealDataCsvRow {
                account_name: record.nom_compte,
                year: record.annee.trim().parse::<i32>().map_err(|_| {
                    ImportError::InvalidRow {
                        row,
                        message: format!("Invalid integer '{}' in column annee", record.annee),
                    }
                })?,
                nominal_amount: parse_decimal_comma(&record.montant_reel).map_err(|_| {
                    ImportError::InvalidRow {
                        row,
                        message: format!(
                            "Invalid number '{}' in column montant_reel",
                            record.montant_reel
                        ),
                    }
                })?,
                inflation_rate: parse_decimal_comma(&record.taux_inflation).map_err(|_| {
                    ImportError::InvalidRow {
                        row,
                        message: format!(
                            "Invalid number '{}' in column taux_inflation",
                            record.taux_inflation
                        ),
                    }
                })?,
            });
        }

        Ok(rows)
    }

    /// Imports a real-data file for a user.
    ///
    /// Rows are matched to simulations by (account name, user). Unmatched
    /// or ambiguous names are skipped with a warning; matched rows upsert
    /// the (simulation, year) entry with the file's rate.
    pub fn import_real_data(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<RealDataImportReport> {
        let rows = Self::parse_real_data(content).map_err(Error::Import)?;

        let mut simulations_by_name: HashMap<String, Vec<String>> = HashMap::new();
        for simulation in SimulationRepository::new(self.pool.clone())
            .list_by_user(user_id)
            .map_err(Error::Simulation)?
        {
            simulations_by_name
                .entry(simulation.account_name.clone())
                .or_default()
                .push(simulation.id);
        }

        let mut report = RealDataImportReport::default();
        let mut matched = Vec::with_capacity(rows.len());

        for row in rows {
            match simulations_by_name.get(&row.account_name) {
                Some(ids) if ids.len() == 1 => matched.push((ids[0].clone(), row)),
                Some(_) => {
                    warn!("Ambiguous account name in import: {}", row.account_name);
                    report
                        .skipped
                        .push(format!("Ambiguous account name: {}", row.account_name));
                }
                None => {
                    warn!("Account not found in import: {}", row.account_name);
                    report
                        .skipped
                        .push(format!("Account not found: {}", row.account_name));
                }
            }
        }

        let mut conn = self.pool.get().map_err(Error::from)?;
        let imported = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut imported = 0;
            for (simulation_id, row) in &matched {
                let adjusted = adjust_for_inflation(row.nominal_amount, row.inflation_rate);
                RealDataRepository::upsert_tx(
                    conn,
                    simulation_id,
                    row.year,
                    row.nominal_amount,
                    row.inflation_rate,
                    adjusted,
                )?;
                imported += 1;
            }
            Ok(imported)
        })?;

        report.imported = imported;
        info!(
            "Imported {} real-data entr(ies) for {}, {} skipped",
            report.imported,
            user_id,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Exports all of a user's real-data entries, import-compatible
    pub fn export_real_data(&self, user_id: &str) -> Result<String> {
        let points = RealDataRepository::new(self.pool.clone()).list_points_for_user(user_id)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(Vec::new());

        writer
            .write_record(REAL_DATA_CSV_HEADERS)
            .map_err(|e| Error::Import(ImportError::from(e)))?;

        for point in points {
            writer
                .write_record([
                    point.account_name.as_str(),
                    point.year.to_string().as_str(),
                    format_decimal_comma(&point.nominal_amount).as_str(),
                    format_decimal_comma(&point.inflation_rate).as_str(),
                ])
                .map_err(|e| Error::Import(ImportError::from(e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Import(ImportError::InvalidFile(e.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::Import(ImportError::InvalidFile(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SIMULATIONS_FILE: &str = "\
categorie;nom_compte;montant_initial;currency;taux_rentabilite;periode;annee_depart;montant_fixe_annuel
Courant;Livret A;10000,00;EUR;3,0;10;2024;1000,00
Epargne Financière;PEA;5000;EUR;7,5;20;2024;2400
";

    #[test]
    fn a_well_formed_simulation_file_is_parsed() {
        let rows = ImportService::parse_simulations(SIMULATIONS_FILE).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Courant");
        assert_eq!(rows[0].account_name, "Livret A");
        assert_eq!(rows[0].initial_amount, dec!(10000.00));
        assert_eq!(rows[0].return_rate, dec!(3.0));
        assert_eq!(rows[1].period_years, 20);
        assert_eq!(rows[1].annual_contribution, dec!(2400));
    }

    #[test]
    fn a_malformed_number_reports_its_row() {
        let content = "\
categorie;nom_compte;montant_initial;currency;taux_rentabilite;periode;annee_depart;montant_fixe_annuel
Courant;Livret A;10000,00;EUR;3,0;10;2024;1000,00
Courant;PEL;pas-un-nombre;EUR;2,0;10;2024;0
";
        let err = ImportService::parse_simulations(content).unwrap_err();

        match err {
            ImportError::InvalidRow { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("montant_initial"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn a_real_data_file_is_parsed() {
        let content = "\
nom_compte;annee;montant_reel;taux_inflation
Livret A;2024;10250,50;2,5
Livret A;2025;10600;1,8
";
        let rows = ImportService::parse_real_data(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2024);
        assert_eq!(rows[0].nominal_amount, dec!(10250.50));
        assert_eq!(rows[1].inflation_rate, dec!(1.8));
    }

    #[test]
    fn a_bad_year_reports_its_row() {
        let content = "\
nom_compte;annee;montant_reel;taux_inflation
Livret A;deux-mille;100;0
";
        let err = ImportService::parse_real_data(content).unwrap_err();

        assert!(matches!(err, ImportError::InvalidRow { row: 2, .. }));
    }
}
