use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column order of the simulation exchange format.
pub const SIMULATION_CSV_HEADERS: [&str; 8] = [
    "categorie",
    "nom_compte",
    "montant_initial",
    "currency",
    "taux_rentabilite",
    "periode",
    "annee_depart",
    "montant_fixe_annuel",
];

/// Column order of the real-data exchange format.
pub const REAL_DATA_CSV_HEADERS: [&str; 4] =
    ["nom_compte", "annee", "montant_reel", "taux_inflation"];

/// Parses a number written with a decimal comma ("1234,56").
pub fn parse_decimal_comma(value: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(&value.trim().replace(',', "."))
}

/// Formats a number with a decimal comma, the way the files are written.
pub fn format_decimal_comma(value: &Decimal) -> String {
    value.to_string().replace('.', ",")
}

/// One validated simulation row of an exchange file
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationCsvRow {
    pub category: String,
    pub account_name: String,
    pub initial_amount: Decimal,
    pub currency: String,
    pub return_rate: Decimal,
    pub period_years: i32,
    pub start_year: i32,
    pub annual_contribution: Decimal,
}

/// Raw simulation row as read from the file, before number conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationCsvRecord {
    pub categorie: String,
    pub nom_compte: String,
    pub montant_initial: String,
    pub currency: String,
    pub taux_rentabilite: String,
    pub periode: String,
    pub annee_depart: String,
    pub montant_fixe_annuel: String,
}

/// One validated real-data row of an exchange file
#[derive(Debug, Clone, PartialEq)]
pub struct RealDataCsvRow {
    pub account_name: String,
    pub year: i32,
    pub nominal_amount: Decimal,
    pub inflation_rate: Decimal,
}

/// Raw real-data row as read from the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealDataCsvRecord {
    pub nom_compte: String,
    pub annee: String,
    pub montant_reel: String,
    pub taux_inflation: String,
}

/// Outcome of a real-data import: unmatched rows are skipped with a
/// warning, not treated as a failure of the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealDataImportReport {
    pub imported: usize,
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_comma_round_trips() {
        assert_eq!(parse_decimal_comma("1234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal_comma(" 5 ").unwrap(), dec!(5));
        assert_eq!(format_decimal_comma(&dec!(1234.56)), "1234,56");
        assert_eq!(format_decimal_comma(&dec!(10000)), "10000");
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        assert!(parse_decimal_comma("12,34,56").is_err());
        assert!(parse_decimal_comma("abc").is_err());
    }
}
