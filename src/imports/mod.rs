// Module declarations
pub(crate) mod imports_errors;
pub(crate) mod imports_model;
pub(crate) mod imports_service;

// Re-export the public interface
pub use imports_model::{
    format_decimal_comma, parse_decimal_comma, RealDataCsvRow, RealDataImportReport,
    SimulationCsvRow, REAL_DATA_CSV_HEADERS, SIMULATION_CSV_HEADERS,
};
pub use imports_service::ImportService;

// Re-export error types for convenience
pub use imports_errors::ImportError;
