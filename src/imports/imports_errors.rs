use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for CSV import/export operations
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },
    #[error("Invalid file: {0}")]
    InvalidFile(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for ImportError {
    fn from(err: DieselError) -> Self {
        ImportError::DatabaseError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::InvalidFile(err.to_string())
    }
}
