use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for simulation-related operations
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for SimulationError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => SimulationError::NotFound("Record not found".to_string()),
            _ => SimulationError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;
