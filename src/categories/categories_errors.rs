use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for category-related operations
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    DuplicateEntity(String),
    #[error("Category in use: {0}")]
    InUse(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for CategoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => CategoryError::NotFound("Record not found".to_string()),
            _ => CategoryError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for category operations
pub type Result<T> = std::result::Result<T, CategoryError>;
