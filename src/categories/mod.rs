// Module declarations
pub(crate) mod categories_constants;
pub(crate) mod categories_errors;
pub(crate) mod categories_model;
pub(crate) mod categories_repository;
pub(crate) mod categories_service;

// Re-export the public interface
pub use categories_constants::*;
pub use categories_model::{Category, CategoryDB, NewCategory};
pub use categories_repository::CategoryRepository;
pub use categories_service::CategoryService;

// Re-export error types for convenience
pub use categories_errors::{CategoryError, Result};
