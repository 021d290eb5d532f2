use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use std::sync::Arc;

use super::categories_errors::{CategoryError, Result};
use super::categories_model::{Category, NewCategory};
use super::categories_repository::CategoryRepository;

/// Service for managing account categories
pub struct CategoryService {
    repository: CategoryRepository,
}

impl CategoryService {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self {
            repository: CategoryRepository::new(pool),
        }
    }

    /// Creates a new category, rejecting duplicates
    pub fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let category = self.repository.create(new_category)?;
        info!("Created category {}", category.name);
        Ok(category)
    }

    /// Retrieves a category by its ID
    pub fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id)
    }

    /// Retrieves a category by its name
    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.repository.get_by_name(name)
    }

    /// Lists all categories
    pub fn get_categories(&self) -> Result<Vec<Category>> {
        self.repository.list()
    }

    /// Deletes a category, refusing while any simulation references it
    pub fn delete_category(&self, category_id: &str) -> Result<()> {
        let category = self.repository.get_by_id(category_id)?;

        let references = self.repository.count_references(category_id)?;
        if references > 0 {
            return Err(CategoryError::InUse(format!(
                "Category '{}' is referenced by {} simulation(s)",
                category.name, references
            )));
        }

        self.repository.delete(category_id)?;
        info!("Deleted category {}", category.name);
        Ok(())
    }
}
