use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::categories_errors::{CategoryError, Result};
use super::categories_model::{Category, CategoryDB, NewCategory};
use crate::db::get_connection;
use crate::schema::{categories, simulations};

/// Repository for managing category data in the database
pub struct CategoryRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Creates a new category in the database
    pub fn create(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let existing: Option<CategoryDB> = categories::table
            .filter(categories::name.eq(&new_category.name))
            .first::<CategoryDB>(&mut conn)
            .optional()?;

        if existing.is_some() {
            return Err(CategoryError::DuplicateEntity(new_category.name));
        }

        let mut category_db: CategoryDB = new_category.into();
        category_db.id = uuid::Uuid::new_v4().to_string();

        diesel::insert_into(categories::table)
            .values(&category_db)
            .execute(&mut conn)?;

        Ok(category_db.into())
    }

    /// Retrieves a category by its ID
    pub fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let category = categories::table
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    CategoryError::NotFound(format!("Category with id {} not found", category_id))
                }
                _ => CategoryError::DatabaseError(e.to_string()),
            })?;

        Ok(category.into())
    }

    /// Retrieves a category by its name
    pub fn get_by_name(&self, category_name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let category = categories::table
            .filter(categories::name.eq(category_name))
            .first::<CategoryDB>(&mut conn)
            .optional()?;

        Ok(category.map(Category::from))
    }

    /// Lists all categories ordered by name
    pub fn list(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        categories::table
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Category::from).collect())
    }

    /// Counts the simulations that reference a category
    pub fn count_references(&self, category_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let count = simulations::table
            .filter(simulations::category_id.eq(category_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    /// Deletes a category by its ID
    pub fn delete(&self, category_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let affected =
            diesel::delete(categories::table.find(category_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(CategoryError::NotFound(format!(
                "Category with id {} not found",
                category_id
            )));
        }

        Ok(affected)
    }
}
