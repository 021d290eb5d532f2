use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::categories_constants::ACCOUNT_CLASSES;
use super::categories_errors::{CategoryError, Result};

/// Domain model representing an account category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    /// Validates the new category against the fixed set of account classes
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::InvalidData(
                "Category name cannot be empty".to_string(),
            ));
        }
        if !ACCOUNT_CLASSES.contains(&self.name.as_str()) {
            return Err(CategoryError::InvalidData(format!(
                "Unknown account class '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

/// Database model for categories
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            created_at: db.created_at,
        }
    }
}

impl From<NewCategory> for CategoryDB {
    fn from(domain: NewCategory) -> Self {
        Self {
            id: String::new(),
            name: domain.name,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_account_class_is_accepted() {
        let input = NewCategory {
            name: "Assurance Vie".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn unknown_account_class_is_rejected() {
        let input = NewCategory {
            name: "Crypto".to_string(),
        };
        assert!(matches!(
            input.validate(),
            Err(CategoryError::InvalidData(_))
        ));
    }
}
