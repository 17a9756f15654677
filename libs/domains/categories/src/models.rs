use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Category entity - represents a product category stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Category name (trimmed, unique)
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(max = 32))]
    #[serde(default)]
    pub name: String,
}

/// DTO for renaming an existing category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(max = 32))]
    #[serde(default)]
    pub name: String,
}

impl Category {
    /// Create a new category; the name is stored trimmed
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category
    pub fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let category = Category::new("  Electronics  ");
        assert_eq!(category.name, "Electronics");
    }

    #[test]
    fn test_rename_bumps_updated_at() {
        let mut category = Category::new("Books");
        let before = category.updated_at;
        category.rename("Novels");
        assert_eq!(category.name, "Novels");
        assert!(category.updated_at >= before);
    }
}
