use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub image_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            image_hash: input.image_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateCategory) {
        self.name = update.name;
        self.image_hash = update.image_hash;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub image_hash: Option<String>,
}

/// Full replacement of a category's mutable fields.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub image_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_timestamps() {
        let category = Category::new(CreateCategory {
            name: "Figures".into(),
            image_hash: None,
        });
        assert_eq!(category.name, "Figures");
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_apply_update_replaces_fields() {
        let mut category = Category::new(CreateCategory {
            name: "Figures".into(),
            image_hash: Some("abc".into()),
        });
        category.apply_update(UpdateCategory {
            name: "Plushies".into(),
            image_hash: None,
        });
        assert_eq!(category.name, "Plushies");
        assert_eq!(category.image_hash, None);
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let input = CreateCategory {
            name: String::new(),
            image_hash: None,
        };
        assert!(input.validate().is_err());
    }
}
