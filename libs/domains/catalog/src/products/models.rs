use crate::categories::models::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A catalog product with its resolved category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_hash: Option<String>,
    pub price: f64,
    /// Discount percentage. Only values in 1..=100 affect the price.
    pub discount: i32,
    pub stock: i32,
    pub is_available: bool,
    pub is_new: bool,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            image_hash: input.image_hash,
            price: input.price,
            discount: input.discount,
            stock: input.stock,
            is_available: input.is_available,
            is_new: input.is_new,
            category: Some(category),
            created_at: now,
            updated_at: now,
        }
    }

    /// Price after the discount is applied.
    ///
    /// A discount outside 1..=100 leaves the price unmodified.
    pub fn discounted_price(&self) -> f64 {
        if self.discount <= 0 || self.discount > 100 {
            return self.price;
        }
        self.price * (1.0 - f64::from(self.discount) / 100.0)
    }

    /// Replace all mutable fields from an update request.
    ///
    /// `is_new` is set at creation only and never changes here. The category
    /// is replaced only when the caller resolved a new one.
    pub fn apply_update(&mut self, update: UpdateProduct, category: Option<Category>) {
        self.name = update.name;
        self.description = update.description;
        self.image_hash = update.image_hash;
        self.price = update.price;
        self.discount = update.discount;
        self.stock = update.stock;
        self.is_available = update.is_available;
        if let Some(category) = category {
            self.category = Some(category);
        }
        self.updated_at = Utc::now();
    }
}

/// Response shape for products, with the discount already computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_hash: Option<String>,
    pub price: f64,
    pub discounted_price: f64,
    pub discount: i32,
    pub stock: i32,
    pub is_available: bool,
    pub is_new: bool,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        let discounted_price = product.discounted_price();
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image_hash: product.image_hash,
            price: product.price,
            discounted_price,
            discount: product.discount,
            stock: product.stock,
            is_available: product.is_available,
            is_new: product.is_new,
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image_hash: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "discount must be 0-100"))]
    pub discount: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default = "default_true")]
    pub is_new: bool,
}

/// Full replacement of a product's mutable fields.
///
/// There is intentionally no `is_new` field; the flag is fixed at creation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image_hash: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "discount must be 0-100"))]
    pub discount: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Move the product to another category when present.
    pub category_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::models::CreateCategory;

    fn category() -> Category {
        Category::new(CreateCategory {
            name: "Figures".into(),
            image_hash: None,
        })
    }

    fn product(price: f64, discount: i32) -> Product {
        Product::new(
            CreateProduct {
                name: "Darth Vader".into(),
                description: String::new(),
                image_hash: None,
                price,
                discount,
                stock: 10,
                is_available: true,
                is_new: true,
            },
            category(),
        )
    }

    #[test]
    fn test_discounted_price_applies_percentage() {
        let p = product(100.0, 25);
        assert!((p.discounted_price() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_discount_zero_keeps_price() {
        let p = product(100.0, 0);
        assert_eq!(p.discounted_price(), 100.0);
    }

    #[test]
    fn test_discount_above_hundred_keeps_price() {
        let p = product(100.0, 101);
        assert_eq!(p.discounted_price(), 100.0);
    }

    #[test]
    fn test_discount_negative_keeps_price() {
        let p = product(100.0, -5);
        assert_eq!(p.discounted_price(), 100.0);
    }

    #[test]
    fn test_discount_full_makes_price_zero() {
        let p = product(80.0, 100);
        assert_eq!(p.discounted_price(), 0.0);
    }

    #[test]
    fn test_update_preserves_is_new() {
        let mut p = product(100.0, 0);
        assert!(p.is_new);

        p.apply_update(
            UpdateProduct {
                name: "Luke Skywalker".into(),
                description: "Limited edition".into(),
                image_hash: None,
                price: 50.0,
                discount: 10,
                stock: 3,
                is_available: false,
                category_id: None,
            },
            None,
        );

        assert!(p.is_new);
        assert_eq!(p.name, "Luke Skywalker");
        assert_eq!(p.price, 50.0);
        assert!(!p.is_available);
    }

    #[test]
    fn test_update_keeps_category_when_none_given() {
        let mut p = product(100.0, 0);
        let original = p.category.clone();

        p.apply_update(
            UpdateProduct {
                name: "Luke Skywalker".into(),
                description: String::new(),
                image_hash: None,
                price: 50.0,
                discount: 0,
                stock: 3,
                is_available: true,
                category_id: None,
            },
            None,
        );

        assert_eq!(p.category, original);
    }

    #[test]
    fn test_dto_carries_discounted_price() {
        let dto: ProductDto = product(200.0, 50).into();
        assert!((dto.discounted_price - 100.0).abs() < f64::EPSILON);
        assert_eq!(dto.price, 200.0);
    }

    #[test]
    fn test_create_rejects_out_of_range_discount() {
        let input = CreateProduct {
            name: "Darth Vader".into(),
            description: String::new(),
            image_hash: None,
            price: 10.0,
            discount: 150,
            stock: 0,
            is_available: true,
            is_new: true,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let input = CreateProduct {
            name: "Darth Vader".into(),
            description: String::new(),
            image_hash: None,
            price: -1.0,
            discount: 0,
            stock: 0,
            is_available: true,
            is_new: true,
        };
        assert!(input.validate().is_err());
    }
}
