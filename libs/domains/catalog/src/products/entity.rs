use crate::categories::models::Category;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_hash: Option<String>,
    pub price: f64,
    pub discount: i32,
    pub stock: i32,
    pub is_available: bool,
    pub is_new: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::categories::entity::Entity",
        from = "Column::CategoryId",
        to = "crate::categories::entity::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "crate::orders::item_entity::Entity")]
    OrderItems,
}

impl Related<crate::categories::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<crate::orders::item_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain product, attaching the already resolved category.
    pub fn into_domain(self, category: Option<Category>) -> super::models::Product {
        super::models::Product {
            id: self.id,
            name: self.name,
            description: self.description,
            image_hash: self.image_hash,
            price: self.price,
            discount: self.discount,
            stock: self.stock,
            is_available: self.is_available,
            is_new: self.is_new,
            category,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}
