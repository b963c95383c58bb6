use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// One review per order item, enforced by a unique index.
    #[sea_orm(unique)]
    pub order_item_id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::orders::item_entity::Entity",
        from = "Column::OrderItemId",
        to = "crate::orders::item_entity::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    OrderItem,
}

impl Related<crate::orders::item_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for super::models::Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            order_item_id: model.order_item_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.into(),
        }
    }
}
