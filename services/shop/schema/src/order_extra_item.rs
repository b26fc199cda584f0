use sea_orm::entity::prelude::*;

/// Dessert or drink line of an order. `is_free` marks the birthday drink.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_extra_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub extra_item_id: i32,
    pub quantity: i32,
    pub is_free: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::extra_item::Entity",
        from = "Column::ExtraItemId",
        to = "super::extra_item::Column::Id"
    )]
    ExtraItem,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::extra_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtraItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
