use sea_orm::entity::prelude::*;

/// Dessert or drink sold at a flat price. `category` is `dessert` or `drink`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "extra_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_extra_item::Entity")]
    OrderExtraItem,
}

impl Related<super::order_extra_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderExtraItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
