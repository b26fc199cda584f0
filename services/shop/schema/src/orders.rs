use sea_orm::entity::prelude::*;

/// Customer order. `status` holds one of the `OrderStatus` strings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub delivery_address: String,
    pub postal_code: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub discount_code_id: Option<i32>,
    pub delivery_person_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::discount_code::Entity",
        from = "Column::DiscountCodeId",
        to = "super::discount_code::Column::Id",
        on_delete = "SetNull"
    )]
    DiscountCode,
    #[sea_orm(
        belongs_to = "super::delivery_person::Entity",
        from = "Column::DeliveryPersonId",
        to = "super::delivery_person::Column::Id",
        on_delete = "SetNull"
    )]
    DeliveryPerson,
    #[sea_orm(has_many = "super::order_pizza::Entity")]
    OrderPizza,
    #[sea_orm(has_many = "super::order_extra_item::Entity")]
    OrderExtraItem,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::discount_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscountCode.def()
    }
}

impl Related<super::delivery_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryPerson.def()
    }
}

impl Related<super::order_pizza::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderPizza.def()
    }
}

impl Related<super::order_extra_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderExtraItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
