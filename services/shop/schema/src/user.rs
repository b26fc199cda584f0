use sea_orm::entity::prelude::*;

/// Login account. `role` holds `ADMIN`, `DELIVERY` or `CUSTOMER`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub role: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::customer::Entity")]
    Customer,
    #[sea_orm(has_one = "super::delivery_person::Entity")]
    DeliveryPerson,
    #[sea_orm(has_many = "super::discount_usage::Entity")]
    DiscountUsage,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::delivery_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryPerson.def()
    }
}

impl Related<super::discount_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscountUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
