use sea_orm::entity::prelude::*;

/// Menu pizza. Price and diet are derived from its ingredients.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pizza")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pizza_ingredient::Entity")]
    PizzaIngredient,
    #[sea_orm(has_many = "super::order_pizza::Entity")]
    OrderPizza,
}

impl Related<super::pizza_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PizzaIngredient.def()
    }
}

impl Related<super::order_pizza::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderPizza.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        super::pizza_ingredient::Relation::Ingredient.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::pizza_ingredient::Relation::Pizza.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
