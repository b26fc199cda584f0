use sea_orm::entity::prelude::*;

/// Pizza topping with its unit cost and dietary flags.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost: Decimal,
    pub has_meat: bool,
    pub has_animal_products: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pizza_ingredient::Entity")]
    PizzaIngredient,
}

impl Related<super::pizza_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PizzaIngredient.def()
    }
}

impl Related<super::pizza::Entity> for Entity {
    fn to() -> RelationDef {
        super::pizza_ingredient::Relation::Pizza.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::pizza_ingredient::Relation::Ingredient.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
