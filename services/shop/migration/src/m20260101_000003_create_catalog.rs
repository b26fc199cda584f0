use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ingredient::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ingredient::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ingredient::Name).string_len(255).not_null().unique_key())
                    .col(
                        ColumnDef::new(Ingredient::Cost)
                            .decimal_len(10, 2)
                            .not_null()
                            .check(Expr::col(Ingredient::Cost).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Ingredient::HasMeat)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Ingredient::HasAnimalProducts)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pizza::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pizza::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pizza::Name).string_len(255).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PizzaIngredient::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PizzaIngredient::PizzaId).integer().not_null())
                    .col(ColumnDef::new(PizzaIngredient::IngredientId).integer().not_null())
                    .col(
                        ColumnDef::new(PizzaIngredient::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(PizzaIngredient::PizzaId)
                            .col(PizzaIngredient::IngredientId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PizzaIngredient::Table, PizzaIngredient::PizzaId)
                            .to(Pizza::Table, Pizza::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PizzaIngredient::Table, PizzaIngredient::IngredientId)
                            .to(Ingredient::Table, Ingredient::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExtraItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExtraItem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExtraItem::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(ExtraItem::Category)
                            .string_len(16)
                            .not_null()
                            .check(Expr::col(ExtraItem::Category).is_in(["dessert", "drink"])),
                    )
                    .col(
                        ColumnDef::new(ExtraItem::Price)
                            .decimal_len(10, 2)
                            .not_null()
                            .check(Expr::col(ExtraItem::Price).gte(0)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExtraItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PizzaIngredient::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pizza::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ingredient::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ingredient {
    Table,
    Id,
    Name,
    Cost,
    HasMeat,
    HasAnimalProducts,
}

#[derive(Iden)]
enum Pizza {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum PizzaIngredient {
    Table,
    PizzaId,
    IngredientId,
    Position,
}

#[derive(Iden)]
enum ExtraItem {
    Table,
    Id,
    Name,
    Category,
    Price,
}
