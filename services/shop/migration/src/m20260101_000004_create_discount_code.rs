use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscountCode::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountCode::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DiscountCode::Code).string_len(50).not_null().unique_key())
                    .col(
                        ColumnDef::new(DiscountCode::DiscountPercentage)
                            .integer()
                            .not_null()
                            .check(Expr::col(DiscountCode::DiscountPercentage).between(1, 100)),
                    )
                    .col(
                        ColumnDef::new(DiscountCode::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountCode::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DiscountCode {
    Table,
    Id,
    Code,
    DiscountPercentage,
    IsActive,
}
