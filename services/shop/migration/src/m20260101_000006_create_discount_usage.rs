use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscountUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountUsage::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DiscountUsage::UserId).integer().not_null())
                    .col(ColumnDef::new(DiscountUsage::DiscountCodeId).integer().not_null())
                    .col(
                        ColumnDef::new(DiscountUsage::UsedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DiscountUsage::Table, DiscountUsage::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DiscountUsage::Table, DiscountUsage::DiscountCodeId)
                            .to(DiscountCode::Table, DiscountCode::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(DiscountUsage::Table)
                    .col(DiscountUsage::UserId)
                    .col(DiscountUsage::DiscountCodeId)
                    .name("uq_discount_usage_user_code")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountUsage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DiscountUsage {
    Table,
    Id,
    UserId,
    DiscountCodeId,
    UsedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum DiscountCode {
    Table,
    Id,
}
