use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Orders::DeliveryAddress).string_len(256).not_null())
                    .col(ColumnDef::new(Orders::PostalCode).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(32)
                            .not_null()
                            .default("IN_PROGRESS")
                            .check(Expr::col(Orders::Status).is_in([
                                "IN_PROGRESS",
                                "OUT_FOR_DELIVERY",
                                "DELIVERED",
                                "FAILED",
                            ])),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Orders::DiscountCodeId).integer().null())
                    .col(ColumnDef::new(Orders::DeliveryPersonId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::DiscountCodeId)
                            .to(DiscountCode::Table, DiscountCode::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::DeliveryPersonId)
                            .to(DeliveryPerson::Table, DeliveryPerson::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderPizza::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderPizza::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderPizza::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderPizza::PizzaId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderPizza::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(OrderPizza::Quantity).gte(1)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderPizza::Table, OrderPizza::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderPizza::Table, OrderPizza::PizzaId)
                            .to(Pizza::Table, Pizza::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderExtraItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderExtraItem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderExtraItem::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderExtraItem::ExtraItemId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderExtraItem::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(OrderExtraItem::Quantity).gte(1)),
                    )
                    .col(
                        ColumnDef::new(OrderExtraItem::IsFree)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderExtraItem::Table, OrderExtraItem::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderExtraItem::Table, OrderExtraItem::ExtraItemId)
                            .to(ExtraItem::Table, ExtraItem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderExtraItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderPizza::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    CustomerId,
    DeliveryAddress,
    PostalCode,
    Status,
    CreatedAt,
    DiscountCodeId,
    DeliveryPersonId,
}

#[derive(Iden)]
enum OrderPizza {
    Table,
    Id,
    OrderId,
    PizzaId,
    Quantity,
}

#[derive(Iden)]
enum OrderExtraItem {
    Table,
    Id,
    OrderId,
    ExtraItemId,
    Quantity,
    IsFree,
}

#[derive(Iden)]
enum Customer {
    Table,
    Id,
}

#[derive(Iden)]
enum DiscountCode {
    Table,
    Id,
}

#[derive(Iden)]
enum DeliveryPerson {
    Table,
    Id,
}

#[derive(Iden)]
enum Pizza {
    Table,
    Id,
}

#[derive(Iden)]
enum ExtraItem {
    Table,
    Id,
}
