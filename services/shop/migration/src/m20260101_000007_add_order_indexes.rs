use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .col(Orders::CreatedAt)
                    .name("idx_orders_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::DeliveryPersonId)
                    .name("idx_orders_delivery_person_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .name("idx_orders_customer_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(OrderPizza::Table)
                    .col(OrderPizza::OrderId)
                    .name("idx_order_pizza_order_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(OrderExtraItem::Table)
                    .col(OrderExtraItem::OrderId)
                    .name("idx_order_extra_item_order_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_order_extra_item_order_id",
            "idx_order_pizza_order_id",
            "idx_orders_customer_id",
            "idx_orders_delivery_person_id",
            "idx_orders_status_created_at",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Status,
    CreatedAt,
    DeliveryPersonId,
    CustomerId,
}

#[derive(Iden)]
enum OrderPizza {
    Table,
    OrderId,
}

#[derive(Iden)]
enum OrderExtraItem {
    Table,
    OrderId,
}
