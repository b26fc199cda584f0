use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customer::UserId).integer().not_null().unique_key())
                    .col(ColumnDef::new(Customer::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Customer::Gender).string_len(50).not_null())
                    .col(ColumnDef::new(Customer::BirthDate).date().null())
                    .col(ColumnDef::new(Customer::Address).string_len(256).not_null())
                    .col(ColumnDef::new(Customer::PostalCode).string_len(10).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Customer::Table, Customer::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeliveryPerson::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeliveryPerson::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DeliveryPerson::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DeliveryPerson::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(DeliveryPerson::VehicleType)
                            .string_len(50)
                            .not_null()
                            .default("bike"),
                    )
                    .col(
                        ColumnDef::new(DeliveryPerson::UnavailableUntil)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DeliveryPerson::Table, DeliveryPerson::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeliveryPerson::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Customer {
    Table,
    Id,
    UserId,
    Name,
    Gender,
    BirthDate,
    Address,
    PostalCode,
}

#[derive(Iden)]
enum DeliveryPerson {
    Table,
    Id,
    UserId,
    Name,
    VehicleType,
    UnavailableUntil,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
