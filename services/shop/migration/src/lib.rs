use sea_orm_migration::prelude::*;

mod m20260101_000001_create_user;
mod m20260101_000002_create_profiles;
mod m20260101_000003_create_catalog;
mod m20260101_000004_create_discount_code;
mod m20260101_000005_create_orders;
mod m20260101_000006_create_discount_usage;
mod m20260101_000007_add_order_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_user::Migration),
            Box::new(m20260101_000002_create_profiles::Migration),
            Box::new(m20260101_000003_create_catalog::Migration),
            Box::new(m20260101_000004_create_discount_code::Migration),
            Box::new(m20260101_000005_create_orders::Migration),
            Box::new(m20260101_000006_create_discount_usage::Migration),
            Box::new(m20260101_000007_add_order_indexes::Migration),
        ]
    }
}
