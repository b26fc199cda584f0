//! Demo data generator for the pizzeria database.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p pizzeria-seed -- --database-url postgres://localhost/pizzeria --pepper dev \
//!     --customers 20 --delivery-persons 5 --orders 30
//! ```
//!
//! Everything goes through the shop's use cases, so validation and pricing
//! rules apply exactly as they do for live traffic. Re-running skips rows
//! that already exist.

use anyhow::{Context as _, Result};
use clap::Parser;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use pizzeria_auth_types::password::PasswordHasher;
use pizzeria_shop::state::AppState;
use pizzeria_shop_migration::Migrator;

mod data;
mod seed;

use seed::{SeedCounts, Seeder};

#[derive(Parser)]
#[command(about = "Fill a pizzeria database with demo data")]
struct Args {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Password pepper; must match the shop service's PASSWORD_PEPPER
    #[arg(long, env = "PASSWORD_PEPPER")]
    pepper: String,

    /// Apply pending migrations first
    #[arg(long)]
    migrate: bool,

    /// Number of random customers to register
    #[arg(long, default_value_t = 20)]
    customers: usize,

    /// Number of random delivery persons to create
    #[arg(long, default_value_t = 5)]
    delivery_persons: usize,

    /// Number of random orders to place
    #[arg(long, default_value_t = 30)]
    orders: usize,

    /// Password given to every generated account
    #[arg(long, default_value = "password123")]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    pizzeria_core::tracing::init_tracing();
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;
    if args.migrate {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
    }

    let seeder = Seeder {
        state: AppState {
            db,
            hasher: PasswordHasher::new(args.pepper),
        },
        password: args.password,
    };
    seeder
        .run(&SeedCounts {
            customers: args.customers,
            delivery_persons: args.delivery_persons,
            orders: args.orders,
        })
        .await?;

    info!("seeding complete");
    Ok(())
}
