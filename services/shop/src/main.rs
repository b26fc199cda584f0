use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tokio::signal;
use tracing::info;

use pizzeria_auth_types::password::PasswordHasher;
use pizzeria_shop::config::ShopConfig;
use pizzeria_shop::router::build_router;
use pizzeria_shop::state::AppState;
use pizzeria_shop::usecase::account::CreateAdminUseCase;
use pizzeria_shop_migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pizzeria_core::tracing::init_tracing();

    let config = ShopConfig::from_env().context("invalid configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("migrations applied");
    }

    let state = AppState {
        db,
        hasher: PasswordHasher::new(config.password_pepper.as_str()),
    };

    if let Some((username, password)) = &config.bootstrap_admin {
        let usecase = CreateAdminUseCase {
            repo: state.user_repo(),
            hasher: state.hasher.clone(),
        };
        let created = usecase
            .ensure(username, password)
            .await
            .context("failed to bootstrap admin account")?;
        if created {
            info!(username = %username, "bootstrap admin account created");
        }
    }

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.shop_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("shop service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shop service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}
