//! Roomrate service entry point
//!
//! Dynamic pricing and availability engine for vacation rentals.
//! Reads configuration from TOML file (~/.config/roomrate/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use roomrate::application::rates::RateSettingsReconciler;
use roomrate::application::scheduler::Scheduler;
use roomrate::config::AppConfig;
use roomrate::infrastructure::database::migrator::Migrator;
use roomrate::infrastructure::database::DatabaseConfig;
use roomrate::infrastructure::holiday::NagerHolidayCalendar;
use roomrate::shared::shutdown::ShutdownCoordinator;
use roomrate::shared::utills::RetryConfig;
use roomrate::{create_api_router, default_config_path, init_database, SeaOrmRepositoryProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ROOMRATE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Roomrate pricing & availability service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn roomrate::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Holiday calendar + reconciler ──────────────────────────
    let calendar = Arc::new(NagerHolidayCalendar::new(app_cfg.holiday.api_config())?);
    let reconciler = Arc::new(
        RateSettingsReconciler::new(repos.clone(), calendar).with_retry(RetryConfig {
            max_attempts: app_cfg.holiday.retry_max_attempts,
            ..RetryConfig::default()
        }),
    );

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new();
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── Scheduler: weekly full resync, daily incremental, purge ──
    let scheduler = Scheduler::new(
        repos.clone(),
        reconciler.clone(),
        app_cfg.scheduler.scheduler_config(),
    );
    scheduler.start(shutdown_signal.clone());

    // ── REST API server with graceful shutdown ─────────────────
    let api_router = create_api_router(repos, reconciler, db.clone(), prometheus_handle);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    if let Err(e) = api_server.await {
        error!("REST API server error: {}", e);
    }

    // Perform final cleanup
    info!("🧹 Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 Roomrate service shutdown complete");
    Ok(())
}
