//! Periciales server
//!
//! Reads configuration from a TOML file (~/.config/periciales/config.toml,
//! or the path in `PERICIALES_CONFIG`).

use std::sync::Arc;

use tracing::{error, info, warn};

use periciales::api::handlers::auth::CookieSettings;
use periciales::application::ReportService;
use periciales::auth::{AuthService, SessionConfig, SessionManager};
use periciales::infrastructure::database::{
    seed_default_admin, SeaOrmReportRepository, SeaOrmUserRepository,
};
use periciales::support::shutdown_signal;
use periciales::{
    create_api_router, default_config_path, init_database, run_migrations, AppConfig, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PERICIALES_CONFIG")
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

    info!("Starting Periciales...");

    // ── Prometheus recorder, before any metrics call ───────────
    let prometheus_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("Metrics disabled, failed to install recorder: {}", e);
            None
        }
    };

    if app_cfg.security.uses_default_secret() {
        warn!("Session secret is the built-in default; set [security].session_secret");
    }

    // ── Database ───────────────────────────────────────────────
    let db_config = app_cfg.database.to_database_config();
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let reports_repo = Arc::new(SeaOrmReportRepository::new(db.clone()));

    seed_default_admin(users.as_ref(), &app_cfg.admin).await?;

    // ── Services ───────────────────────────────────────────────
    let sessions = SessionManager::new(SessionConfig::from(&app_cfg.security));
    info!(
        "Sessions expire after {}h",
        app_cfg.security.session_ttl_hours
    );
    let auth = Arc::new(AuthService::new(users, sessions));
    let reports = Arc::new(ReportService::new(reports_repo));

    let state = AppState::new(
        auth,
        reports,
        CookieSettings {
            secure: app_cfg.security.cookie_secure,
        },
    );
    let router = create_api_router(state, prometheus_handle);

    // ── Serve ──────────────────────────────────────────────────
    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("OpenAPI document at http://{}/api-doc/openapi.json", addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {}", e);
    }

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Periciales shutdown complete");
    Ok(())
}
