//! Tool Hub server entry point.
//!
//! Loads configuration, initializes logging, connects to PostgreSQL, seeds the
//! catalog and admin account, and serves the REST API until Ctrl-C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use tool_hub::adapters::auth::{BcryptPasswordHasher, JwtTokenService};
use tool_hub::adapters::http::{app_router, AppState, HttpSettings, RouterOptions};
use tool_hub::adapters::network::{HickoryDnsResolver, ReqwestHttpProbe};
use tool_hub::adapters::postgres::{
    PostgresRefreshTokenRepository, PostgresToolRepository, PostgresUsageLogRepository,
    PostgresUserRepository,
};
use tool_hub::application::SeedHandler;
use tool_hub::config::{AppConfig, ConfigError, LogFormat, ValidationError};
use tool_hub::domain::foundation::{DomainError, Timestamp};

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("seeding: {0}")]
    Seed(#[from] DomainError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_logging(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting tool-hub"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Connected to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let jwt = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret,
        config.auth.access_token_ttl_secs,
    ));
    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        tools: Arc::new(PostgresToolRepository::new(pool.clone())),
        usage_logs: Arc::new(PostgresUsageLogRepository::new(pool.clone())),
        refresh_tokens: Arc::new(PostgresRefreshTokenRepository::new(pool.clone())),
        password_hasher: Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
        token_issuer: jwt.clone(),
        session_validator: jwt,
        dns_resolver: Arc::new(HickoryDnsResolver::from_system()),
        http_probe: Arc::new(ReqwestHttpProbe::new(&config.outbound)?),
        settings: HttpSettings {
            secure_cookies: config.auth.secure_cookies,
            refresh_token_ttl_secs: config.auth.refresh_token_ttl_secs,
            allow_private_targets: config.outbound.allow_private_targets,
            bcrypt_cost: config.auth.bcrypt_cost,
        },
    };

    if config.seed.enabled {
        let report = SeedHandler::new(
            state.tools.clone(),
            state.users.clone(),
            state.password_hasher.clone(),
        )
        .run(config.seed.admin_credentials())
        .await?;
        tracing::info!(
            tools_inserted = report.tools_inserted,
            admin_created = report.admin_created,
            "Seeding complete"
        );
    }

    let purged = state
        .refresh_tokens
        .delete_expired(Timestamp::now())
        .await?;
    if purged > 0 {
        tracing::info!(purged, "Removed expired refresh tokens");
    }

    let app = app_router(
        state,
        &RouterOptions {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Compact human-readable logs in development, JSON elsewhere.
/// `RUST_LOG` overrides `server.log_level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.server.log_format() {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
