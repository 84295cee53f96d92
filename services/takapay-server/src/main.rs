//! TakaPay API Server
//!
//! REST API server for the TakaPay mobile financial service backend.
//!
//! # Features
//!
//! - Registration, PIN login and bearer-token sessions
//! - Agent application approval and block toggling
//! - OpenAPI documentation with Swagger UI
//! - Graceful shutdown handling
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! takapay-server
//!
//! # Start with custom config
//! takapay-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! TAKAPAY__SERVER__PORT=8080 takapay-server
//! ```

mod config;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio::sync::Notify;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use takapay_api::{create_router, ApiConfig, AppState};
use takapay_auth::{AuthConfig, AuthService, JwtConfig, PinConfig};
use takapay_db::{Database, DatabaseConfig as DbConfig};

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// TakaPay API Server - account and agent-lifecycle backend
#[derive(Parser, Debug)]
#[command(name = "takapay-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "TAKAPAY_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "TAKAPAY_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TAKAPAY_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TAKAPAY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (json, pretty)
    #[arg(long, env = "TAKAPAY_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// JWT secret key
    #[arg(long, env = "JWT_SECRET")]
    jwt_secret: Option<String>,

    /// Enable development mode (relaxed security)
    #[arg(long, env = "TAKAPAY_DEV_MODE")]
    dev_mode: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    if let Some(db_url) = args.database_url {
        server_config.database.postgres_url = db_url;
    }
    if let Some(jwt_secret) = args.jwt_secret {
        server_config.auth.jwt_secret = jwt_secret;
    }
    server_config.logging.level = args.log_level;
    server_config.logging.format = args.log_format;

    // Initialize logging
    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting TakaPay API Server"
    );

    // Validate configuration
    validate_config(&server_config, args.dev_mode)?;

    // Initialize database
    let db = init_database(&server_config.database).await?;

    // Initialize auth service
    let auth = init_auth(&server_config.auth, args.dev_mode)?;

    // Create application state: the router runs against the store traits
    let state = Arc::new(AppState::new(
        Arc::new(db.account_repo()),
        Arc::new(db.transaction_repo()),
        auth,
    ));

    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_tracing: server_config.api.enable_tracing,
    };

    let app = create_router(state, api_config);

    let addr: SocketAddr = format!(
        "{}:{}",
        server_config.server.host, server_config.server.port
    )
    .parse()?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let drain_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let drain_started = drain_started.clone();
        async move {
            shutdown_signal().await;
            drain_started.notify_one();
        }
    });

    serve_with_drain_timeout(
        server.into_future(),
        drain_started,
        server_config.server.shutdown_timeout(),
    )
    .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber.with(fmt::layer().json().with_target(true)).init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    Ok(())
}

/// Validate configuration
fn validate_config(config: &ServerConfig, dev_mode: bool) -> anyhow::Result<()> {
    // Refuse the placeholder secret outside development
    if !dev_mode && config.auth.jwt_secret == "change-me-in-production" {
        anyhow::bail!(
            "JWT secret must be changed in production. Set JWT_SECRET environment variable."
        );
    }

    Ok(())
}

/// Initialize database connection and run migrations
async fn init_database(config: &config::DatabaseSettings) -> anyhow::Result<Database> {
    tracing::info!("Connecting to database...");

    let db_config = DbConfig {
        postgres_url: config.postgres_url.clone(),
        pg_max_connections: config.max_connections,
        pg_min_connections: config.min_connections,
        pg_acquire_timeout_secs: config.connect_timeout_secs,
    };

    let db = Database::connect(&db_config).await?;

    if config.run_migrations {
        db.migrate().await?;
    }

    let healthy = db.health_check().await?;
    if !healthy {
        anyhow::bail!("Database health check failed");
    }

    tracing::info!("Database connected and healthy");

    Ok(db)
}

/// Initialize authentication service
fn init_auth(config: &config::AuthSettings, dev_mode: bool) -> anyhow::Result<Arc<AuthService>> {
    let auth_config = AuthConfig {
        jwt: JwtConfig {
            secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
        },
        pin: PinConfig::default(),
    };

    if let Err(errors) = auth_config.validate() {
        if dev_mode {
            tracing::warn!(?errors, "Auth configuration is weak (dev mode)");
        } else {
            anyhow::bail!("Invalid auth configuration: {}", errors.join("; "));
        }
    }

    tracing::info!("Authentication service initialized");

    Ok(Arc::new(AuthService::new(auth_config)))
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Drive the server future, bounding the drain phase: once shutdown has
/// started, remaining connections are dropped after `timeout`.
async fn serve_with_drain_timeout<S>(
    server: S,
    drain_started: Arc<Notify>,
    timeout: Duration,
) -> std::io::Result<()>
where
    S: std::future::Future<Output = std::io::Result<()>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = async {
            drain_started.notified().await;
            tokio::time::sleep(timeout).await;
        } => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "Drain timeout reached, dropping remaining connections"
            );
            Ok(())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
