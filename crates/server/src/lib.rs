//! # studygen-server Library
//!
//! This library exposes the server's core logic, making it testable and
//! reusable. The main entry point is the `run` function, which takes a
//! pre-bound TCP listener and the application configuration to start the
//! service.

// --- Public Modules ---
pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;

use crate::config::{get_config, AppConfig};
use crate::router::create_router;
use crate::state::build_app_state;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

/// Configures and runs the web server.
///
/// This function takes a pre-bound `TcpListener` and the application
/// configuration, builds the application state and router, and serves
/// requests until shutdown.
pub async fn run(listener: TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app_state = build_app_state(config).await?;
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// The main entry point for the server binary.
///
/// Initializes logging, loads the configuration, binds the TCP listener,
/// and hands off to `run`.
pub async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config = get_config(None)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server starting on {addr}");

    run(listener, config).await
}
