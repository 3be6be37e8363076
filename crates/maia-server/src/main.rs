use std::net::SocketAddr;
use std::path::PathBuf;

use maia_core::MaiaConfig;
use maia_server::{build_router, AppState};
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(config: &MaiaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file paths: MAIA_CONFIG (defaults) and MAIA_USER_CONFIG.
    let default_path = std::env::var("MAIA_CONFIG").ok().map(PathBuf::from);
    let user_path = std::env::var("MAIA_USER_CONFIG").ok().map(PathBuf::from);
    let config = MaiaConfig::load_layered(default_path.as_deref(), user_path.as_deref())?;

    init_logging(&config);

    let addr: SocketAddr = config.server.bind_addr.parse()?;
    let app = build_router(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        history_enabled = config.history.enabled,
        history_capacity = config.history.capacity,
        "maia-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
