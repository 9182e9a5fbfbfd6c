use tracing_subscriber::EnvFilter;

use mlserve::api::server::start_server;
use mlserve::config;
use mlserve::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = config::APP_VERSION,
        "Starting {}",
        config::APP_NAME
    );

    let state = AppState::initialize()?;
    let addr = config::bind_addr()?;

    let mut server = start_server(state, addr).await?;
    tracing::info!(addr = %server.addr, "Ready to serve predictions");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Interrupt received, shutting down");
    server.shutdown();
    server.wait().await;

    Ok(())
}
