use flag_dashboard::config::EVENTS_RESOURCE;
use flag_dashboard::distribution::known_labels;
use flag_dashboard::{AppState, Config, SnapshotSource, load_snapshot, router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let snapshot = load_snapshot(&config.data_path).await;
    let source = SnapshotSource::new(snapshot, EVENTS_RESOURCE, known_labels());
    let app = router(AppState::new(source, config.page_limit));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
