use anyhow::Context;
use farewatch_api::{app, AppState};
use farewatch_store::app_config::Config;
use farewatch_store::JsonFileSnapshotRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farewatch_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        snapshots = %config.snapshots.path.display(),
        "Starting dashboard on port {}",
        config.dashboard.port
    );

    let repository = JsonFileSnapshotRepository::new(config.snapshots.path.clone());
    let app = app(AppState::new(Arc::new(repository)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.dashboard.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Dashboard server failed")?;
    Ok(())
}
