use anyhow::Context;
use clap::Parser;
use farewatch_agent::{build_agent, LocalClock, Scheduler};
use farewatch_store::app_config::Config;
use farewatch_store::Secrets;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Daily flight deal agent
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Run a single pass over all routes and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farewatch_agent=info,farewatch_offer=info,farewatch_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Configuration and credential problems stop the process before any route runs
    let config = Config::load().context("Failed to load config")?;
    let secrets = Secrets::from_env().context("Failed to read credentials")?;
    let trigger_at = config.schedule.trigger_time()?;
    let agent = build_agent(&config, &secrets).context("Failed to initialize collaborators")?;

    tracing::info!(
        routes = config.routes.len(),
        daily_at = %config.schedule.daily_at,
        snapshots = %config.snapshots.path.display(),
        "Starting flight deal agent"
    );

    let mut scheduler = Scheduler::new(
        agent,
        trigger_at,
        Duration::from_secs(config.schedule.poll_interval_secs),
        Arc::new(LocalClock),
    );

    if args.once {
        scheduler.run_pass().await;
        return Ok(());
    }

    scheduler
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
