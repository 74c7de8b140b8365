pub mod notifier;
pub mod pipeline;
pub mod scheduler;

pub use notifier::{subject_for, Notifier, NotifyOutcome};
pub use pipeline::{FlightAgent, RouteOutcome, RunReport};
pub use scheduler::{Clock, DailyTrigger, LocalClock, Scheduler, SchedulerState};

use farewatch_core::CoreResult;
use farewatch_offer::{RouteProcessor, SummaryAdapter};
use farewatch_store::app_config::Config;
use farewatch_store::{AmadeusClient, JsonFileSnapshotRepository, MistralClient, Secrets, SmtpMailer};
use std::sync::Arc;

/// Wire the production collaborators from configuration and secrets
pub fn build_agent(config: &Config, secrets: &Secrets) -> CoreResult<FlightAgent> {
    let http = farewatch_store::http_client(&config.providers)?;

    let search = Arc::new(AmadeusClient::new(
        http.clone(),
        &config.providers.search_base_url,
        secrets.search_client_id.clone(),
        secrets.search_client_secret.clone(),
    ));
    let summary = Arc::new(MistralClient::new(
        http,
        &config.providers.summary_base_url,
        secrets.summary_api_key.clone(),
        &config.providers.summary_model,
    ));
    let mailer = Arc::new(SmtpMailer::new(
        &config.smtp,
        &secrets.sender_email,
        &secrets.sender_password,
    )?);
    let snapshots = Arc::new(JsonFileSnapshotRepository::new(&config.snapshots.path));

    Ok(FlightAgent::new(
        config.routes.clone(),
        RouteProcessor::new(search, config.search.clone()),
        SummaryAdapter::new(summary),
        Notifier::new(mailer, secrets.sender_email.clone(), secrets.recipient_email.clone()),
        snapshots,
    ))
}
