pub mod app_config;
pub mod secrets;
pub mod snapshot_repo;
pub mod amadeus;
pub mod mistral;
pub mod mailer;

pub use amadeus::AmadeusClient;
pub use mailer::SmtpMailer;
pub use mistral::MistralClient;
pub use secrets::Secrets;
pub use snapshot_repo::JsonFileSnapshotRepository;

use farewatch_core::{CoreError, CoreResult};
use std::time::Duration;

/// Shared HTTP client for the search and summary providers
pub fn http_client(providers: &app_config::ProviderConfig) -> CoreResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(providers.request_timeout_secs))
        .user_agent(concat!("farewatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CoreError::ConfigurationError(format!("failed to build HTTP client: {}", e)))
}
