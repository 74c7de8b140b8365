pub mod search;
pub mod provider;
pub mod summary;
pub mod mail;
pub mod repository;

pub use search::{FlightSearchClient, OfferSearchRequest};
pub use summary::SummaryClient;
pub use mail::{EmailMessage, MailTransport};
pub use repository::SnapshotRepository;

/// Failures crossing a collaborator boundary. Everything except
/// `ConfigurationError` is isolated to one route/leg/step by the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Flight search failed: {0}")]
    SearchFailure(String),
    #[error("Summarization failed: {0}")]
    SummarizationFailure(String),
    #[error("Notification failed: {0}")]
    NotificationFailure(String),
    #[error("Snapshot storage failed: {0}")]
    StorageFailure(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
