use crate::CoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A plain-text email ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one message over an authenticated transport
    async fn send(&self, message: &EmailMessage) -> CoreResult<()>;
}
