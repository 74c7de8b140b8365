use farewatch_core::{EmailMessage, MailTransport};
use farewatch_shared::RouteResult;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    /// Nothing actionable, or no analysis to send
    Skipped,
    Failed,
}

/// `Flight Deals: {route} ({departure}[ - {return}])`
pub fn subject_for(result: &RouteResult) -> String {
    match result.return_date {
        Some(return_date) => format!(
            "Flight Deals: {} ({} - {})",
            result.route_name, result.departure_date, return_date
        ),
        None => format!("Flight Deals: {} ({})", result.route_name, result.departure_date),
    }
}

/// Emails a route's analysis to the operator
pub struct Notifier {
    transport: Arc<dyn MailTransport>,
    sender: String,
    recipient: String,
}

impl Notifier {
    pub fn new(transport: Arc<dyn MailTransport>, sender: String, recipient: String) -> Self {
        Self { transport, sender, recipient }
    }

    /// Send `summary` for `result`. Routes without outbound flights are
    /// skipped; delivery failures are logged and reported, never raised.
    pub async fn notify(&self, result: &RouteResult, summary: &str) -> NotifyOutcome {
        if !result.has_outbound() {
            info!(route = %result.route_name, step = "notify", "No outbound flights, email skipped");
            return NotifyOutcome::Skipped;
        }

        let message = EmailMessage {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            subject: subject_for(result),
            body: summary.to_string(),
        };

        match self.transport.send(&message).await {
            Ok(()) => NotifyOutcome::Sent,
            Err(e) => {
                error!(route = %result.route_name, step = "notify", error = %e, "Email delivery failed");
                NotifyOutcome::Failed
            }
        }
    }
}
