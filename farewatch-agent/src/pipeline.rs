use crate::notifier::{Notifier, NotifyOutcome};
use chrono::{DateTime, Utc};
use farewatch_core::SnapshotRepository;
use farewatch_offer::{RouteProcessor, SummaryAdapter, SUMMARY_UNAVAILABLE_PLACEHOLDER};
use farewatch_shared::RouteConfig;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What happened to one route during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub route_name: String,
    pub outbound: usize,
    pub return_: usize,
    /// False when the summary service failed and the placeholder was stored
    pub analysis_ok: bool,
    pub stored: bool,
    pub notification: NotifyOutcome,
}

/// One full pass over every configured route
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<RouteOutcome>,
}

impl RunReport {
    pub fn emails_sent(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.notification == NotifyOutcome::Sent)
            .count()
    }
}

/// The route pipeline: process → summarize → store → notify
pub struct FlightAgent {
    routes: Vec<RouteConfig>,
    processor: RouteProcessor,
    summarizer: SummaryAdapter,
    notifier: Notifier,
    snapshots: Arc<dyn SnapshotRepository>,
}

impl FlightAgent {
    pub fn new(
        routes: Vec<RouteConfig>,
        processor: RouteProcessor,
        summarizer: SummaryAdapter,
        notifier: Notifier,
        snapshots: Arc<dyn SnapshotRepository>,
    ) -> Self {
        Self { routes, processor, summarizer, notifier, snapshots }
    }

    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    /// Process every route sequentially, in configuration order. A failing
    /// route never prevents the following ones from running.
    pub async fn run_pass(&self) -> RunReport {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(self.routes.len());

        for route in &self.routes {
            outcomes.push(self.process_route(route).await);
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            routes = report.outcomes.len(),
            emails_sent = report.emails_sent(),
            elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "Run complete"
        );
        report
    }

    pub async fn process_route(&self, route: &RouteConfig) -> RouteOutcome {
        info!(route = %route.name, "Checking flights {} -> {}", route.from_city, route.to_city);

        let result = self.processor.process(route).await;

        let (analysis, analysis_ok) = match self.summarizer.summarize(&result).await {
            Ok(text) => (text, true),
            Err(e) => {
                error!(route = %route.name, step = "summarize", error = %e, "Summary failed, storing placeholder");
                (SUMMARY_UNAVAILABLE_PLACEHOLDER.to_string(), false)
            }
        };
        let result = result.with_analysis(analysis);

        let stored = match self.snapshots.append(&result).await {
            Ok(()) => true,
            Err(e) => {
                error!(route = %route.name, step = "store", error = %e, "Snapshot not stored");
                false
            }
        };

        let notification = if analysis_ok {
            self.notifier.notify(&result, &result.analysis).await
        } else {
            warn!(route = %route.name, step = "notify", "No analysis for this run, email skipped");
            NotifyOutcome::Skipped
        };

        RouteOutcome {
            route_name: route.name.clone(),
            outbound: result.outbound.len(),
            return_: result.return_.len(),
            analysis_ok,
            stored,
            notification,
        }
    }
}
