#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use farewatch_agent::{FlightAgent, Notifier};
use farewatch_core::{
    CoreError, CoreResult, EmailMessage, FlightSearchClient, MailTransport, OfferSearchRequest,
    SnapshotRepository, SummaryClient,
};
use farewatch_offer::{RouteProcessor, SummaryAdapter};
use farewatch_shared::{RouteConfig, RouteResult, SearchSettings};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Offers keyed by (origin, destination); anything else fails like a provider outage
#[derive(Default)]
pub struct MockSearch {
    offers: Vec<((String, String), Vec<serde_json::Value>)>,
    pub requests: Mutex<Vec<OfferSearchRequest>>,
}

impl MockSearch {
    pub fn with(mut self, origin: &str, destination: &str, offers: Vec<serde_json::Value>) -> Self {
        self.offers.push(((origin.to_string(), destination.to_string()), offers));
        self
    }
}

#[async_trait]
impl FlightSearchClient for MockSearch {
    async fn search_offers(&self, request: &OfferSearchRequest) -> CoreResult<Vec<serde_json::Value>> {
        self.requests.lock().unwrap().push(request.clone());
        self.offers
            .iter()
            .find(|((o, d), _)| *o == request.origin && *d == request.destination)
            .map(|(_, offers)| offers.clone())
            .ok_or_else(|| CoreError::SearchFailure("[500] 141 SYSTEM ERROR HAS OCCURRED".to_string()))
    }
}

#[derive(Default)]
pub struct MockSummary {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl MockSummary {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryClient for MockSummary {
    async fn complete(&self, prompt: &str) -> CoreResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CoreError::SummarizationFailure("HTTP 429 Too Many Requests".to_string()));
        }
        Ok(format!("Analysis of {} prompt lines", prompt.lines().count()))
    }
}

#[derive(Default)]
pub struct MockMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn subjects(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|m| m.subject.clone()).collect()
    }
}

#[async_trait]
impl MailTransport for MockMailer {
    async fn send(&self, message: &EmailMessage) -> CoreResult<()> {
        if self.fail {
            return Err(CoreError::NotificationFailure("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySnapshots {
    pub records: Mutex<Vec<RouteResult>>,
    pub fail: bool,
}

impl MemorySnapshots {
    pub fn stored(&self) -> Vec<RouteResult> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotRepository for MemorySnapshots {
    async fn append(&self, result: &RouteResult) -> CoreResult<()> {
        if self.fail {
            return Err(CoreError::StorageFailure("disk full".to_string()));
        }
        self.records.lock().unwrap().push(result.clone());
        Ok(())
    }

    async fn load_all(&self) -> CoreResult<Vec<RouteResult>> {
        Ok(self.stored())
    }
}

pub struct Harness {
    pub search: Arc<MockSearch>,
    pub summary: Arc<MockSummary>,
    pub mailer: Arc<MockMailer>,
    pub snapshots: Arc<MemorySnapshots>,
}

impl Harness {
    pub fn new(search: MockSearch) -> Self {
        Self {
            search: Arc::new(search),
            summary: Arc::new(MockSummary::default()),
            mailer: Arc::new(MockMailer::default()),
            snapshots: Arc::new(MemorySnapshots::default()),
        }
    }

    pub fn agent(&self, routes: Vec<RouteConfig>) -> FlightAgent {
        FlightAgent::new(
            routes,
            RouteProcessor::new(self.search.clone(), SearchSettings::default()),
            SummaryAdapter::new(self.summary.clone()),
            Notifier::new(
                self.mailer.clone(),
                "agent@example.com".to_string(),
                "me@example.com".to_string(),
            ),
            self.snapshots.clone(),
        )
    }
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn route(name: &str, from: &str, to: &str, departure: NaiveDate, return_date: Option<NaiveDate>) -> RouteConfig {
    RouteConfig {
        name: name.to_string(),
        from_city: from.to_string(),
        to_city: to.to_string(),
        departure_date: departure,
        return_date,
    }
}

/// Single-segment provider offer
pub fn offer(carrier: &str, total: &str, departure: &str, arrival: &str) -> serde_json::Value {
    json!({
        "type": "flight-offer",
        "id": format!("{}-{}", carrier, total),
        "itineraries": [{
            "duration": "PT6H",
            "segments": [{
                "departure": {"iataCode": "JFK", "at": departure},
                "arrival": {"iataCode": "LAX", "at": arrival},
                "carrierCode": carrier,
                "number": "1"
            }]
        }],
        "price": {"currency": "USD", "total": total, "grandTotal": total}
    })
}
