use crate::models::flight::FlightRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Analysis text stored for routes where no outbound offer was found
pub const NO_FLIGHTS_PLACEHOLDER: &str = "No flights found for the specified route.";

/// A route the agent watches, as written in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteConfig {
    pub name: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl RouteConfig {
    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}

/// Search parameters shared by every configured route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchSettings {
    /// Offers requested from the provider per leg
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_adults")]
    pub adults: u32,
    /// Offers kept per leg after ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_max_results() -> u32 { 5 }
fn default_adults() -> u32 { 1 }
fn default_top_n() -> usize { 3 }

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            adults: default_adults(),
            top_n: default_top_n(),
        }
    }
}

/// Cheapest outbound/return combination priced in a single currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundTripPairing {
    pub outbound: FlightRecord,
    #[serde(rename = "return")]
    pub return_: FlightRecord,
    pub total_price: f64,
    pub currency: String,
}

impl RoundTripPairing {
    pub fn total_label(&self) -> String {
        format!("{:.2} {}", self.total_price, self.currency)
    }
}

/// Processed snapshot of one route at one point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteResult {
    id: Uuid,
    pub route_name: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    pub outbound: Vec<FlightRecord>,
    #[serde(rename = "return", default)]
    pub return_: Vec<FlightRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_round_trip: Option<RoundTripPairing>,
    pub analysis: String,
    timestamp: DateTime<Utc>,
}

impl RouteResult {
    /// Capture a result for `route` now
    pub fn new(
        route: &RouteConfig,
        outbound: Vec<FlightRecord>,
        return_: Vec<FlightRecord>,
        best_round_trip: Option<RoundTripPairing>,
    ) -> Self {
        Self::captured_at(route, outbound, return_, best_round_trip, Utc::now())
    }

    pub fn captured_at(
        route: &RouteConfig,
        outbound: Vec<FlightRecord>,
        return_: Vec<FlightRecord>,
        best_round_trip: Option<RoundTripPairing>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let analysis = if outbound.is_empty() {
            NO_FLIGHTS_PLACEHOLDER.to_string()
        } else {
            String::new()
        };

        Self {
            id: Uuid::new_v4(),
            route_name: route.name.clone(),
            from_city: route.from_city.clone(),
            to_city: route.to_city.clone(),
            departure_date: route.departure_date,
            return_date: route.return_date,
            outbound,
            return_,
            best_round_trip,
            analysis,
            timestamp,
        }
    }

    /// Attach the generated analysis. Consumes the result so it is finalized exactly once.
    pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.analysis = analysis.into();
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn has_outbound(&self) -> bool {
        !self.outbound.is_empty()
    }
}

/// Latest record per route, as read by the dashboard
#[derive(Debug)]
pub struct LatestSnapshots<'a> {
    pub last_updated: Option<DateTime<Utc>>,
    pub routes: Vec<&'a RouteResult>,
}

/// Group stored records by route name (first-seen order) and keep the most
/// recent one per route. Later records win timestamp ties.
pub fn latest_per_route(records: &[RouteResult]) -> LatestSnapshots<'_> {
    let mut routes: Vec<&RouteResult> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.route_name.as_str()) {
            Some(&i) => {
                if record.timestamp >= routes[i].timestamp {
                    routes[i] = record;
                }
            }
            None => {
                index.insert(record.route_name.as_str(), routes.len());
                routes.push(record);
            }
        }
    }

    LatestSnapshots {
        last_updated: records.iter().map(|r| r.timestamp).max(),
        routes,
    }
}
