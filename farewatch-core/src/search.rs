use crate::CoreResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One leg's query against the flight-offer provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferSearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate, // departure date only, provider picks the times
    pub adults: u32,
    pub max_results: u32,
}

#[async_trait]
pub trait FlightSearchClient: Send + Sync {
    /// Fetch raw offers for one leg. The shape of each offer is owned by the
    /// provider and is only interpreted by the offer normalizer.
    async fn search_offers(
        &self,
        request: &OfferSearchRequest,
    ) -> CoreResult<Vec<serde_json::Value>>;
}
