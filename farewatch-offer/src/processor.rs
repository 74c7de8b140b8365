use crate::normalizer::normalize_offers;
use crate::pairing::best_round_trip;
use crate::ranker::FareRanker;
use farewatch_core::{FlightSearchClient, OfferSearchRequest};
use farewatch_shared::{FlightRecord, Leg, RouteConfig, RouteResult, SearchSettings};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs search → normalize → rank for both legs of a route
pub struct RouteProcessor {
    search: Arc<dyn FlightSearchClient>,
    settings: SearchSettings,
    ranker: FareRanker,
}

impl RouteProcessor {
    pub fn new(search: Arc<dyn FlightSearchClient>, settings: SearchSettings) -> Self {
        let ranker = FareRanker::new(settings.top_n);
        Self { search, settings, ranker }
    }

    /// Build a fresh `RouteResult` for `route`.
    ///
    /// Never fails: a leg whose search errors is reported as empty, and the
    /// other leg is still processed.
    pub async fn process(&self, route: &RouteConfig) -> RouteResult {
        let outbound = self.fetch_leg(route, Leg::Outbound).await;
        let return_ = if route.is_round_trip() {
            self.fetch_leg(route, Leg::Return).await
        } else {
            Vec::new()
        };

        let pairing = best_round_trip(&outbound, &return_);
        RouteResult::new(route, outbound, return_, pairing)
    }

    /// Provider query for one leg; `None` for the return leg of a one-way route
    pub fn leg_request(&self, route: &RouteConfig, leg: Leg) -> Option<OfferSearchRequest> {
        let (origin, destination, date) = match leg {
            Leg::Outbound => (&route.from_city, &route.to_city, route.departure_date),
            Leg::Return => (&route.to_city, &route.from_city, route.return_date?),
        };

        Some(OfferSearchRequest {
            origin: origin.clone(),
            destination: destination.clone(),
            date,
            adults: self.settings.adults,
            max_results: self.settings.max_results,
        })
    }

    async fn fetch_leg(&self, route: &RouteConfig, leg: Leg) -> Vec<FlightRecord> {
        let Some(request) = self.leg_request(route, leg) else {
            return Vec::new();
        };

        info!(
            route = %route.name,
            leg = %leg,
            "Searching flights {} -> {} on {}",
            request.origin, request.destination, request.date
        );

        let raw = match self.search.search_offers(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(route = %route.name, leg = %leg, step = "search", error = %e, "Search failed, leg left empty");
                return Vec::new();
            }
        };

        let batch = normalize_offers(&raw, request.date);
        for rejected in &batch.rejected {
            warn!(route = %route.name, leg = %leg, step = "normalize", error = %rejected, "Dropped offer");
        }

        let ranked = self.ranker.rank(batch.records);
        for rejected in &ranked.rejected {
            warn!(route = %route.name, leg = %leg, step = "rank", error = %rejected, "Excluded offer");
        }

        info!(
            route = %route.name,
            leg = %leg,
            received = raw.len(),
            kept = ranked.records.len(),
            "Leg processed"
        );
        ranked.records
    }
}
