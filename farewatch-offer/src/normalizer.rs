use chrono::NaiveDate;
use farewatch_core::provider::FlightOffer;
use farewatch_shared::FlightRecord;
use serde::Deserialize;

/// Result of normalizing one provider response
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub records: Vec<FlightRecord>,
    pub rejected: Vec<NormalizeError>,
}

/// Convert every raw offer, keeping malformed ones out of the batch instead of
/// failing it.
pub fn normalize_offers(raw_offers: &[serde_json::Value], date: NaiveDate) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for raw in raw_offers {
        match normalize_offer(raw, date) {
            Ok(record) => batch.records.push(record),
            Err(e) => batch.rejected.push(e),
        }
    }

    batch
}

/// Convert one raw offer into a `FlightRecord`.
///
/// Only the first itinerary is read; the provider lists its primary itinerary
/// first. Departure comes from the first segment, arrival from the last, and
/// `stops` is the number of segments minus one.
pub fn normalize_offer(raw: &serde_json::Value, date: NaiveDate) -> Result<FlightRecord, NormalizeError> {
    let offer_id = raw
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>")
        .to_string();
    let malformed = |reason: String| NormalizeError::MalformedOffer {
        offer_id: offer_id.clone(),
        reason,
    };

    let offer = FlightOffer::deserialize(raw).map_err(|e| malformed(e.to_string()))?;

    let itinerary = offer
        .itineraries
        .first()
        .ok_or_else(|| malformed("offer has no itineraries".to_string()))?;

    let (first, last) = match (itinerary.segments.first(), itinerary.segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(malformed("itinerary has no segments".to_string())),
    };

    let price = offer
        .price
        .as_ref()
        .ok_or_else(|| malformed("offer has no price".to_string()))?;

    let amount: f64 = price
        .total
        .trim()
        .parse()
        .map_err(|_| malformed(format!("price total '{}' is not a number", price.total)))?;

    // local airport times, not comparable across time zones
    Ok(FlightRecord {
        date,
        departure_time: first.departure.at,
        arrival_time: last.arrival.at,
        price: amount,
        currency: price.currency.clone(),
        airline: first.carrier_code.clone(),
        stops: (itinerary.segments.len() - 1) as u32,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Malformed offer {offer_id}: {reason}")]
    MalformedOffer { offer_id: String, reason: String },
}
