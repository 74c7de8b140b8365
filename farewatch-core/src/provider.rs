use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Flight-offer search models (provider wire shape, camelCase)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub price: Option<OfferPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default)]
    pub duration: Option<String>, // ISO 8601 duration, e.g. PT5H30M
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    pub carrier_code: String,
    #[serde(default)]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    #[serde(default)]
    pub iata_code: Option<String>,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    pub currency: String,
    pub total: String, // decimal string, e.g. "250.00"
    #[serde(default)]
    pub grand_total: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

// ============================================================================
// Provider error envelope
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderErrorResponse {
    #[serde(default)]
    pub errors: Vec<ProviderIssue>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderIssue {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl fmt::Display for ProviderIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "[{}] ", status)?;
        }
        if let Some(code) = self.code {
            write!(f, "{} ", code)?;
        }
        write!(f, "{}", self.title.as_deref().unwrap_or("UNKNOWN ERROR"))?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl fmt::Display for ProviderErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issues: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        if issues.is_empty() {
            write!(f, "provider returned no error details")
        } else {
            write!(f, "{}", issues.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_deserialization() {
        let json = r#"
            {
                "type": "flight-offer",
                "id": "1",
                "itineraries": [{
                    "duration": "PT6H",
                    "segments": [{
                        "departure": {"iataCode": "JFK", "at": "2024-07-01T08:00:00"},
                        "arrival": {"iataCode": "LAX", "at": "2024-07-01T11:00:00"},
                        "carrierCode": "AA",
                        "number": "1"
                    }]
                }],
                "price": {"currency": "USD", "total": "250.00", "grandTotal": "250.00"}
            }
        "#;
        let offer: FlightOffer = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(offer.itineraries.len(), 1);
        assert_eq!(offer.itineraries[0].segments[0].carrier_code, "AA");
        assert_eq!(offer.price.unwrap().total, "250.00");
    }

    #[test]
    fn test_provider_error_display() {
        let json = r#"{"errors": [{"status": 400, "code": 477, "title": "INVALID FORMAT", "detail": "invalid date"}]}"#;
        let err: ProviderErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.to_string(), "[400] 477 INVALID FORMAT: invalid date");

        let empty = ProviderErrorResponse { errors: vec![] };
        assert_eq!(empty.to_string(), "provider returned no error details");
    }
}
