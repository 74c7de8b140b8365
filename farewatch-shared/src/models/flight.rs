use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of travel for one half of a route
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Leg {
    Outbound,
    Return,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Outbound => write!(f, "outbound"),
            Leg::Return => write!(f, "return"),
        }
    }
}

/// One normalized flight offer, reduced to what ranking and reporting need
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightRecord {
    /// Date that was searched for this leg
    pub date: NaiveDate,
    /// Departure of the first segment, provider local time
    pub departure_time: NaiveDateTime,
    /// Arrival of the last segment, provider local time
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub currency: String,
    /// Carrier code of the first segment
    pub airline: String,
    pub stops: u32,
}

impl FlightRecord {
    /// Price as shown to humans, e.g. `250.00 USD`
    pub fn price_label(&self) -> String {
        format!("{:.2} {}", self.price, self.currency)
    }

    /// Prices used for ranking must be finite and non-negative
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: f64) -> FlightRecord {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        FlightRecord {
            date,
            departure_time: date.and_hms_opt(8, 0, 0).unwrap(),
            arrival_time: date.and_hms_opt(11, 30, 0).unwrap(),
            price,
            currency: "USD".to_string(),
            airline: "AA".to_string(),
            stops: 0,
        }
    }

    #[test]
    fn test_price_label_uses_two_decimals() {
        assert_eq!(record(250.0).price_label(), "250.00 USD");
        assert_eq!(record(99.5).price_label(), "99.50 USD");
    }

    #[test]
    fn test_price_validity() {
        assert!(record(0.0).has_valid_price());
        assert!(!record(-1.0).has_valid_price());
        assert!(!record(f64::NAN).has_valid_price());
        assert!(!record(f64::INFINITY).has_valid_price());
    }

    #[test]
    fn test_record_serializes_iso_timestamps() {
        let json = serde_json::to_value(record(250.0)).unwrap();
        assert_eq!(json["date"], "2024-07-01");
        assert_eq!(json["departure_time"], "2024-07-01T08:00:00");
        assert_eq!(json["arrival_time"], "2024-07-01T11:30:00");
    }
}
