use chrono::NaiveDateTime;
use farewatch_shared::FlightRecord;

/// Ranked records for one leg plus anything excluded on the way
#[derive(Debug, Default)]
pub struct RankedLeg {
    pub records: Vec<FlightRecord>,
    pub rejected: Vec<RankError>,
}

/// Keeps the cheapest `top_n` flights of a leg
#[derive(Debug, Clone, Copy)]
pub struct FareRanker {
    top_n: usize,
}

impl FareRanker {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Sort ascending by price and truncate to `top_n`.
    ///
    /// The sort is stable, so records with equal prices keep the order the
    /// provider returned them in. Records whose price is not a finite,
    /// non-negative amount are excluded and reported in `rejected`.
    pub fn rank(&self, records: Vec<FlightRecord>) -> RankedLeg {
        let mut ranked = RankedLeg::default();

        for record in records {
            if record.has_valid_price() {
                ranked.records.push(record);
            } else {
                ranked.rejected.push(RankError::InvalidPrice {
                    airline: record.airline,
                    departure: record.departure_time,
                    price: record.price,
                });
            }
        }

        ranked.records.sort_by(|a, b| a.price.total_cmp(&b.price));
        ranked.records.truncate(self.top_n);
        ranked
    }
}

impl Default for FareRanker {
    fn default() -> Self {
        Self::new(3)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("Invalid price {price} for {airline} flight departing {departure}")]
    InvalidPrice {
        airline: String,
        departure: NaiveDateTime,
        price: f64,
    },
}
