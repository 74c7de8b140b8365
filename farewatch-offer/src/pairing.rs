use farewatch_shared::{FlightRecord, RoundTripPairing};

/// Cheapest outbound/return combination priced in one currency.
///
/// Both legs are expected in ranked order; on equal totals the earliest pair
/// wins. Returns `None` when a leg is empty or no currencies match.
pub fn best_round_trip(outbound: &[FlightRecord], return_: &[FlightRecord]) -> Option<RoundTripPairing> {
    let mut best: Option<(&FlightRecord, &FlightRecord, f64)> = None;

    for out in outbound {
        for ret in return_.iter().filter(|r| r.currency == out.currency) {
            let total = out.price + ret.price;
            if best.map_or(true, |(_, _, current)| total < current) {
                best = Some((out, ret, total));
            }
        }
    }

    best.map(|(out, ret, total)| RoundTripPairing {
        outbound: out.clone(),
        return_: ret.clone(),
        total_price: total,
        currency: out.currency.clone(),
    })
}
