use farewatch_core::{CoreError, CoreResult, SummaryClient};
use farewatch_shared::{FlightRecord, RouteResult, NO_FLIGHTS_PLACEHOLDER};
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

/// Analysis stored when the summary service failed for a route
pub const SUMMARY_UNAVAILABLE_PLACEHOLDER: &str =
    "Analysis unavailable: the summary service failed for this run.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Turns a route's ranked flights into a natural-language analysis
pub struct SummaryAdapter {
    client: Arc<dyn SummaryClient>,
}

impl SummaryAdapter {
    pub fn new(client: Arc<dyn SummaryClient>) -> Self {
        Self { client }
    }

    /// Summarize `result`. Routes without outbound flights get the fixed
    /// placeholder and the language model is not called.
    pub async fn summarize(&self, result: &RouteResult) -> CoreResult<String> {
        if !result.has_outbound() {
            return Ok(NO_FLIGHTS_PLACEHOLDER.to_string());
        }

        let prompt = build_prompt(result);
        debug!(route = %result.route_name, prompt_len = prompt.len(), "Requesting analysis");

        let text = self.client.complete(&prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::SummarizationFailure(
                "summary service returned empty text".to_string(),
            ));
        }
        Ok(text.to_string())
    }
}

/// One line per flight: date, departure, arrival, price, airline, stops
pub fn render_flight_lines(records: &[FlightRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "Date: {}, Departure: {}, Arrival: {}, Price: {}, Airline: {}, Stops: {}",
                r.date,
                r.departure_time.format(TIMESTAMP_FORMAT),
                r.arrival_time.format(TIMESTAMP_FORMAT),
                r.price_label(),
                r.airline,
                r.stops
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deterministic prompt for a route with at least one outbound flight
pub fn build_prompt(result: &RouteResult) -> String {
    let mut prompt = format!(
        "Please analyze these flight options from {} to {} and provide a concise summary.\n\n",
        result.from_city, result.to_city
    );

    // writes into a String cannot fail
    let _ = writeln!(prompt, "Outbound flights ({}):", result.departure_date);
    let _ = writeln!(prompt, "{}", render_flight_lines(&result.outbound));

    let has_return = !result.return_.is_empty();
    if has_return {
        let return_date = result
            .return_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        let _ = writeln!(prompt, "\nReturn flights ({}):", return_date);
        let _ = writeln!(prompt, "{}", render_flight_lines(&result.return_));
    }

    if let Some(pairing) = &result.best_round_trip {
        let _ = writeln!(
            prompt,
            "\nCheapest round trip: outbound {} departing {} plus return {} departing {}, total {}",
            pairing.outbound.airline,
            pairing.outbound.departure_time.format(TIMESTAMP_FORMAT),
            pairing.return_.airline,
            pairing.return_.departure_time.format(TIMESTAMP_FORMAT),
            pairing.total_label()
        );
    }

    prompt.push_str("\nFocus on:\n");
    prompt.push_str("1. The best deals available\n");
    prompt.push_str("2. Any notable patterns in pricing\n");
    prompt.push_str("3. The number of stops for each flight\n");
    prompt.push_str("4. The time differences between flights\n");
    if has_return {
        prompt.push_str("5. The total cost of the best round-trip combination\n");
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::best_round_trip;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use farewatch_shared::RouteConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingClient {
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        reply: CoreResult<String>,
    }

    impl CountingClient {
        fn replying(reply: CoreResult<String>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), last_prompt: Mutex::new(None), reply })
        }
    }

    #[async_trait]
    impl SummaryClient for CountingClient {
        async fn complete(&self, prompt: &str) -> CoreResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(CoreError::SummarizationFailure(e.to_string())),
            }
        }
    }

    fn record(airline: &str, price: f64, day: u32, stops: u32) -> FlightRecord {
        let date = NaiveDate::from_ymd_opt(2024, 7, day).unwrap();
        FlightRecord {
            date,
            departure_time: date.and_hms_opt(8, 0, 0).unwrap(),
            arrival_time: date.and_hms_opt(11, 30, 0).unwrap(),
            price,
            currency: "USD".to_string(),
            airline: airline.to_string(),
            stops,
        }
    }

    fn result(outbound: Vec<FlightRecord>, return_: Vec<FlightRecord>) -> RouteResult {
        let route = RouteConfig {
            name: "NYC-LAX".to_string(),
            from_city: "NYC".to_string(),
            to_city: "LAX".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            return_date: if return_.is_empty() { None } else { NaiveDate::from_ymd_opt(2024, 7, 8) },
        };
        let pairing = best_round_trip(&outbound, &return_);
        RouteResult::new(&route, outbound, return_, pairing)
    }

    #[tokio::test]
    async fn test_empty_outbound_skips_language_model() {
        let client = CountingClient::replying(Ok("unused".to_string()));
        let adapter = SummaryAdapter::new(client.clone());

        let text = adapter.summarize(&result(vec![], vec![])).await.unwrap();

        assert_eq!(text, NO_FLIGHTS_PLACEHOLDER);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_summary_is_trimmed_model_output() {
        let client = CountingClient::replying(Ok("  DL at 250 USD is the best deal.\n".to_string()));
        let adapter = SummaryAdapter::new(client.clone());

        let text = adapter.summarize(&result(vec![record("DL", 250.0, 1, 0)], vec![])).await.unwrap();

        assert_eq!(text, "DL at 250 USD is the best deal.");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        let prompt = client.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("from NYC to LAX"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_returned() {
        let client = CountingClient::replying(Err(CoreError::SummarizationFailure("401".to_string())));
        let adapter = SummaryAdapter::new(client);

        let err = adapter.summarize(&result(vec![record("DL", 250.0, 1, 0)], vec![])).await.unwrap_err();
        assert!(matches!(err, CoreError::SummarizationFailure(_)));
    }

    #[tokio::test]
    async fn test_blank_reply_is_a_failure() {
        let adapter = SummaryAdapter::new(CountingClient::replying(Ok("   ".to_string())));
        let outcome = adapter.summarize(&result(vec![record("DL", 250.0, 1, 0)], vec![])).await;
        assert!(outcome.is_err());
    }

    #[test]
    fn test_flight_lines_use_fixed_field_order() {
        let lines = render_flight_lines(&[record("DL", 250.0, 1, 1), record("AA", 300.0, 1, 0)]);
        assert_eq!(
            lines,
            "Date: 2024-07-01, Departure: 2024-07-01T08:00:00, Arrival: 2024-07-01T11:30:00, Price: 250.00 USD, Airline: DL, Stops: 1\n\
             Date: 2024-07-01, Departure: 2024-07-01T08:00:00, Arrival: 2024-07-01T11:30:00, Price: 300.00 USD, Airline: AA, Stops: 0"
        );
    }

    #[test]
    fn test_one_way_prompt_omits_round_trip_focus() {
        let prompt = build_prompt(&result(vec![record("DL", 250.0, 1, 0)], vec![]));
        assert!(prompt.contains("Outbound flights (2024-07-01):"));
        assert!(prompt.contains("4. The time differences between flights"));
        assert!(!prompt.contains("Return flights"));
        assert!(!prompt.contains("round-trip"));
    }

    #[test]
    fn test_round_trip_prompt_includes_return_and_total() {
        let prompt = build_prompt(&result(
            vec![record("DL", 250.0, 1, 0)],
            vec![record("UA", 180.0, 8, 1)],
        ));
        assert!(prompt.contains("Return flights (2024-07-08):"));
        assert!(prompt.contains("Airline: UA, Stops: 1"));
        assert!(prompt.contains("total 430.00 USD"));
        assert!(prompt.contains("5. The total cost of the best round-trip combination"));
        // deterministic for the same input
        assert_eq!(prompt, build_prompt(&result(vec![record("DL", 250.0, 1, 0)], vec![record("UA", 180.0, 8, 1)])));
    }
}
