pub mod normalizer;
pub mod ranker;
pub mod pairing;
pub mod processor;
pub mod summarizer;

pub use normalizer::{normalize_offer, normalize_offers, NormalizeError, NormalizedBatch};
pub use ranker::{FareRanker, RankError, RankedLeg};
pub use pairing::best_round_trip;
pub use processor::RouteProcessor;
pub use summarizer::{build_prompt, render_flight_lines, SummaryAdapter, SUMMARY_UNAVAILABLE_PLACEHOLDER};
