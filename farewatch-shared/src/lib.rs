pub mod models;
pub mod pii;

pub use models::flight::{FlightRecord, Leg};
pub use models::route::{
    latest_per_route, LatestSnapshots, RouteConfig, RouteResult, RoundTripPairing, SearchSettings,
    NO_FLIGHTS_PLACEHOLDER,
};
pub use pii::Masked;
