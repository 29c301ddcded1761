//! Trip health: deterministic readiness classification and ranking across
//! upcoming departures.

pub mod domain;
pub(crate) mod rules;
pub mod service;

pub use domain::{
    AssessedTrip, HealthReport, HealthStatus, HealthSummary, RawTrip, RawTripTraveler, Readiness,
    TripRecord, TripTraveler, DEFAULT_EXPECTED_COMPLETION,
};
pub use service::TripHealthService;
