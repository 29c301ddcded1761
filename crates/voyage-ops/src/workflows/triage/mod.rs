//! Traveler follow-up triage: deterministic priority classification and
//! ranking, with optional narrative annotation layered on top.

pub mod domain;
pub(crate) mod rules;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Channel, ClassifiedTraveler, DigestReport, DigestSummary, MissingItem, Priority, RawTraveler,
    TravelerRecord, Urgency, UNKNOWN_DEPARTURE_DAYS,
};
pub use router::{triage_router, DigestRequest};
pub use service::DigestService;
