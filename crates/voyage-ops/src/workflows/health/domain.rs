use crate::workflows::narrative::types::Trajectory;
use crate::workflows::triage::domain::{MissingItem, UNKNOWN_DEPARTURE_DAYS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Historical document-collection baseline used when the upstream source has
/// none recorded for a trip at its current days-out.
pub const DEFAULT_EXPECTED_COMPLETION: f64 = 0.65;

/// Inbound trip shape as callers and upstream sources provide it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrip {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_until_departure: Option<u32>,
    #[serde(default)]
    pub total_travelers: Option<usize>,
    #[serde(default)]
    pub travelers: Vec<RawTripTraveler>,
    #[serde(default)]
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub expected_completion_rate: Option<f64>,
    #[serde(default)]
    pub response_rate: Option<f64>,
    #[serde(default)]
    pub documents_collected: Option<u32>,
    #[serde(default)]
    pub documents_required: Option<u32>,
    #[serde(default)]
    pub trip_leader: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTripTraveler {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default)]
    pub last_contact: Option<NaiveDate>,
    #[serde(default)]
    pub last_contact_email: Option<String>,
    #[serde(default)]
    pub responded: Option<bool>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub passports_submitted: Option<u32>,
}

/// Fully-typed trip record, the only shape the health rules accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub id: String,
    pub name: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    pub days_until_departure: u32,
    pub total_travelers: usize,
    pub travelers: Vec<TripTraveler>,
    pub completion_rate: f64,
    pub expected_completion_rate: f64,
    pub response_rate: f64,
    pub documents_collected: u32,
    pub documents_required: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_leader: Option<String>,
    pub notes: String,
}

/// Roster entry used by the narrative layer to spot patterns; the health
/// rules themselves only read the trip-level rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripTraveler {
    pub id: String,
    pub name: String,
    pub complete: bool,
    pub missing_items: Vec<MissingItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passports_submitted: Option<u32>,
}

impl TripTraveler {
    fn from_raw(raw: RawTripTraveler) -> Self {
        let mut missing_items: Vec<MissingItem> = Vec::with_capacity(raw.missing_items.len());
        for label in &raw.missing_items {
            if label.trim().is_empty() {
                continue;
            }
            let item = MissingItem::from_label(label);
            if !missing_items.contains(&item) {
                missing_items.push(item);
            }
        }

        let complete = match raw.status.as_deref() {
            Some(status) => status.trim().eq_ignore_ascii_case("complete"),
            None => missing_items.is_empty(),
        };

        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            complete,
            missing_items,
            last_contact: raw.last_contact,
            last_contact_email: raw.last_contact_email,
            responded: raw.responded,
            party_size: raw.party_size,
            passports_submitted: raw.passports_submitted,
        }
    }
}

impl TripRecord {
    /// Single normalization step: rates clamp to [0, 1], a missing baseline
    /// falls back to the historical default, unknown departures go far
    /// future.
    pub fn from_raw(raw: RawTrip) -> Self {
        let travelers: Vec<TripTraveler> =
            raw.travelers.into_iter().map(TripTraveler::from_raw).collect();
        let total_travelers = raw.total_travelers.unwrap_or(travelers.len());

        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            destination: raw.destination.unwrap_or_default(),
            departure_date: raw.departure_date,
            days_until_departure: raw.days_until_departure.unwrap_or(UNKNOWN_DEPARTURE_DAYS),
            total_travelers,
            travelers,
            completion_rate: raw.completion_rate.unwrap_or(0.0).clamp(0.0, 1.0),
            expected_completion_rate: raw
                .expected_completion_rate
                .unwrap_or(DEFAULT_EXPECTED_COMPLETION)
                .clamp(0.0, 1.0),
            response_rate: raw.response_rate.unwrap_or(0.0).clamp(0.0, 1.0),
            documents_collected: raw.documents_collected.unwrap_or(0),
            documents_required: raw.documents_required.unwrap_or(0),
            trip_leader: raw.trip_leader,
            notes: raw.notes.unwrap_or_default(),
        }
    }
}

/// Trip health bucket. Rank drives display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Critical,
    AtRisk,
    Healthy,
    Complete,
}

impl HealthStatus {
    pub const fn rank(self) -> u8 {
        match self {
            HealthStatus::Critical => 0,
            HealthStatus::AtRisk => 1,
            HealthStatus::Healthy => 2,
            HealthStatus::Complete => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            HealthStatus::Critical => "critical",
            HealthStatus::AtRisk => "at_risk",
            HealthStatus::Healthy => "healthy",
            HealthStatus::Complete => "complete",
        }
    }
}

/// Actual versus expected completion, with the signed gap kept at full
/// precision and a rounded display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readiness {
    pub actual: f64,
    pub expected: f64,
    pub delta: f64,
    pub label: String,
}

/// A trip with its health classification attached. Narrative fields are
/// filled by the annotation layer when one is configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessedTrip {
    #[serde(flatten)]
    pub record: TripRecord,
    pub status: HealthStatus,
    pub readiness: Readiness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concerns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub positives: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<Trajectory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    pub total_trips: usize,
    pub total_travelers: usize,
    pub critical: usize,
    pub at_risk: usize,
    pub healthy: usize,
    pub complete: usize,
}

/// Ordered trip assessments plus batch-level counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub trips: Vec<AssessedTrip>,
    pub summary: HealthSummary,
    pub annotated: bool,
}
