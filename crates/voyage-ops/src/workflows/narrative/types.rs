use crate::workflows::health::domain::TripRecord;
use crate::workflows::triage::domain::{TravelerRecord, Urgency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subject/body pair produced by the follow-up drafting prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMessage {
    pub subject: String,
    pub body: String,
}

/// One message of an email thread supplied as drafting context.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub date: String,
    pub direction: ThreadDirection,
    pub from: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadDirection {
    Inbound,
    Outbound,
}

/// Context for drafting a single follow-up message.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub trip_name: String,
    #[serde(default)]
    pub days_until_departure: Option<u32>,
    #[serde(default)]
    pub previous_contacts: u32,
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_vip: bool,
    #[serde(default)]
    pub previous_trips: Option<u32>,
    /// When the draft should nudge toward a call instead of a plain reply.
    #[serde(default)]
    pub request_phone_call: bool,
    #[serde(default)]
    pub conversation_history: Vec<ThreadMessage>,
}

/// Per-traveler enrichment returned by the digest annotation prompt. Only
/// the reasoning and draft are consumed; any bucket the model volunteers is
/// discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestAnnotation {
    pub id: String,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub message: Option<DraftMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestAnnotations {
    #[serde(default)]
    pub travelers: Vec<DigestAnnotation>,
}

/// Context for interpreting an inbound traveler reply.
#[derive(Debug, Clone, Deserialize)]
pub struct InterpretRequest {
    pub response_text: String,
    #[serde(default)]
    pub traveler_name: Option<String>,
    #[serde(default)]
    pub requested_items: Vec<String>,
    #[serde(default)]
    pub previous_contacts: Option<u32>,
    #[serde(default)]
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Concerned,
    Frustrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    None,
    Wait,
    Remind,
    Clarify,
    Call,
    Escalate,
    Reply,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyDetails {
    #[serde(default)]
    pub commitments: Vec<String>,
    #[serde(default)]
    pub requests: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub dates_mentioned: Vec<String>,
}

/// Structured reading of an inbound reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretOutcome {
    pub summary: String,
    pub interpretation: String,
    pub sentiment: Sentiment,
    pub recommended_action: RecommendedAction,
    pub urgency: Urgency,
    #[serde(default)]
    pub key_details: KeyDetails,
    #[serde(default)]
    pub suggested_reply: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Pattern,
    BehaviorChange,
    StatisticalOutlier,
    Timing,
    DataInconsistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyPriority {
    High,
    Medium,
    Low,
}

impl AnomalyPriority {
    pub const fn rank(self) -> u8 {
        match self {
            AnomalyPriority::High => 0,
            AnomalyPriority::Medium => 1,
            AnomalyPriority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFinding {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub priority: AnomalyPriority,
    pub title: String,
    #[serde(default)]
    pub affected_entity: Option<String>,
    pub description: String,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub possible_causes: Vec<String>,
    #[serde(default)]
    pub suggested_action: Option<String>,
    #[serde(default)]
    pub affected_travelers: Vec<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnomalySummary {
    pub trips_analyzed: usize,
    pub travelers_analyzed: usize,
    pub anomalies_found: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
}

/// Findings plus counts recomputed on our side of the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub summary: AnomalySummary,
    pub anomalies: Vec<AnomalyFinding>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnomalyPayload {
    #[serde(default)]
    pub anomalies: Vec<AnomalyFinding>,
}

/// Everything the anomaly scan shows the model, serialized verbatim into the
/// user prompt.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalySnapshot {
    pub trips: Vec<TripRecord>,
    pub travelers: Vec<TravelerRecord>,
    pub summary: SnapshotSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub total_trips: usize,
    pub total_travelers: usize,
    pub travelers_with_missing_items: usize,
    pub travelers_complete: usize,
}

impl AnomalySnapshot {
    pub fn new(trips: Vec<TripRecord>, travelers: Vec<TravelerRecord>) -> Self {
        let travelers_with_missing_items = travelers
            .iter()
            .filter(|traveler| !traveler.missing_items.is_empty())
            .count();
        let summary = SnapshotSummary {
            total_trips: trips.len(),
            total_travelers: travelers.len(),
            travelers_with_missing_items,
            travelers_complete: travelers.len() - travelers_with_missing_items,
        };

        Self {
            trips,
            travelers,
            summary,
        }
    }
}

/// Trip-level trajectory estimate from the trip health prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub prediction: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Per-trip enrichment returned by the trip health prompt. Status fields the
/// model emits are ignored; the classifier owns the bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct TripAnnotation {
    pub trip_id: String,
    #[serde(default)]
    pub assessment: Option<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub trajectory: Option<Trajectory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripAnnotations {
    #[serde(default)]
    pub trips: Vec<TripAnnotation>,
}
