//! Best-effort narrative enrichment behind the deterministic engines.
//!
//! Everything here annotates classifier output or produces free-text
//! collateral (drafts, interpretations, anomaly findings). It never assigns
//! a priority bucket or a health status.

pub(crate) mod client;
pub(crate) mod prompts;
pub mod types;

pub use client::AnthropicNarrativeClient;

use serde::de::DeserializeOwned;
use std::fmt::Write as _;
use std::future::Future;
use types::{
    AnomalyPayload, AnomalyReport, AnomalySnapshot, AnomalySummary, DraftMessage, FollowUpRequest,
    InterpretOutcome, InterpretRequest, ThreadDirection,
};

/// Error raised by the narrative collaborator.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generator is not configured")]
    Disabled,
    #[error("narrative request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("narrative service rejected the request ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("narrative response contained no text")]
    EmptyCompletion,
    #[error("no JSON object found in narrative response")]
    MissingPayload,
    #[error("malformed narrative payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Abstraction over the external model so services can be exercised with
/// scripted collaborators in tests.
pub trait NarrativeGenerator: Send + Sync {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send;
}

/// Placeholder generator for contexts that run without a model (CLI reports,
/// offline tests). Every call fails with `Disabled`.
pub struct Disabled;

impl NarrativeGenerator for Disabled {
    fn complete(
        &self,
        _system: &str,
        _user: &str,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send {
        async { Err(NarrativeError::Disabled) }
    }
}

/// Locate the JSON object inside a completion that may wrap it in prose or
/// code fences: everything from the first `{` through the last `}`.
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

pub(crate) fn parse_payload<T: DeserializeOwned>(text: &str) -> Result<T, NarrativeError> {
    let object = extract_json_object(text).ok_or(NarrativeError::MissingPayload)?;
    Ok(serde_json::from_str(object)?)
}

/// Draft one follow-up message for a traveler, optionally continuing an
/// existing email thread.
pub async fn draft_follow_up<N: NarrativeGenerator>(
    narrative: &N,
    request: &FollowUpRequest,
) -> Result<DraftMessage, NarrativeError> {
    let mut user = String::new();
    let kind = if request.request_phone_call {
        "email requesting a phone call"
    } else {
        "email"
    };
    let _ = writeln!(user, "Write a follow-up {kind} for this traveler:");
    let _ = writeln!(user);
    let _ = writeln!(user, "- Name: {}", request.name);
    let _ = writeln!(user, "- Email: {}", request.email);
    let _ = writeln!(user, "- Trip: {}", request.trip_name);
    match request.days_until_departure {
        Some(days) => {
            let _ = writeln!(user, "- Days until departure: {days}");
        }
        None => {
            let _ = writeln!(user, "- Days until departure: unknown");
        }
    }
    let _ = writeln!(
        user,
        "- Previous follow-up attempts: {}",
        request.previous_contacts
    );
    let _ = writeln!(user, "- Missing items: {}", request.missing_items.join(", "));
    if request.is_vip {
        let _ = writeln!(user, "- VIP customer");
    }
    if let Some(trips) = request.previous_trips {
        let _ = writeln!(user, "- Previous trips with Meridian: {trips}");
    }
    let _ = writeln!(
        user,
        "- Notes: {}",
        if request.notes.is_empty() {
            "None"
        } else {
            request.notes.as_str()
        }
    );

    if !request.conversation_history.is_empty() {
        let _ = writeln!(user, "\n## Conversation history\n");
        for message in &request.conversation_history {
            let direction = match message.direction {
                ThreadDirection::Outbound => "Meridian sent",
                ThreadDirection::Inbound => "Traveler replied",
            };
            let _ = writeln!(
                user,
                "**{} — {}**\nFrom: {}\nSubject: {}\n\n{}\n\n---",
                message.date, direction, message.from, message.subject, message.body
            );
        }
    }

    let _ = writeln!(user, "\nGenerate the email now.");

    let text = narrative.complete(prompts::FOLLOW_UP_PROMPT, &user).await?;
    parse_payload(&text)
}

/// Interpret an inbound traveler reply.
pub async fn interpret_response<N: NarrativeGenerator>(
    narrative: &N,
    request: &InterpretRequest,
) -> Result<InterpretOutcome, NarrativeError> {
    let mut context = String::new();
    if let Some(name) = &request.traveler_name {
        let _ = writeln!(context, "- Traveler name: {name}");
    }
    if !request.requested_items.is_empty() {
        let _ = writeln!(
            context,
            "- We asked them for: {}",
            request.requested_items.join(", ")
        );
    }
    if let Some(contacts) = request.previous_contacts {
        let _ = writeln!(context, "- Number of previous follow-ups: {contacts}");
    }
    if let Some(extra) = &request.additional_context {
        let _ = writeln!(context, "- Additional context: {extra}");
    }

    let mut user = format!(
        "Interpret this email response from a traveler:\n\n---\n{}\n---\n",
        request.response_text
    );
    if !context.is_empty() {
        let _ = write!(user, "\nContext provided:\n{context}");
    }
    let _ = write!(user, "\nAnalyze this response and provide your interpretation.");

    let text = narrative.complete(prompts::INTERPRET_PROMPT, &user).await?;
    parse_payload(&text)
}

/// Scan a data snapshot for anomalies. Findings come back sorted by priority
/// with the summary counts recomputed here rather than trusted from the
/// model.
pub async fn scan_anomalies<N: NarrativeGenerator>(
    narrative: &N,
    snapshot: &AnomalySnapshot,
) -> Result<AnomalyReport, NarrativeError> {
    let trips = serde_json::to_string_pretty(&snapshot.trips)?;
    let user = format!(
        "Analyze this traveler and trip data to detect anomalies, patterns, and outliers that need attention.\n\n\
         ## Trip data\n\n{trips}\n\n\
         ## Summary statistics\n\n\
         - Total trips: {}\n\
         - Total travelers: {}\n\
         - Travelers with missing items: {}\n\
         - Travelers complete: {}\n\n\
         Return your findings as JSON.",
        snapshot.summary.total_trips,
        snapshot.summary.total_travelers,
        snapshot.summary.travelers_with_missing_items,
        snapshot.summary.travelers_complete,
    );

    let text = narrative.complete(prompts::ANOMALY_PROMPT, &user).await?;
    let payload: AnomalyPayload = parse_payload(&text)?;

    let mut anomalies = payload.anomalies;
    anomalies.sort_by_key(|finding| finding.priority.rank());

    let summary = AnomalySummary {
        trips_analyzed: snapshot.summary.total_trips,
        travelers_analyzed: snapshot.summary.total_travelers,
        anomalies_found: anomalies.len(),
        high_priority: anomalies
            .iter()
            .filter(|finding| finding.priority == types::AnomalyPriority::High)
            .count(),
        medium_priority: anomalies
            .iter()
            .filter(|finding| finding.priority == types::AnomalyPriority::Medium)
            .count(),
        low_priority: anomalies
            .iter()
            .filter(|finding| finding.priority == types::AnomalyPriority::Low)
            .count(),
    };

    Ok(AnomalyReport { summary, anomalies })
}
