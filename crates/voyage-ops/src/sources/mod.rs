//! Data providers feeding the classification workflows.
//!
//! Selection between the bundled fixtures and the live CRM happens once at
//! process start via [`crate::config::DataSourceConfig`]; business logic only
//! ever sees the traits below.

pub mod crm;
pub mod fixtures;

pub use crm::CrmSource;
pub use fixtures::FixtureSource;

use crate::workflows::health::domain::TripRecord;
use crate::workflows::narrative::types::DraftMessage;
use crate::workflows::triage::domain::TravelerRecord;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Error raised while fetching upstream data. Propagated unchanged to the
/// caller; the classifiers are never invoked on a failed fetch.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("crm authentication failed: {0}")]
    Auth(String),
    #[error("crm request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("crm query rejected ({status}): {body}")]
    Query { status: u16, body: String },
    #[error("malformed crm record: {0}")]
    Decode(String),
}

pub trait TravelerSource: Send + Sync {
    /// Fetch the full traveler batch for upcoming departures.
    fn travelers(&self) -> impl Future<Output = Result<Vec<TravelerRecord>, SourceError>> + Send;
}

pub trait TripSource: Send + Sync {
    /// Fetch upcoming trips with their rosters.
    fn trips(&self) -> impl Future<Output = Result<Vec<TripRecord>, SourceError>> + Send;
}

/// Follow-up action taken (or deliberately skipped) for a traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpAction {
    Email,
    Phone,
    Skipped,
}

impl FollowUpAction {
    pub const fn label(self) -> &'static str {
        match self {
            FollowUpAction::Email => "email",
            FollowUpAction::Phone => "phone",
            FollowUpAction::Skipped => "skipped",
        }
    }
}

/// One logged outreach decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpEntry {
    pub traveler_id: String,
    pub action: FollowUpAction,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<DraftMessage>,
}

#[derive(Debug, thiserror::Error)]
pub enum FollowUpLogError {
    #[error("follow-up log unavailable: {0}")]
    Unavailable(String),
}

/// Sink recording follow-up actions so contact counts stay truthful.
pub trait FollowUpLog: Send + Sync {
    fn record(
        &self,
        entry: FollowUpEntry,
    ) -> impl Future<Output = Result<(), FollowUpLogError>> + Send;
}
