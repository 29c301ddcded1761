use std::future::Future;
use std::sync::Mutex;

use crate::sources::{FollowUpEntry, FollowUpLog, FollowUpLogError};
use crate::workflows::narrative::{NarrativeError, NarrativeGenerator};
use crate::workflows::triage::domain::{MissingItem, RawTraveler, TravelerRecord};

pub(super) fn traveler(
    id: &str,
    days: u32,
    missing: &[MissingItem],
    contacts: u32,
) -> TravelerRecord {
    TravelerRecord {
        id: id.to_string(),
        name: format!("Traveler {id}"),
        email: format!("{id}@example.com"),
        trip_name: "Patagonia Explorer".to_string(),
        days_until_departure: days,
        missing_items: missing.to_vec(),
        previous_contacts: contacts,
        is_vip: false,
        is_first_time: false,
        notes: String::new(),
    }
}

pub(super) fn raw(id: &str, days: u32, missing: &[&str], contacts: u32) -> RawTraveler {
    RawTraveler {
        id: id.to_string(),
        days_until_departure: Some(days),
        missing_items: missing.iter().map(|label| label.to_string()).collect(),
        previous_contacts: Some(contacts),
        ..RawTraveler::default()
    }
}

/// Follow-up log capturing entries for assertions.
#[derive(Default)]
pub(super) struct RecordingLog {
    entries: Mutex<Vec<FollowUpEntry>>,
}

impl RecordingLog {
    pub(super) fn entries(&self) -> Vec<FollowUpEntry> {
        self.entries.lock().expect("log mutex poisoned").clone()
    }
}

impl FollowUpLog for RecordingLog {
    fn record(
        &self,
        entry: FollowUpEntry,
    ) -> impl Future<Output = Result<(), FollowUpLogError>> + Send {
        self.entries.lock().expect("log mutex poisoned").push(entry);
        async { Ok(()) }
    }
}

/// Narrative generator returning a fixed completion.
pub(super) struct ScriptedNarrative(pub(super) String);

impl NarrativeGenerator for ScriptedNarrative {
    fn complete(
        &self,
        _system: &str,
        _user: &str,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send {
        let body = self.0.clone();
        async move { Ok(body) }
    }
}

/// Narrative generator that always fails, for degradation tests.
pub(super) struct FailingNarrative;

impl NarrativeGenerator for FailingNarrative {
    fn complete(
        &self,
        _system: &str,
        _user: &str,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send {
        async {
            Err(NarrativeError::Status {
                status: 500,
                body: "upstream unavailable".to_string(),
            })
        }
    }
}
