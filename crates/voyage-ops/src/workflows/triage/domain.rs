use crate::workflows::narrative::types::DraftMessage;
use serde::{Deserialize, Serialize, Serializer};

/// Sentinel for departures the upstream source could not date. Far enough out
/// that every day-based rule treats the traveler as low urgency.
pub const UNKNOWN_DEPARTURE_DAYS: u32 = 999;

/// Document tags tracked against each traveler file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MissingItem {
    Passport,
    Medical,
    Waiver,
    EmergencyContact,
    Dietary,
    Other(String),
}

impl MissingItem {
    /// Normalize a free-form label ("Passport scan", "medical", "Signed
    /// waiver") into the fixed vocabulary. Unrecognized labels are preserved
    /// as non-critical tags rather than dropped.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase();
        if normalized.contains("passport") {
            Self::Passport
        } else if normalized.contains("medical") {
            Self::Medical
        } else if normalized.contains("waiver") {
            Self::Waiver
        } else if normalized.contains("emergency") {
            Self::EmergencyContact
        } else if normalized.contains("diet") {
            Self::Dietary
        } else {
            Self::Other(normalized.replace(' ', "_"))
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Passport => "passport",
            Self::Medical => "medical",
            Self::Waiver => "waiver",
            Self::EmergencyContact => "emergency_contact",
            Self::Dietary => "dietary",
            Self::Other(tag) => tag,
        }
    }

    /// Critical items warrant outreach regardless of time remaining.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Passport | Self::Medical | Self::Waiver)
    }
}

impl Serialize for MissingItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_tag())
    }
}

/// Inbound traveler shape as callers and upstream sources provide it. Every
/// field except `id` is optional; normalization supplies safe defaults so one
/// sparse record never fails a batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTraveler {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub trip_name: Option<String>,
    #[serde(default)]
    pub days_until_departure: Option<u32>,
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default)]
    pub previous_contacts: Option<u32>,
    #[serde(default)]
    pub is_vip: Option<bool>,
    #[serde(default)]
    pub is_first_time: Option<bool>,
    #[serde(default)]
    pub previous_trips: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Fully-typed traveler record, the only shape the classifier accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub trip_name: String,
    pub days_until_departure: u32,
    pub missing_items: Vec<MissingItem>,
    pub previous_contacts: u32,
    pub is_vip: bool,
    pub is_first_time: bool,
    pub notes: String,
}

impl TravelerRecord {
    /// Single normalization step between the loose upstream shape and the
    /// classifier. Unknown departure dates become the far-future sentinel,
    /// item labels collapse onto the fixed vocabulary, and duplicates drop.
    pub fn from_raw(raw: RawTraveler) -> Self {
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

        let is_first_time = raw
            .is_first_time
            .unwrap_or(raw.previous_trips == Some(0));

        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            trip_name: raw.trip_name.unwrap_or_default(),
            days_until_departure: raw.days_until_departure.unwrap_or(UNKNOWN_DEPARTURE_DAYS),
            missing_items,
            previous_contacts: raw.previous_contacts.unwrap_or(0),
            is_vip: raw.is_vip.unwrap_or(false),
            is_first_time,
            notes: raw.notes.unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_items.is_empty()
    }

    pub fn has_critical_missing(&self) -> bool {
        self.missing_items.iter().any(MissingItem::is_critical)
    }

    pub fn missing_tags(&self) -> String {
        self.missing_items
            .iter()
            .map(MissingItem::as_tag)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Follow-up priority bucket. Rank drives display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    Attention,
    Wait,
    None,
}

impl Priority {
    pub const fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::Attention => 1,
            Priority::Wait => 2,
            Priority::None => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::Attention => "attention",
            Priority::Wait => "wait",
            Priority::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Phone => "phone",
        }
    }
}

/// A traveler with its classification attached. Narrative fields are filled
/// by the annotation layer when one is configured; they never feed back into
/// the bucket assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTraveler {
    #[serde(flatten)]
    pub record: TravelerRecord,
    pub priority: Priority,
    pub urgency: Urgency,
    pub channel: Channel,
    pub should_follow_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<DraftMessage>,
}

/// Per-bucket counts across the full evaluated batch, complete files
/// included even though they are excluded from the action list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigestSummary {
    pub total: usize,
    pub critical: usize,
    pub attention: usize,
    pub wait: usize,
    pub complete: usize,
}

/// Ordered digest of travelers needing action plus batch-level counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestReport {
    pub travelers: Vec<ClassifiedTraveler>,
    pub summary: DigestSummary,
    pub annotated: bool,
}
