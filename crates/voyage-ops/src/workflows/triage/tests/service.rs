use std::sync::Arc;

use super::common::{raw, FailingNarrative, RecordingLog, ScriptedNarrative};
use crate::sources::{FollowUpAction, FollowUpEntry};
use crate::workflows::narrative::Disabled;
use crate::workflows::triage::domain::{MissingItem, Priority, RawTraveler, TravelerRecord};
use crate::workflows::triage::service::DigestService;

type OfflineService = DigestService<RecordingLog, Disabled>;

fn batch() -> Vec<TravelerRecord> {
    vec![
        raw("t-wait", 35, &["dietary"], 0),
        raw("t-critical-late", 6, &["passport"], 0),
        raw("t-attention", 20, &["medical"], 0),
        raw("t-complete", 10, &[], 1),
        raw("t-critical-early", 3, &["waiver"], 0),
    ]
    .into_iter()
    .map(TravelerRecord::from_raw)
    .collect()
}

#[test]
fn report_orders_buckets_then_days_and_excludes_complete() {
    let report = OfflineService::build_report(batch());

    let ids: Vec<&str> = report
        .travelers
        .iter()
        .map(|traveler| traveler.record.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["t-critical-early", "t-critical-late", "t-attention", "t-wait"]
    );

    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.critical, 2);
    assert_eq!(report.summary.attention, 1);
    assert_eq!(report.summary.wait, 1);
    assert_eq!(report.summary.complete, 1);
    assert!(!report.annotated);
}

#[test]
fn equal_days_keep_input_order() {
    let report = OfflineService::build_report(
        vec![
            raw("first", 20, &["medical"], 0),
            raw("second", 20, &["passport"], 0),
        ]
        .into_iter()
        .map(TravelerRecord::from_raw)
        .collect(),
    );

    let ids: Vec<&str> = report
        .travelers
        .iter()
        .map(|traveler| traveler.record.id.as_str())
        .collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn classification_is_idempotent() {
    let first = OfflineService::build_report(batch());
    let second = OfflineService::build_report(batch());
    assert_eq!(first, second);
}

#[test]
fn empty_batch_is_a_zeroed_report_not_an_error() {
    let report = OfflineService::build_report(Vec::new());
    assert!(report.travelers.is_empty());
    assert_eq!(report.summary.total, 0);
    assert_eq!(report.summary.complete, 0);
}

#[test]
fn normalization_supplies_safe_defaults() {
    let record = TravelerRecord::from_raw(RawTraveler {
        id: "sparse".to_string(),
        missing_items: vec!["Passport scan".to_string(), "passport".to_string()],
        ..RawTraveler::default()
    });

    // Duplicate labels collapse onto one tag; unknown numerics default low.
    assert_eq!(record.missing_items, vec![MissingItem::Passport]);
    assert_eq!(
        record.days_until_departure,
        crate::workflows::triage::domain::UNKNOWN_DEPARTURE_DAYS
    );
    assert_eq!(record.previous_contacts, 0);
    assert!(!record.is_vip);
}

#[test]
fn free_form_labels_normalize_onto_the_fixed_vocabulary() {
    assert_eq!(MissingItem::from_label("Signed waiver"), MissingItem::Waiver);
    assert_eq!(
        MissingItem::from_label("Emergency contact"),
        MissingItem::EmergencyContact
    );
    assert_eq!(
        MissingItem::from_label("Dietary preferences"),
        MissingItem::Dietary
    );
    assert!(!MissingItem::from_label("Visa photo").is_critical());
}

#[tokio::test]
async fn annotations_merge_without_touching_buckets() {
    let scripted = ScriptedNarrative(
        r#"{
            "travelers": [
                {
                    "id": "t-critical-early",
                    "priority": "wait",
                    "reasoning": "Departure is days away and the waiver is still outstanding.",
                    "message": { "subject": "Your waiver", "body": "Hi!" }
                },
                {
                    "id": "t-wait",
                    "reasoning": "Plenty of runway; check back next week.",
                    "message": { "subject": "sneaky", "body": "should be dropped" }
                }
            ]
        }"#
        .to_string(),
    );
    let service = DigestService::new(
        Arc::new(RecordingLog::default()),
        Some(Arc::new(scripted)),
    );

    let report = service.digest(batch(), true).await;
    assert!(report.annotated);

    let critical = report
        .travelers
        .iter()
        .find(|traveler| traveler.record.id == "t-critical-early")
        .expect("critical traveler present");
    // The model volunteered priority "wait"; the classifier's bucket stands.
    assert_eq!(critical.priority, Priority::Critical);
    assert!(critical.reasoning.is_some());
    assert!(critical.message.is_some());

    let waiting = report
        .travelers
        .iter()
        .find(|traveler| traveler.record.id == "t-wait")
        .expect("wait traveler present");
    assert!(waiting.reasoning.is_some());
    // Wait travelers never carry a draft, whatever the model returned.
    assert!(waiting.message.is_none());
}

#[tokio::test]
async fn narrative_failure_degrades_to_plain_report() {
    let service = DigestService::new(
        Arc::new(RecordingLog::default()),
        Some(Arc::new(FailingNarrative)),
    );

    let report = service.digest(batch(), true).await;
    assert!(!report.annotated);
    assert_eq!(report.travelers.len(), 4);
    assert!(report.travelers.iter().all(|t| t.reasoning.is_none()));
}

#[tokio::test]
async fn follow_ups_are_recorded() {
    let log = Arc::new(RecordingLog::default());
    let service: DigestService<RecordingLog, Disabled> = DigestService::new(log.clone(), None);

    service
        .record_follow_up(FollowUpEntry {
            traveler_id: "t001".to_string(),
            action: FollowUpAction::Phone,
            notes: "Left voicemail about passport scan".to_string(),
            message: None,
        })
        .await
        .expect("entry recorded");

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, FollowUpAction::Phone);
}
