//! Integration specifications for the traveler triage digest, driven through
//! the public service facade the way API callers consume it.

use std::future::Future;
use std::sync::Mutex;

use voyage_ops::sources::fixtures::sample_travelers;
use voyage_ops::sources::{FollowUpEntry, FollowUpLog, FollowUpLogError};
use voyage_ops::workflows::narrative::Disabled;
use voyage_ops::workflows::triage::{
    Channel, DigestService, MissingItem, Priority, RawTraveler, TravelerRecord, Urgency,
};

#[derive(Default)]
struct RecordingLog {
    entries: Mutex<Vec<FollowUpEntry>>,
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

type OfflineService = DigestService<RecordingLog, Disabled>;

fn record(id: &str, days: u32, missing: &[MissingItem], contacts: u32) -> TravelerRecord {
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

#[test]
fn critical_traveler_gets_high_urgency_phone_outreach() {
    let report = OfflineService::build_report(vec![record(
        "t001",
        3,
        &[MissingItem::Passport, MissingItem::Medical],
        3,
    )]);

    let classified = &report.travelers[0];
    assert_eq!(classified.priority, Priority::Critical);
    assert_eq!(classified.urgency, Urgency::High);
    assert_eq!(classified.channel, Channel::Phone);
    assert!(classified.should_follow_up);
}

#[test]
fn far_out_minor_item_waits_over_email() {
    let report = OfflineService::build_report(vec![record("t011", 35, &[MissingItem::Dietary], 0)]);

    let classified = &report.travelers[0];
    assert_eq!(classified.priority, Priority::Wait);
    assert_eq!(classified.urgency, Urgency::Low);
    assert_eq!(classified.channel, Channel::Email);
    assert!(!classified.should_follow_up);
}

#[test]
fn complete_travelers_are_excluded_but_counted() {
    let mut complete = record("t016", 2, &[], 4);
    complete.is_vip = true;
    let report = OfflineService::build_report(vec![complete]);

    assert!(report.travelers.is_empty());
    assert_eq!(report.summary.total, 1);
    assert_eq!(report.summary.complete, 1);
}

#[test]
fn fixture_batch_classifies_into_expected_buckets() {
    let report = OfflineService::build_report(sample_travelers());

    assert_eq!(report.summary.total, 11);
    assert_eq!(report.summary.critical, 3);
    assert_eq!(report.summary.attention, 4);
    assert_eq!(report.summary.wait, 2);
    assert_eq!(report.summary.complete, 2);

    // Grouped by bucket, soonest departure first inside each group.
    let ids: Vec<&str> = report
        .travelers
        .iter()
        .map(|traveler| traveler.record.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["t001", "t002", "t003", "t004", "t005", "t006", "t007", "t008", "t009"]
    );
}

#[test]
fn repeated_classification_is_bit_identical() {
    let reports: Vec<_> = (0..4)
        .map(|_| OfflineService::build_report(sample_travelers()))
        .collect();

    for report in &reports[1..] {
        assert_eq!(report, &reports[0]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_see_identical_reports() {
    let handles: Vec<_> = (0..8)
        .map(|_| tokio::spawn(async { OfflineService::build_report(sample_travelers()) }))
        .collect();

    let mut reports = Vec::new();
    for handle in handles {
        reports.push(handle.await.expect("classification task completes"));
    }

    for report in &reports[1..] {
        assert_eq!(report, &reports[0]);
    }
}

#[test]
fn report_serializes_original_fields_alongside_derived_ones() {
    let report = OfflineService::build_report(vec![record(
        "t001",
        3,
        &[MissingItem::Passport],
        1,
    )]);

    let value = serde_json::to_value(&report).expect("report serializes");
    let traveler = &value["travelers"][0];
    assert_eq!(traveler["id"], "t001");
    assert_eq!(traveler["days_until_departure"], 3);
    assert_eq!(traveler["missing_items"][0], "passport");
    assert_eq!(traveler["priority"], "critical");
    assert_eq!(traveler["urgency"], "high");
    assert_eq!(traveler["channel"], "phone");
    assert_eq!(value["summary"]["critical"], 1);
}

#[test]
fn sparse_wire_records_classify_with_safe_defaults() {
    let raw: RawTraveler = serde_json::from_value(serde_json::json!({
        "id": "sparse",
        "missing_items": ["Medical form"]
    }))
    .expect("sparse record parses");

    let report = OfflineService::build_report(vec![TravelerRecord::from_raw(raw)]);
    let classified = &report.travelers[0];
    // Unknown departure reads as far future, so the safest bucket applies.
    assert_eq!(classified.priority, Priority::Wait);
    assert_eq!(classified.record.missing_items, vec![MissingItem::Medical]);
}
