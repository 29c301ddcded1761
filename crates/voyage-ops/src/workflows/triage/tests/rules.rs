use super::common::traveler;
use crate::workflows::triage::domain::{Channel, MissingItem, Priority, Urgency};
use crate::workflows::triage::rules::classify_record;

#[test]
fn imminent_departure_with_critical_items_and_repeated_contacts() {
    let record = traveler(
        "t001",
        3,
        &[MissingItem::Passport, MissingItem::Medical],
        3,
    );
    let outcome = classify_record(&record);
    assert_eq!(outcome.priority, Priority::Critical);
    assert_eq!(outcome.urgency, Urgency::High);
    assert_eq!(outcome.channel, Channel::Phone);
}

#[test]
fn far_out_dietary_only_waits_over_email() {
    let record = traveler("t011", 35, &[MissingItem::Dietary], 0);
    let outcome = classify_record(&record);
    assert_eq!(outcome.priority, Priority::Wait);
    assert_eq!(outcome.urgency, Urgency::Low);
    assert_eq!(outcome.channel, Channel::Email);
}

#[test]
fn complete_file_dominates_every_other_signal() {
    let mut record = traveler("t016", 1, &[], 5);
    record.is_vip = true;
    record.is_first_time = true;
    let outcome = classify_record(&record);
    assert_eq!(outcome.priority, Priority::None);
    assert_eq!(outcome.urgency, Urgency::Low);
}

#[test]
fn critical_window_boundary_is_inclusive_at_seven_days() {
    let at_boundary = traveler("a", 7, &[MissingItem::Passport], 0);
    assert_eq!(classify_record(&at_boundary).priority, Priority::Critical);

    let past_boundary = traveler("b", 8, &[MissingItem::Passport], 0);
    assert_eq!(classify_record(&past_boundary).priority, Priority::Attention);
}

#[test]
fn repeated_contacts_escalate_only_inside_thirty_days() {
    let inside = traveler("a", 30, &[MissingItem::Dietary], 3);
    assert_eq!(classify_record(&inside).priority, Priority::Critical);

    let outside = traveler("b", 31, &[MissingItem::Dietary], 3);
    assert_eq!(classify_record(&outside).priority, Priority::Wait);
}

#[test]
fn any_missing_item_is_critical_under_five_days() {
    let record = traveler("a", 5, &[MissingItem::Dietary], 0);
    assert_eq!(classify_record(&record).priority, Priority::Critical);
}

#[test]
fn non_critical_items_get_a_reminder_inside_two_weeks() {
    let inside = traveler("a", 14, &[MissingItem::EmergencyContact], 0);
    assert_eq!(classify_record(&inside).priority, Priority::Attention);

    let outside = traveler("b", 15, &[MissingItem::EmergencyContact], 0);
    assert_eq!(classify_record(&outside).priority, Priority::Wait);
}

#[test]
fn two_contacts_inside_thirty_days_need_attention() {
    let record = traveler("a", 25, &[MissingItem::Dietary], 2);
    assert_eq!(classify_record(&record).priority, Priority::Attention);
}

#[test]
fn first_time_travelers_with_multiple_items_need_attention_even_far_out() {
    let mut first_timer = traveler(
        "a",
        40,
        &[MissingItem::EmergencyContact, MissingItem::Dietary],
        0,
    );
    first_timer.is_first_time = true;
    assert_eq!(classify_record(&first_timer).priority, Priority::Attention);

    let repeat = traveler(
        "b",
        40,
        &[MissingItem::EmergencyContact, MissingItem::Dietary],
        0,
    );
    assert_eq!(classify_record(&repeat).priority, Priority::Wait);
}

#[test]
fn severity_never_drops_as_departure_approaches() {
    // Sweep a traveler with a missing critical item toward departure: the
    // priority rank may only move toward critical as days shrink.
    let mut previous_rank = None;
    for days in (0..=60).rev() {
        let record = traveler("sweep", days, &[MissingItem::Passport], 0);
        let rank = classify_record(&record).priority.rank();
        if let Some(previous) = previous_rank {
            assert!(
                rank <= previous,
                "severity regressed between {} and {} days",
                days + 1,
                days
            );
        }
        previous_rank = Some(rank);
    }
}

#[test]
fn phone_is_reserved_for_silence_or_imminent_critical_items() {
    let silent = traveler("a", 45, &[MissingItem::Dietary], 3);
    assert_eq!(classify_record(&silent).channel, Channel::Phone);

    let imminent = traveler("b", 6, &[MissingItem::Waiver], 0);
    assert_eq!(classify_record(&imminent).channel, Channel::Phone);

    let routine = traveler("c", 6, &[MissingItem::Dietary], 0);
    assert_eq!(classify_record(&routine).channel, Channel::Email);
}

#[test]
fn unknown_departure_is_treated_as_far_future() {
    let record = traveler(
        "a",
        crate::workflows::triage::domain::UNKNOWN_DEPARTURE_DAYS,
        &[MissingItem::Passport],
        0,
    );
    assert_eq!(classify_record(&record).priority, Priority::Wait);
}
