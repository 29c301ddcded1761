//! SOQL builders and record mapping between the CRM's duck-typed JSON and
//! the fully-typed records the engines accept.

use chrono::NaiveDate;
use serde_json::Value;

use super::{objects, traveler_fields, trip_fields};
use crate::workflows::health::domain::{TripRecord, TripTraveler, DEFAULT_EXPECTED_COMPLETION};
use crate::workflows::triage::domain::{MissingItem, TravelerRecord, UNKNOWN_DEPARTURE_DAYS};

/// Traveler mapped out of a CRM record, keeping the parent trip id around
/// for roster grouping.
#[derive(Debug, Clone)]
pub(crate) struct CrmTraveler {
    pub trip_id: Option<String>,
    pub record: TravelerRecord,
}

pub(crate) fn travelers_query() -> String {
    format!(
        "SELECT {id}, {name}, {email}, Trip__c, Trip__r.Name, Trip__r.{departure}, \
         {passport}, {medical}, {waiver}, {emergency}, {dietary}, \
         {vip}, {previous_trips}, {follow_ups}, {last_contact}, {notes} \
         FROM {object} \
         WHERE Trip__r.{departure} >= TODAY \
         ORDER BY Trip__r.{departure} ASC",
        id = traveler_fields::ID,
        name = traveler_fields::NAME,
        email = traveler_fields::EMAIL,
        departure = trip_fields::DEPARTURE_DATE,
        passport = traveler_fields::PASSPORT_NUMBER,
        medical = traveler_fields::MEDICAL_FORM_STATUS,
        waiver = traveler_fields::WAIVER_STATUS,
        emergency = traveler_fields::EMERGENCY_CONTACT,
        dietary = traveler_fields::DIETARY_REQUIREMENTS,
        vip = traveler_fields::IS_VIP,
        previous_trips = traveler_fields::PREVIOUS_TRIPS,
        follow_ups = traveler_fields::FOLLOW_UP_COUNT,
        last_contact = traveler_fields::LAST_CONTACT_DATE,
        notes = traveler_fields::NOTES,
        object = objects::TRAVELER,
    )
}

pub(crate) fn trips_query() -> String {
    format!(
        "SELECT {id}, {name}, {departure}, {destination}, {total}, {typical} \
         FROM {object} \
         WHERE {departure} >= TODAY \
         ORDER BY {departure} ASC",
        id = trip_fields::ID,
        name = trip_fields::NAME,
        departure = trip_fields::DEPARTURE_DATE,
        destination = trip_fields::DESTINATION,
        total = trip_fields::TOTAL_TRAVELERS,
        typical = trip_fields::TYPICAL_COMPLETION,
        object = objects::TRIP,
    )
}

fn str_field(record: &Value, field: &str) -> Option<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn date_field(record: &Value, field: &str) -> Option<NaiveDate> {
    record
        .get(field)
        .and_then(Value::as_str)
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

fn count_field(record: &Value, field: &str) -> u32 {
    record
        .get(field)
        .and_then(Value::as_f64)
        .map(|value| value.max(0.0) as u32)
        .unwrap_or(0)
}

fn bool_field(record: &Value, field: &str) -> bool {
    record.get(field).and_then(Value::as_bool).unwrap_or(false)
}

/// A document field counts as present only when it is a non-empty string or
/// an explicit `true`; anything else leaves the item missing.
fn document_present(record: &Value, field: &str) -> bool {
    match record.get(field) {
        Some(Value::String(value)) => !value.trim().is_empty(),
        Some(Value::Bool(value)) => *value,
        _ => false,
    }
}

fn missing_items(record: &Value) -> Vec<MissingItem> {
    let mut missing = Vec::new();
    if !document_present(record, traveler_fields::PASSPORT_NUMBER) {
        missing.push(MissingItem::Passport);
    }
    if !document_present(record, traveler_fields::MEDICAL_FORM_STATUS) {
        missing.push(MissingItem::Medical);
    }
    if !document_present(record, traveler_fields::WAIVER_STATUS) {
        missing.push(MissingItem::Waiver);
    }
    if !document_present(record, traveler_fields::EMERGENCY_CONTACT) {
        missing.push(MissingItem::EmergencyContact);
    }
    if !document_present(record, traveler_fields::DIETARY_REQUIREMENTS) {
        missing.push(MissingItem::Dietary);
    }
    missing
}

pub(crate) fn days_until(departure: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match departure {
        Some(date) => {
            let days = (date - today).num_days();
            if days < 0 {
                0
            } else {
                days as u32
            }
        }
        None => UNKNOWN_DEPARTURE_DAYS,
    }
}

pub(crate) fn map_traveler(record: &Value, today: NaiveDate) -> CrmTraveler {
    let trip = record.get("Trip__r");
    let departure = trip.and_then(|value| date_field(value, trip_fields::DEPARTURE_DATE));
    let previous_trips = count_field(record, traveler_fields::PREVIOUS_TRIPS);

    CrmTraveler {
        trip_id: str_field(record, "Trip__c"),
        record: TravelerRecord {
            id: str_field(record, traveler_fields::ID).unwrap_or_default(),
            name: str_field(record, traveler_fields::NAME).unwrap_or_default(),
            email: str_field(record, traveler_fields::EMAIL).unwrap_or_default(),
            trip_name: trip
                .and_then(|value| str_field(value, trip_fields::NAME))
                .unwrap_or_else(|| "Unknown Trip".to_string()),
            days_until_departure: days_until(departure, today),
            missing_items: missing_items(record),
            previous_contacts: count_field(record, traveler_fields::FOLLOW_UP_COUNT),
            is_vip: bool_field(record, traveler_fields::IS_VIP),
            is_first_time: previous_trips == 0,
            notes: str_field(record, traveler_fields::NOTES).unwrap_or_default(),
        },
    }
}

pub(crate) fn map_trip(record: &Value, travelers: &[CrmTraveler], today: NaiveDate) -> TripRecord {
    let id = str_field(record, trip_fields::ID).unwrap_or_default();
    let departure = date_field(record, trip_fields::DEPARTURE_DATE);

    let roster: Vec<TripTraveler> = travelers
        .iter()
        .filter(|traveler| traveler.trip_id.as_deref() == Some(id.as_str()))
        .map(|traveler| TripTraveler {
            id: traveler.record.id.clone(),
            name: traveler.record.name.clone(),
            complete: traveler.record.missing_items.is_empty(),
            missing_items: traveler.record.missing_items.clone(),
            last_contact: None,
            last_contact_email: None,
            responded: None,
            party_size: None,
            passports_submitted: None,
        })
        .collect();

    let complete = roster.iter().filter(|traveler| traveler.complete).count();
    let completion_rate = if roster.is_empty() {
        0.0
    } else {
        complete as f64 / roster.len() as f64
    };

    let expected_completion_rate = record
        .get(trip_fields::TYPICAL_COMPLETION)
        .and_then(Value::as_f64)
        .map(|value| value.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_EXPECTED_COMPLETION);

    let total_travelers = {
        let declared = count_field(record, trip_fields::TOTAL_TRAVELERS) as usize;
        if declared > 0 {
            declared
        } else {
            roster.len()
        }
    };

    TripRecord {
        id,
        name: str_field(record, trip_fields::NAME).unwrap_or_default(),
        destination: str_field(record, trip_fields::DESTINATION).unwrap_or_default(),
        departure_date: departure,
        days_until_departure: days_until(departure, today),
        total_travelers,
        travelers: roster,
        completion_rate,
        expected_completion_rate,
        // Reply tracking lives outside the CRM snapshot; leave the rate at
        // zero rather than inventing one.
        response_rate: 0.0,
        documents_collected: 0,
        documents_required: 0,
        trip_leader: None,
        notes: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 28).expect("valid date")
    }

    #[test]
    fn derives_missing_items_from_null_document_fields() {
        let record = json!({
            "Id": "003A01",
            "Name": "Robert Kim",
            "Email": "robert.kim@example.com",
            "Trip__c": "a0B001",
            "Trip__r": { "Name": "Patagonia Trek", "Departure_Date__c": "2025-02-20" },
            "Passport_Number__c": null,
            "Medical_Form_Status__c": false,
            "Waiver_Status__c": true,
            "Emergency_Contact__c": "Jane Kim",
            "Dietary_Requirements__c": "vegetarian",
            "VIP__c": true,
            "Previous_Trips__c": 5.0,
            "Follow_Up_Count__c": 3.0,
            "Notes__c": "VIP repeat customer, usually very responsive"
        });

        let mapped = map_traveler(&record, today());
        assert_eq!(mapped.trip_id.as_deref(), Some("a0B001"));

        let traveler = mapped.record;
        assert_eq!(
            traveler.missing_items,
            vec![MissingItem::Passport, MissingItem::Medical]
        );
        assert_eq!(traveler.days_until_departure, 23);
        assert_eq!(traveler.previous_contacts, 3);
        assert!(traveler.is_vip);
        assert!(!traveler.is_first_time);
    }

    #[test]
    fn unknown_departure_maps_to_far_future() {
        let record = json!({
            "Id": "003A02",
            "Name": "No Trip",
            "Passport_Number__c": null
        });

        let mapped = map_traveler(&record, today());
        assert_eq!(mapped.record.days_until_departure, UNKNOWN_DEPARTURE_DAYS);
        assert!(mapped.trip_id.is_none());
    }

    #[test]
    fn past_departures_clamp_to_zero_days() {
        assert_eq!(
            days_until(NaiveDate::from_ymd_opt(2025, 1, 20), today()),
            0
        );
    }

    #[test]
    fn trip_completion_comes_from_grouped_roster() {
        let travelers = vec![
            CrmTraveler {
                trip_id: Some("a0B001".to_string()),
                record: TravelerRecord {
                    id: "003A01".to_string(),
                    name: "Complete".to_string(),
                    email: String::new(),
                    trip_name: "Patagonia Trek".to_string(),
                    days_until_departure: 23,
                    missing_items: Vec::new(),
                    previous_contacts: 0,
                    is_vip: false,
                    is_first_time: false,
                    notes: String::new(),
                },
            },
            CrmTraveler {
                trip_id: Some("a0B001".to_string()),
                record: TravelerRecord {
                    id: "003A02".to_string(),
                    name: "Incomplete".to_string(),
                    email: String::new(),
                    trip_name: "Patagonia Trek".to_string(),
                    days_until_departure: 23,
                    missing_items: vec![MissingItem::Medical],
                    previous_contacts: 1,
                    is_vip: false,
                    is_first_time: false,
                    notes: String::new(),
                },
            },
        ];

        let record = json!({
            "Id": "a0B001",
            "Name": "Patagonia Trek",
            "Departure_Date__c": "2025-02-20",
            "Destination__c": "Chile & Argentina",
            "Total_Travelers__c": 2.0,
            "Typical_Completion_Rate__c": 0.65
        });

        let trip = map_trip(&record, &travelers, today());
        assert_eq!(trip.travelers.len(), 2);
        assert!((trip.completion_rate - 0.5).abs() < f64::EPSILON);
        assert!((trip.expected_completion_rate - 0.65).abs() < f64::EPSILON);
        assert_eq!(trip.days_until_departure, 23);
    }

    #[test]
    fn missing_baseline_falls_back_to_default() {
        let record = json!({
            "Id": "a0B002",
            "Name": "Iceland Explorer",
            "Departure_Date__c": "2025-04-10"
        });

        let trip = map_trip(&record, &[], today());
        assert!((trip.expected_completion_rate - DEFAULT_EXPECTED_COMPLETION).abs() < f64::EPSILON);
        assert_eq!(trip.total_travelers, 0);
    }
}
