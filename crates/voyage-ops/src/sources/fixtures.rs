//! Bundled sample batches used in mock mode, demos, and tests. The data
//! mirrors the situations coordinators actually see: imminent departures
//! with missing critical documents, travelers gone quiet after repeated
//! contact, far-out bookings that can wait, and complete files.

use std::future::Future;

use chrono::NaiveDate;

use super::{SourceError, TravelerSource, TripSource};
use crate::workflows::health::domain::{TripRecord, TripTraveler};
use crate::workflows::triage::domain::{MissingItem, TravelerRecord};

/// Fixture-backed data provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl TravelerSource for FixtureSource {
    fn travelers(&self) -> impl Future<Output = Result<Vec<TravelerRecord>, SourceError>> + Send {
        async { Ok(sample_travelers()) }
    }
}

impl TripSource for FixtureSource {
    fn trips(&self) -> impl Future<Output = Result<Vec<TripRecord>, SourceError>> + Send {
        async { Ok(sample_trips()) }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn sample_travelers() -> Vec<TravelerRecord> {
    vec![
        TravelerRecord {
            id: "t001".to_string(),
            name: "Marcus Chen".to_string(),
            email: "marcus.chen@example.com".to_string(),
            trip_name: "Patagonia Explorer".to_string(),
            days_until_departure: 3,
            missing_items: vec![MissingItem::Passport, MissingItem::Medical],
            previous_contacts: 3,
            is_vip: false,
            is_first_time: false,
            notes: "Has been unresponsive to emails. Phone number on file.".to_string(),
        },
        TravelerRecord {
            id: "t002".to_string(),
            name: "Sarah Mitchell".to_string(),
            email: "sarah.m@example.com".to_string(),
            trip_name: "Iceland Northern Lights".to_string(),
            days_until_departure: 5,
            missing_items: vec![MissingItem::Waiver],
            previous_contacts: 2,
            is_vip: false,
            is_first_time: false,
            notes: "Traveling for work this month. Prefers text messages.".to_string(),
        },
        TravelerRecord {
            id: "t003".to_string(),
            name: "Jennifer Walsh".to_string(),
            email: "jwalsh@example.com".to_string(),
            trip_name: "Morocco Discovery".to_string(),
            days_until_departure: 7,
            missing_items: vec![MissingItem::Passport, MissingItem::Waiver],
            previous_contacts: 2,
            is_vip: false,
            is_first_time: false,
            notes: "Attorney, very busy schedule. Best reached after 6pm.".to_string(),
        },
        TravelerRecord {
            id: "t004".to_string(),
            name: "Robert Thompson".to_string(),
            email: "rob.thompson@example.com".to_string(),
            trip_name: "Tanzania Safari".to_string(),
            days_until_departure: 12,
            missing_items: vec![MissingItem::Medical, MissingItem::Dietary],
            previous_contacts: 1,
            is_vip: false,
            is_first_time: true,
            notes: "First-time traveler. Very excited about the trip.".to_string(),
        },
        TravelerRecord {
            id: "t005".to_string(),
            name: "Emily Rodriguez".to_string(),
            email: "emily.r@example.com".to_string(),
            trip_name: "Peru Machu Picchu".to_string(),
            days_until_departure: 14,
            missing_items: vec![MissingItem::EmergencyContact],
            previous_contacts: 1,
            is_vip: false,
            is_first_time: false,
            notes: "Repeat customer. Knows the process.".to_string(),
        },
        TravelerRecord {
            id: "t006".to_string(),
            name: "Amanda Foster".to_string(),
            email: "afoster@example.com".to_string(),
            trip_name: "Vietnam Expedition".to_string(),
            days_until_departure: 21,
            missing_items: vec![MissingItem::Passport, MissingItem::Medical],
            previous_contacts: 0,
            is_vip: false,
            is_first_time: true,
            notes: "First international trip. May need extra guidance.".to_string(),
        },
        TravelerRecord {
            id: "t007".to_string(),
            name: "Priya Sharma".to_string(),
            email: "priya.sharma@example.com".to_string(),
            trip_name: "Bhutan Kingdom".to_string(),
            days_until_departure: 28,
            missing_items: vec![MissingItem::Passport],
            previous_contacts: 1,
            is_vip: true,
            is_first_time: false,
            notes: "VIP client. Personal assistant handles communications.".to_string(),
        },
        TravelerRecord {
            id: "t008".to_string(),
            name: "Kevin Martinez".to_string(),
            email: "kevin.m@example.com".to_string(),
            trip_name: "Costa Rica Rainforest".to_string(),
            days_until_departure: 35,
            missing_items: vec![MissingItem::Dietary],
            previous_contacts: 0,
            is_vip: false,
            is_first_time: false,
            notes: "Just booked last week. Plenty of time.".to_string(),
        },
        TravelerRecord {
            id: "t009".to_string(),
            name: "Daniel Kim".to_string(),
            email: "dkim@example.com".to_string(),
            trip_name: "Scottish Highlands".to_string(),
            days_until_departure: 60,
            missing_items: vec![
                MissingItem::Passport,
                MissingItem::Medical,
                MissingItem::Waiver,
            ],
            previous_contacts: 0,
            is_vip: false,
            is_first_time: false,
            notes: "Third trip with us. Just booked, will have time to complete everything."
                .to_string(),
        },
        TravelerRecord {
            id: "t010".to_string(),
            name: "Laura Bennett".to_string(),
            email: "laura.b@example.com".to_string(),
            trip_name: "Greek Islands".to_string(),
            days_until_departure: 20,
            missing_items: Vec::new(),
            previous_contacts: 2,
            is_vip: false,
            is_first_time: false,
            notes: "All documents complete. Ready to go!".to_string(),
        },
        TravelerRecord {
            id: "t011".to_string(),
            name: "Maria Santos".to_string(),
            email: "maria.santos@example.com".to_string(),
            trip_name: "Amazon Rainforest".to_string(),
            days_until_departure: 15,
            missing_items: Vec::new(),
            previous_contacts: 0,
            is_vip: false,
            is_first_time: true,
            notes: "Proactively submitted everything at booking.".to_string(),
        },
    ]
}

fn roster_entry(
    id: &str,
    name: &str,
    missing: Vec<MissingItem>,
    last_contact: Option<NaiveDate>,
    responded: Option<bool>,
) -> TripTraveler {
    TripTraveler {
        id: id.to_string(),
        name: name.to_string(),
        complete: missing.is_empty(),
        missing_items: missing,
        last_contact,
        last_contact_email: None,
        responded,
        party_size: None,
        passports_submitted: None,
    }
}

pub fn sample_trips() -> Vec<TripRecord> {
    vec![
        TripRecord {
            id: "trip-patagonia".to_string(),
            name: "Patagonia Trek".to_string(),
            destination: "Chile & Argentina".to_string(),
            departure_date: Some(date(2025, 2, 20)),
            days_until_departure: 23,
            total_travelers: 8,
            travelers: vec![
                roster_entry(
                    "t1",
                    "Sarah Chen",
                    vec![MissingItem::Passport],
                    Some(date(2025, 1, 18)),
                    Some(false),
                ),
                roster_entry(
                    "t2",
                    "Michael Torres",
                    vec![MissingItem::Passport, MissingItem::Medical],
                    Some(date(2025, 1, 22)),
                    Some(false),
                ),
                roster_entry(
                    "t3",
                    "Jennifer Park",
                    vec![MissingItem::Medical],
                    Some(date(2025, 1, 20)),
                    Some(true),
                ),
                roster_entry(
                    "t4",
                    "David Wilson",
                    vec![MissingItem::Medical, MissingItem::Waiver],
                    Some(date(2025, 1, 15)),
                    Some(false),
                ),
                roster_entry(
                    "t5",
                    "Emily Brown",
                    vec![MissingItem::EmergencyContact],
                    Some(date(2025, 1, 25)),
                    Some(true),
                ),
                roster_entry("t6", "James Lee", Vec::new(), None, None),
                roster_entry("t7", "Anna Martinez", Vec::new(), None, None),
                roster_entry(
                    "t8",
                    "Chris Johnson",
                    vec![
                        MissingItem::Passport,
                        MissingItem::Medical,
                        MissingItem::Waiver,
                    ],
                    Some(date(2025, 1, 10)),
                    Some(false),
                ),
            ],
            completion_rate: 0.25,
            expected_completion_rate: 0.75,
            response_rate: 0.33,
            documents_collected: 12,
            documents_required: 40,
            trip_leader: Some("Sarah Chen".to_string()),
            notes: "Adventure-focused group, mostly first-time travelers.".to_string(),
        },
        TripRecord {
            id: "trip-morocco".to_string(),
            name: "Morocco Discovery".to_string(),
            destination: "Morocco".to_string(),
            departure_date: Some(date(2025, 3, 1)),
            days_until_departure: 32,
            total_travelers: 10,
            travelers: vec![
                TripTraveler {
                    last_contact_email: Some("batch-jan-15".to_string()),
                    ..roster_entry(
                        "t15",
                        "Alex Thompson",
                        vec![MissingItem::Passport, MissingItem::Medical],
                        Some(date(2025, 1, 15)),
                        Some(false),
                    )
                },
                TripTraveler {
                    last_contact_email: Some("batch-jan-15".to_string()),
                    ..roster_entry(
                        "t16",
                        "Beth Martinez",
                        vec![MissingItem::Passport, MissingItem::Waiver],
                        Some(date(2025, 1, 15)),
                        Some(false),
                    )
                },
                TripTraveler {
                    last_contact_email: Some("batch-jan-15".to_string()),
                    ..roster_entry(
                        "t17",
                        "Carlos Rivera",
                        vec![MissingItem::Medical, MissingItem::Waiver],
                        Some(date(2025, 1, 15)),
                        Some(false),
                    )
                },
                roster_entry(
                    "t18",
                    "Diana Foster",
                    vec![
                        MissingItem::Passport,
                        MissingItem::Medical,
                        MissingItem::Waiver,
                        MissingItem::EmergencyContact,
                    ],
                    None,
                    None,
                ),
                roster_entry(
                    "t19",
                    "Eric Nelson",
                    vec![
                        MissingItem::Passport,
                        MissingItem::Medical,
                        MissingItem::Waiver,
                        MissingItem::Dietary,
                    ],
                    None,
                    None,
                ),
                roster_entry(
                    "t20",
                    "George White",
                    vec![MissingItem::Waiver],
                    Some(date(2025, 1, 20)),
                    Some(true),
                ),
                roster_entry("t21", "Helen Brown", Vec::new(), None, None),
                roster_entry("t22", "Ian Davis", Vec::new(), None, None),
                roster_entry("t23", "Julia Wilson", Vec::new(), None, None),
            ],
            completion_rate: 0.30,
            expected_completion_rate: 0.50,
            response_rate: 0.25,
            documents_collected: 18,
            documents_required: 50,
            trip_leader: None,
            notes: "Mixed group, several travelers have not engaged at all.".to_string(),
        },
        TripRecord {
            id: "trip-iceland".to_string(),
            name: "Iceland Explorer".to_string(),
            destination: "Iceland".to_string(),
            departure_date: Some(date(2025, 4, 10)),
            days_until_departure: 72,
            total_travelers: 4,
            travelers: vec![TripTraveler {
                party_size: Some(4),
                passports_submitted: Some(2),
                ..roster_entry(
                    "t25",
                    "The Henderson Family",
                    vec![MissingItem::Passport, MissingItem::Medical],
                    Some(date(2025, 1, 20)),
                    Some(true),
                )
            }],
            completion_rate: 0.50,
            expected_completion_rate: 0.30,
            response_rate: 1.0,
            documents_collected: 8,
            documents_required: 20,
            trip_leader: Some("Henderson Family".to_string()),
            notes: "Family of 4 on one booking. May be unclear who still needs to submit."
                .to_string(),
        },
        TripRecord {
            id: "trip-tanzania".to_string(),
            name: "Tanzania Safari".to_string(),
            destination: "Tanzania".to_string(),
            departure_date: Some(date(2025, 3, 15)),
            days_until_departure: 46,
            total_travelers: 6,
            travelers: vec![
                roster_entry("t9", "Robert Kim", Vec::new(), None, None),
                roster_entry("t10", "Lisa Wang", Vec::new(), None, None),
                roster_entry("t11", "Tom Anderson", Vec::new(), None, None),
                roster_entry("t12", "Maria Garcia", Vec::new(), None, None),
                roster_entry(
                    "t13",
                    "John Smith",
                    vec![MissingItem::Medical],
                    Some(date(2025, 1, 24)),
                    Some(true),
                ),
                roster_entry(
                    "t14",
                    "Susan Davis",
                    vec![MissingItem::Medical],
                    Some(date(2025, 1, 24)),
                    Some(true),
                ),
            ],
            completion_rate: 0.67,
            expected_completion_rate: 0.50,
            response_rate: 1.0,
            documents_collected: 24,
            documents_required: 30,
            trip_leader: Some("Robert Kim".to_string()),
            notes: "Repeat customers, VIP group. Robert's fifth trip.".to_string(),
        },
        TripRecord {
            id: "trip-japan".to_string(),
            name: "Japan Cultural".to_string(),
            destination: "Japan".to_string(),
            departure_date: Some(date(2025, 2, 15)),
            days_until_departure: 18,
            total_travelers: 12,
            travelers: vec![
                roster_entry(
                    "t36",
                    "Nancy White",
                    vec![MissingItem::Dietary],
                    Some(date(2025, 1, 26)),
                    Some(true),
                ),
                roster_entry(
                    "t37",
                    "Oscar Green",
                    vec![MissingItem::EmergencyContact],
                    Some(date(2025, 1, 26)),
                    Some(true),
                ),
            ],
            completion_rate: 0.83,
            expected_completion_rate: 0.90,
            response_rate: 1.0,
            documents_collected: 56,
            documents_required: 60,
            trip_leader: Some("Nancy White".to_string()),
            notes: "Almost there. Only minor items remaining.".to_string(),
        },
        TripRecord {
            id: "trip-greece".to_string(),
            name: "Greek Islands".to_string(),
            destination: "Greece".to_string(),
            departure_date: Some(date(2025, 3, 8)),
            days_until_departure: 39,
            total_travelers: 2,
            travelers: vec![
                roster_entry("t40", "Laura Bennett", Vec::new(), None, None),
                roster_entry("t41", "Paul Bennett", Vec::new(), None, None),
            ],
            completion_rate: 1.0,
            expected_completion_rate: 0.60,
            response_rate: 1.0,
            documents_collected: 10,
            documents_required: 10,
            trip_leader: Some("Laura Bennett".to_string()),
            notes: "Every document in before the first reminder.".to_string(),
        },
    ]
}
