use std::sync::Arc;

use super::domain::{AssessedTrip, HealthReport, HealthStatus, HealthSummary, TripRecord};
use super::rules;
use crate::workflows::narrative::types::TripAnnotations;
use crate::workflows::narrative::{parse_payload, prompts, NarrativeGenerator};
use std::fmt::Write as _;
use tracing::warn;

/// Service composing the health rules and the optional narrative analyst.
pub struct TripHealthService<N> {
    narrative: Option<Arc<N>>,
}

impl<N> TripHealthService<N>
where
    N: NarrativeGenerator + 'static,
{
    pub fn new(narrative: Option<Arc<N>>) -> Self {
        Self { narrative }
    }

    /// Classify and rank a batch of normalized trips. Pure and deterministic.
    pub fn build_report(records: Vec<TripRecord>) -> HealthReport {
        let mut summary = HealthSummary {
            total_trips: records.len(),
            ..HealthSummary::default()
        };
        let mut trips = Vec::with_capacity(records.len());

        for record in records {
            let status = rules::status_for(&record);
            match status {
                HealthStatus::Critical => summary.critical += 1,
                HealthStatus::AtRisk => summary.at_risk += 1,
                HealthStatus::Healthy => summary.healthy += 1,
                HealthStatus::Complete => summary.complete += 1,
            }
            summary.total_travelers += record.total_travelers;

            let readiness = rules::readiness_for(&record);
            trips.push(AssessedTrip {
                record,
                status,
                readiness,
                assessment: None,
                concerns: Vec::new(),
                positives: Vec::new(),
                recommendations: Vec::new(),
                trajectory: None,
            });
        }

        // Stable sort keeps equal-days trips in input order.
        trips.sort_by_key(|trip| (trip.status.rank(), trip.record.days_until_departure));

        HealthReport {
            trips,
            summary,
            annotated: false,
        }
    }

    /// Classify a batch and, when requested and configured, attach analyst
    /// prose. Annotation is best effort and can never move a trip between
    /// buckets.
    pub async fn assess(&self, records: Vec<TripRecord>, include_assessments: bool) -> HealthReport {
        let mut report = Self::build_report(records);

        if !include_assessments || report.trips.is_empty() {
            return report;
        }
        let Some(narrative) = &self.narrative else {
            return report;
        };

        let user = health_user_prompt(&report);
        match narrative.complete(prompts::TRIP_HEALTH_PROMPT, &user).await {
            Ok(text) => match parse_payload::<TripAnnotations>(&text) {
                Ok(annotations) => {
                    merge_annotations(&mut report, annotations);
                    report.annotated = true;
                }
                Err(err) => warn!(error = %err, "trip assessment payload rejected"),
            },
            Err(err) => warn!(error = %err, "trip assessment skipped"),
        }

        report
    }
}

fn health_user_prompt(report: &HealthReport) -> String {
    let mut user = format!(
        "Write assessments for the following {} classified trips.\n",
        report.trips.len()
    );

    for (index, trip) in report.trips.iter().enumerate() {
        let record = &trip.record;
        let _ = writeln!(user, "\n### Trip {}: {}", index + 1, record.name);
        let _ = writeln!(user, "- ID: {}", record.id);
        let _ = writeln!(user, "- Destination: {}", record.destination);
        let _ = writeln!(user, "- Days until departure: {}", record.days_until_departure);
        let _ = writeln!(user, "- Total travelers: {}", record.total_travelers);
        let _ = writeln!(
            user,
            "- Trip leader: {}",
            record.trip_leader.as_deref().unwrap_or("Not assigned")
        );
        let _ = writeln!(
            user,
            "- Assigned status: {} | readiness: {}",
            trip.status.label(),
            trip.readiness.label
        );
        let _ = writeln!(
            user,
            "- Completion: {:.0}% actual vs {:.0}% expected | response rate {:.0}%",
            record.completion_rate * 100.0,
            record.expected_completion_rate * 100.0,
            record.response_rate * 100.0
        );
        let _ = writeln!(
            user,
            "- Documents: {} of {} collected",
            record.documents_collected, record.documents_required
        );

        if !record.travelers.is_empty() {
            let _ = writeln!(user, "- Roster:");
            for traveler in &record.travelers {
                let mut line = format!(
                    "  - {}: {}",
                    traveler.name,
                    if traveler.complete { "complete" } else { "incomplete" }
                );
                if !traveler.missing_items.is_empty() {
                    let tags: Vec<&str> = traveler
                        .missing_items
                        .iter()
                        .map(|item| item.as_tag())
                        .collect();
                    let _ = write!(line, " (missing: {})", tags.join(", "));
                }
                if let Some(last_contact) = traveler.last_contact {
                    let _ = write!(line, " | last contact: {last_contact}");
                }
                if let Some(responded) = traveler.responded {
                    let _ = write!(line, " | responded: {}", if responded { "yes" } else { "no" });
                }
                if let Some(party) = traveler.party_size {
                    let _ = write!(line, " | party of {party}");
                }
                if let Some(passports) = traveler.passports_submitted {
                    let _ = write!(line, " | {passports} passports submitted");
                }
                let _ = writeln!(user, "{line}");
            }
        }

        if !record.notes.is_empty() {
            let _ = writeln!(user, "- Notes: {}", record.notes);
        }
    }

    user
}

fn merge_annotations(report: &mut HealthReport, annotations: TripAnnotations) {
    for annotation in annotations.trips {
        let Some(trip) = report
            .trips
            .iter_mut()
            .find(|trip| trip.record.id == annotation.trip_id)
        else {
            continue;
        };

        trip.assessment = annotation.assessment;
        trip.concerns = annotation.concerns;
        trip.positives = annotation.positives;
        trip.recommendations = annotation.recommendations;
        trip.trajectory = annotation.trajectory;
    }
}
