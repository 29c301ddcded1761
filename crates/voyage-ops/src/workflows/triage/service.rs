use std::fmt::Write as _;
use std::sync::Arc;

use super::domain::{ClassifiedTraveler, DigestReport, DigestSummary, Priority, TravelerRecord};
use super::rules;
use crate::sources::{FollowUpEntry, FollowUpLog, FollowUpLogError};
use crate::workflows::narrative::types::DigestAnnotations;
use crate::workflows::narrative::{parse_payload, prompts, NarrativeGenerator};
use tracing::warn;

/// Service composing the priority rules, follow-up log, and optional
/// narrative annotation layer.
pub struct DigestService<L, N> {
    log: Arc<L>,
    narrative: Option<Arc<N>>,
}

impl<L, N> DigestService<L, N>
where
    L: FollowUpLog + 'static,
    N: NarrativeGenerator + 'static,
{
    pub fn new(log: Arc<L>, narrative: Option<Arc<N>>) -> Self {
        Self { log, narrative }
    }

    /// Classify and rank a batch of normalized records. Pure: no I/O, no
    /// shared state, identical input yields identical output.
    pub fn build_report(records: Vec<TravelerRecord>) -> DigestReport {
        let mut summary = DigestSummary {
            total: records.len(),
            ..DigestSummary::default()
        };
        let mut travelers = Vec::with_capacity(records.len());

        for record in records {
            let outcome = rules::classify_record(&record);
            match outcome.priority {
                Priority::Critical => summary.critical += 1,
                Priority::Attention => summary.attention += 1,
                Priority::Wait => summary.wait += 1,
                Priority::None => summary.complete += 1,
            }

            // Complete files never enter the action list.
            if outcome.priority == Priority::None {
                continue;
            }

            let should_follow_up =
                matches!(outcome.priority, Priority::Critical | Priority::Attention);
            travelers.push(ClassifiedTraveler {
                record,
                priority: outcome.priority,
                urgency: outcome.urgency,
                channel: outcome.channel,
                should_follow_up,
                reasoning: None,
                message: None,
            });
        }

        // Stable sort keeps equal-days records in input order.
        travelers.sort_by_key(|traveler| {
            (traveler.priority.rank(), traveler.record.days_until_departure)
        });

        DigestReport {
            travelers,
            summary,
            annotated: false,
        }
    }

    /// Classify a batch and, when requested and configured, enrich it with
    /// reasoning and draft messages. Annotation is best effort: a narrative
    /// failure degrades to the plain deterministic report.
    pub async fn digest(&self, records: Vec<TravelerRecord>, include_drafts: bool) -> DigestReport {
        let mut report = Self::build_report(records);

        if !include_drafts || report.travelers.is_empty() {
            return report;
        }
        let Some(narrative) = &self.narrative else {
            return report;
        };

        let user = digest_user_prompt(&report);
        match narrative.complete(prompts::DIGEST_PROMPT, &user).await {
            Ok(text) => match parse_payload::<DigestAnnotations>(&text) {
                Ok(annotations) => {
                    merge_annotations(&mut report, annotations);
                    report.annotated = true;
                }
                Err(err) => warn!(error = %err, "digest annotation payload rejected"),
            },
            Err(err) => warn!(error = %err, "digest annotation skipped"),
        }

        report
    }

    pub async fn record_follow_up(&self, entry: FollowUpEntry) -> Result<(), FollowUpLogError> {
        self.log.record(entry).await
    }
}

fn digest_user_prompt(report: &DigestReport) -> String {
    let mut user = format!(
        "Write digest annotations for the following {} prioritized travelers.\n",
        report.travelers.len()
    );

    for (index, traveler) in report.travelers.iter().enumerate() {
        let record = &traveler.record;
        let _ = writeln!(user, "\n### Traveler {}: {}", index + 1, record.name);
        let _ = writeln!(user, "- ID: {}", record.id);
        let _ = writeln!(user, "- Trip: {}", record.trip_name);
        let _ = writeln!(user, "- Days until departure: {}", record.days_until_departure);
        let _ = writeln!(user, "- Missing items: {}", record.missing_tags());
        let _ = writeln!(user, "- Previous contacts: {}", record.previous_contacts);
        if record.is_vip {
            let _ = writeln!(user, "- VIP customer");
        }
        if record.is_first_time {
            let _ = writeln!(user, "- First-time traveler");
        }
        if !record.notes.is_empty() {
            let _ = writeln!(user, "- Notes: {}", record.notes);
        }
        let _ = writeln!(
            user,
            "- Assigned priority: {} | channel: {}",
            traveler.priority.label(),
            traveler.channel.label()
        );
        let _ = writeln!(
            user,
            "- Draft needed: {}",
            if traveler.should_follow_up { "yes" } else { "no" }
        );
    }

    user
}

/// Copy reasoning and drafts onto the classified travelers. Bucket fields
/// are never touched; the classifier is authoritative even when the model
/// volunteers a different priority.
fn merge_annotations(report: &mut DigestReport, annotations: DigestAnnotations) {
    for annotation in annotations.travelers {
        let Some(traveler) = report
            .travelers
            .iter_mut()
            .find(|traveler| traveler.record.id == annotation.id)
        else {
            continue;
        };

        traveler.reasoning = annotation.reasoning;
        if traveler.should_follow_up {
            traveler.message = annotation.message;
        }
    }
}
