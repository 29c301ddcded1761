use clap::Args;

use crate::infra::InMemoryFollowUpLog;
use voyage_ops::error::AppError;
use voyage_ops::sources::fixtures::{sample_travelers, sample_trips};
use voyage_ops::workflows::health::{HealthReport, TripHealthService};
use voyage_ops::workflows::narrative::Disabled;
use voyage_ops::workflows::triage::{DigestReport, DigestService};

#[derive(Args, Debug, Default)]
pub(crate) struct DigestArgs {
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TripsArgs {
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {}

type OfflineDigest = DigestService<InMemoryFollowUpLog, Disabled>;
type OfflineHealth = TripHealthService<Disabled>;

pub(crate) fn run_digest_report(args: DigestArgs) -> Result<(), AppError> {
    let report = OfflineDigest::build_report(sample_travelers());
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("digest report serializes")
        );
    } else {
        render_digest(&report);
    }
    Ok(())
}

pub(crate) fn run_trip_report(args: TripsArgs) -> Result<(), AppError> {
    let report = OfflineHealth::build_report(sample_trips());
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("health report serializes")
        );
    } else {
        render_trips(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(_args: DemoArgs) -> Result<(), AppError> {
    println!("Travel ops copilot demo\n");

    render_digest(&OfflineDigest::build_report(sample_travelers()));
    println!();
    render_trips(&OfflineHealth::build_report(sample_trips()));

    Ok(())
}

fn render_digest(report: &DigestReport) {
    println!(
        "Daily follow-up digest: {} travelers evaluated ({} critical, {} attention, {} wait, {} complete)",
        report.summary.total,
        report.summary.critical,
        report.summary.attention,
        report.summary.wait,
        report.summary.complete
    );

    for traveler in &report.travelers {
        let record = &traveler.record;
        println!(
            "  [{:9}] {} — {} | departs in {} days | missing: {} | contacts: {} | {} via {}",
            traveler.priority.label(),
            record.name,
            record.trip_name,
            record.days_until_departure,
            record.missing_tags(),
            record.previous_contacts,
            traveler.urgency.label(),
            traveler.channel.label()
        );
    }
}

fn render_trips(report: &HealthReport) {
    println!(
        "Trip health: {} trips, {} travelers ({} critical, {} at risk, {} healthy, {} complete)",
        report.summary.total_trips,
        report.summary.total_travelers,
        report.summary.critical,
        report.summary.at_risk,
        report.summary.healthy,
        report.summary.complete
    );

    for trip in &report.trips {
        let record = &trip.record;
        println!(
            "  [{:8}] {} — departs in {} days | {:.0}% complete | {}",
            trip.status.label(),
            record.name,
            record.days_until_departure,
            record.completion_rate * 100.0,
            trip.readiness.label
        );
    }
}
