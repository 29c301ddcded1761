use super::domain::{HealthStatus, Readiness, TripRecord};

/// Readiness gap below which a trip is critical. Strict less-than: the
/// comparison always uses the full-precision delta, never the rounded
/// display percentage.
const CRITICAL_DELTA: f64 = -0.30;

/// Readiness gap below which a trip is at risk.
const AT_RISK_DELTA: f64 = -0.15;

/// Inside this window a low absolute completion is critical on its own,
/// regardless of the baseline.
const CRUNCH_WINDOW_DAYS: u32 = 14;

const CRUNCH_MINIMUM_COMPLETION: f64 = 0.70;

/// Assign the health bucket for one trip. First match wins; full completion
/// overrides every other signal.
pub(crate) fn status_for(trip: &TripRecord) -> HealthStatus {
    if trip.completion_rate >= 1.0 {
        return HealthStatus::Complete;
    }

    let delta = readiness_delta(trip);
    if delta < CRITICAL_DELTA
        || (trip.days_until_departure < CRUNCH_WINDOW_DAYS
            && trip.completion_rate < CRUNCH_MINIMUM_COMPLETION)
    {
        return HealthStatus::Critical;
    }

    if delta < AT_RISK_DELTA {
        return HealthStatus::AtRisk;
    }

    HealthStatus::Healthy
}

pub(crate) fn readiness_delta(trip: &TripRecord) -> f64 {
    trip.completion_rate - trip.expected_completion_rate
}

pub(crate) fn readiness_for(trip: &TripRecord) -> Readiness {
    let delta = readiness_delta(trip);
    Readiness {
        actual: trip.completion_rate,
        expected: trip.expected_completion_rate,
        delta,
        label: readiness_label(delta),
    }
}

/// Human-readable gap, rounded to whole percent for display only.
pub(crate) fn readiness_label(delta: f64) -> String {
    let percentage = (delta.abs() * 100.0).round() as i64;
    if delta >= 0.0 {
        format!("{percentage}% ahead of expected")
    } else {
        format!("{percentage}% behind expected")
    }
}
