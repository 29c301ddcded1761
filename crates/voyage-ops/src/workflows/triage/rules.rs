use super::domain::{Channel, Priority, TravelerRecord, Urgency};

/// Inside this window a missing critical item forces the top bucket.
const CRITICAL_WINDOW_DAYS: u32 = 7;

/// Inside this window any missing item at all forces the top bucket.
const IMMINENT_WINDOW_DAYS: u32 = 5;

/// Repeated-contact escalation only applies while departure is near enough
/// for the silence to matter.
const ESCALATION_HORIZON_DAYS: u32 = 30;

const NON_CRITICAL_REMINDER_DAYS: u32 = 14;

pub(crate) struct RuleOutcome {
    pub priority: Priority,
    pub urgency: Urgency,
    pub channel: Channel,
}

/// Assign the priority bucket and derived fields for one traveler. Pure and
/// deterministic; rules are evaluated in order and the first match wins.
pub(crate) fn classify_record(record: &TravelerRecord) -> RuleOutcome {
    let priority = priority_for(record);
    RuleOutcome {
        priority,
        urgency: urgency_for(priority),
        channel: channel_for(record),
    }
}

fn priority_for(record: &TravelerRecord) -> Priority {
    // A complete file wins over every other signal.
    if record.is_complete() {
        return Priority::None;
    }

    let days = record.days_until_departure;
    let critical_missing = record.has_critical_missing();

    if days <= CRITICAL_WINDOW_DAYS && critical_missing {
        return Priority::Critical;
    }
    if record.previous_contacts >= 3 && days <= ESCALATION_HORIZON_DAYS {
        return Priority::Critical;
    }
    if days <= IMMINENT_WINDOW_DAYS {
        return Priority::Critical;
    }

    // Critical items unanswered anywhere inside the escalation horizon; the
    // sub-week case was already consumed above.
    if days <= ESCALATION_HORIZON_DAYS && critical_missing {
        return Priority::Attention;
    }
    // Only non-critical items can remain missing at this point.
    if days <= NON_CRITICAL_REMINDER_DAYS {
        return Priority::Attention;
    }
    if record.previous_contacts == 2 && days <= ESCALATION_HORIZON_DAYS {
        return Priority::Attention;
    }
    if record.is_first_time && record.missing_items.len() >= 2 {
        return Priority::Attention;
    }

    // Far-out departures with little contact history, and deferred
    // non-critical items, all monitor from here.
    Priority::Wait
}

const fn urgency_for(priority: Priority) -> Urgency {
    match priority {
        Priority::Critical => Urgency::High,
        Priority::Attention => Urgency::Medium,
        Priority::Wait | Priority::None => Urgency::Low,
    }
}

fn channel_for(record: &TravelerRecord) -> Channel {
    if record.previous_contacts >= 3
        || (record.days_until_departure < CRITICAL_WINDOW_DAYS && record.has_critical_missing())
    {
        Channel::Phone
    } else {
        Channel::Email
    }
}
