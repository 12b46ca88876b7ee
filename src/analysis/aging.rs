//! Aging stage: resolution durations, open-ticket ages and bucket labels.
//!
//! Resolved tickets get a fractional-day age; open tickets get a whole-day
//! age measured against a single "now" captured once per run. That
//! asymmetry is part of the reporting contract and must not be smoothed
//! over.

use crate::core::{AgingBucket, EnrichedTicket, SlaStatus, TicketRecord};
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Ordered (upper bound, bucket) pairs, evaluated top-down with
/// first-match-wins. Boundary values belong to the bucket they terminate.
const BUCKET_EDGES: [(f64, AgingBucket); 4] = [
    (1.0, AgingBucket::ZeroToOne),
    (3.0, AgingBucket::OneToThree),
    (7.0, AgingBucket::ThreeToSeven),
    (14.0, AgingBucket::SevenToFourteen),
];

// Pure function: elapsed fractional days between creation and resolution
pub fn resolution_time_days(record: &TicketRecord) -> Option<f64> {
    record
        .resolved_date
        .map(|resolved| (resolved - record.created_date).num_seconds() as f64 / SECONDS_PER_DAY)
}

// Pure function: whole-day age of an open ticket relative to `now`,
// clamped at zero so future-dated rows keep the non-negativity invariant
pub fn open_ticket_age_days(record: &TicketRecord, now: DateTime<Utc>) -> f64 {
    (now - record.created_date).num_days().max(0) as f64
}

/// Age of a ticket at measurement time: resolution duration for resolved
/// tickets, whole days since creation for open ones.
pub fn ticket_age_days(record: &TicketRecord, now: DateTime<Utc>) -> f64 {
    match resolution_time_days(record) {
        Some(days) => days,
        None => open_ticket_age_days(record, now),
    }
}

pub fn bucket_for(age_days: f64) -> AgingBucket {
    for (upper, bucket) in BUCKET_EDGES {
        if age_days <= upper {
            return bucket;
        }
    }
    AgingBucket::FourteenPlus
}

/// Run the aging stage over the whole table. `now` is captured by the
/// caller exactly once per run.
pub fn analyze_aging(records: Vec<TicketRecord>, now: DateTime<Utc>) -> Vec<EnrichedTicket> {
    records
        .into_iter()
        .map(|record| {
            let resolution_time = resolution_time_days(&record);
            let age = ticket_age_days(&record, now);
            EnrichedTicket {
                record,
                resolution_time_days: resolution_time,
                ticket_age_days: age,
                aging_bucket: bucket_for(age),
                // Placeholders; the KPI stage fills these in.
                sla_status: SlaStatus::Met,
                is_fcr: false,
            }
        })
        .collect()
}
