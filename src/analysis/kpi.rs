//! KPI stage: per-row SLA and FCR flags, plus table-wide summary rates.

use crate::config::KpiConfig;
use crate::core::{EnrichedTicket, KpiSummary, SlaStatus};

// Pure function: strict threshold on the already-derived age
pub fn sla_status(ticket_age_days: f64, threshold_days: f64) -> SlaStatus {
    if ticket_age_days <= threshold_days {
        SlaStatus::Met
    } else {
        SlaStatus::Breached
    }
}

// Pure function: single interaction, optionally requiring resolved status
pub fn is_fcr(interaction_count: u32, status: &str, requires_resolved: bool) -> bool {
    interaction_count == 1 && (!requires_resolved || status == "Resolved")
}

// Pure function: percentage of rows matching a predicate, None on an
// empty table rather than NaN
fn rate_percent<F>(tickets: &[EnrichedTicket], predicate: F) -> Option<f64>
where
    F: Fn(&EnrichedTicket) -> bool,
{
    if tickets.is_empty() {
        return None;
    }
    let matching = tickets.iter().filter(|t| predicate(t)).count();
    Some(matching as f64 / tickets.len() as f64 * 100.0)
}

// Pure function: mean resolution time over resolved tickets only; open
// tickets are excluded, not counted as zero
fn average_resolution_time(tickets: &[EnrichedTicket]) -> Option<f64> {
    let resolved: Vec<f64> = tickets
        .iter()
        .filter_map(|t| t.resolution_time_days)
        .collect();
    if resolved.is_empty() {
        return None;
    }
    Some(resolved.iter().sum::<f64>() / resolved.len() as f64)
}

/// Fill in `sla_status` and `is_fcr` on every row and compute the summary.
pub fn calculate_kpis(
    mut tickets: Vec<EnrichedTicket>,
    config: &KpiConfig,
) -> (Vec<EnrichedTicket>, KpiSummary) {
    for ticket in &mut tickets {
        ticket.sla_status = sla_status(ticket.ticket_age_days, config.sla_threshold_days);
        ticket.is_fcr = is_fcr(
            ticket.record.interaction_count,
            &ticket.record.status,
            config.fcr_requires_resolved_status,
        );
    }

    let open = tickets.iter().filter(|t| t.record.is_open()).count();
    let summary = KpiSummary {
        sla_rate: rate_percent(&tickets, |t| t.sla_status == SlaStatus::Met),
        fcr_rate: rate_percent(&tickets, |t| t.is_fcr),
        avg_resolution_time_days: average_resolution_time(&tickets),
        total_tickets: tickets.len(),
        open_tickets: open,
        resolved_tickets: tickets.len() - open,
    };

    (tickets, summary)
}
