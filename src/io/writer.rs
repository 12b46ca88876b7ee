//! Report output: the enriched table as CSV, and the run summary as
//! terminal text or JSON.

use crate::core::{AnalysisResults, EnrichedTicket, KpiSummary};
use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use std::io::Write;

/// Header of the enriched table: the input columns followed by every
/// derived column, in derivation order.
pub const OUTPUT_COLUMNS: [&str; 10] = [
    "Ticket_ID",
    "Created_Date",
    "Resolved_Date",
    "Status",
    "Interaction_Count",
    "Resolution_Time_Days",
    "Ticket_Age_Days",
    "Aging_Bucket",
    "SLA_Status",
    "Is_FCR",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait ReportWriter {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()>;
}

/// Writes the full enriched table, header included, no truncation.
pub struct CsvTableWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for CsvTableWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
        csv_writer.write_record(OUTPUT_COLUMNS)?;
        for ticket in &results.tickets {
            csv_writer.write_record(ticket_row(ticket))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

// Pure function: one output row, empty cells for absent optional values
fn ticket_row(ticket: &EnrichedTicket) -> Vec<String> {
    let record = &ticket.record;
    vec![
        record.ticket_id.clone(),
        format_date(record.created_date),
        record
            .resolved_date
            .map(format_date)
            .unwrap_or_default(),
        record.status.clone(),
        record.interaction_count.to_string(),
        ticket
            .resolution_time_days
            .map(format_days)
            .unwrap_or_default(),
        format_days(ticket.ticket_age_days),
        ticket.aging_bucket.to_string(),
        ticket.sla_status.to_string(),
        ticket.is_fcr.to_string(),
    ]
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

// Six decimals keeps sub-second resolution out of the report while
// surviving a write-then-read round trip
fn format_days(days: f64) -> String {
    let formatted = format!("{:.6}", days);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    input_path: &'a std::path::Path,
    timestamp: DateTime<Utc>,
    dropped_rows: usize,
    summary: &'a KpiSummary,
}

/// Writes only the run summary, as pretty JSON. Insufficient-data rates
/// serialize as `null`.
pub struct JsonSummaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonSummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonSummaryWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let document = SummaryDocument {
            input_path: &results.input_path,
            timestamp: results.timestamp,
            dropped_rows: results.dropped_rows,
            summary: &results.summary,
        };
        let json = serde_json::to_string_pretty(&document)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

/// Render the colored terminal summary block.
pub fn format_terminal_summary(results: &AnalysisResults) -> String {
    let summary = &results.summary;
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Ticket KPI Summary".bold()));
    out.push_str(&format!(
        "  Tickets analyzed: {} ({} open, {} resolved, {} dropped)\n",
        summary.total_tickets, summary.open_tickets, summary.resolved_tickets, results.dropped_rows
    ));
    out.push_str(&format!(
        "  SLA compliance rate: {}\n",
        format_rate(summary.sla_rate)
    ));
    out.push_str(&format!(
        "  FCR rate: {}\n",
        format_rate(summary.fcr_rate)
    ));
    out.push_str(&format!(
        "  Average resolution time: {}\n",
        match summary.avg_resolution_time_days {
            Some(days) => format!("{:.2} days", days).normal(),
            None => "insufficient data".yellow(),
        }
    ));
    out
}

fn format_rate(rate: Option<f64>) -> ColoredString {
    match rate {
        Some(value) => format!("{:.2}%", value).normal(),
        None => "insufficient data".yellow(),
    }
}
