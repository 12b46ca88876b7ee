use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A raw ticket row after loading and date parsing.
///
/// Rows with no creation date never make it into this type; they are
/// dropped by the loader. An absent `resolved_date` means the ticket is
/// still open.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TicketRecord {
    pub ticket_id: String,
    pub created_date: DateTime<Utc>,
    pub resolved_date: Option<DateTime<Utc>>,
    pub status: String,
    pub interaction_count: u32,
}

impl TicketRecord {
    pub fn is_open(&self) -> bool {
        self.resolved_date.is_none()
    }
}

/// A ticket record together with all derived columns.
///
/// Derived fields are written once by the aging and KPI stages and never
/// mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnrichedTicket {
    #[serde(flatten)]
    pub record: TicketRecord,
    /// Fractional days between creation and resolution; `None` for open tickets.
    pub resolution_time_days: Option<f64>,
    /// Fractional days for resolved tickets, whole days for open tickets.
    pub ticket_age_days: f64,
    pub aging_bucket: AgingBucket,
    pub sla_status: SlaStatus,
    pub is_fcr: bool,
}

/// Categorical age label. The five variants partition `[0, inf)` days into
/// right-closed intervals with upper bounds 1, 3, 7 and 14.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgingBucket {
    #[serde(rename = "0-1 Day")]
    ZeroToOne,
    #[serde(rename = "1-3 Days")]
    OneToThree,
    #[serde(rename = "3-7 Days")]
    ThreeToSeven,
    #[serde(rename = "7-14 Days")]
    SevenToFourteen,
    #[serde(rename = "14+ Days")]
    FourteenPlus,
}

impl AgingBucket {
    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::ZeroToOne => "0-1 Day",
            AgingBucket::OneToThree => "1-3 Days",
            AgingBucket::ThreeToSeven => "3-7 Days",
            AgingBucket::SevenToFourteen => "7-14 Days",
            AgingBucket::FourteenPlus => "14+ Days",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a ticket's age was within the SLA threshold at measurement time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlaStatus {
    Met,
    Breached,
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaStatus::Met => f.write_str("Met"),
            SlaStatus::Breached => f.write_str("Breached"),
        }
    }
}

/// Table-wide summary rates. `None` means the rate had no eligible rows
/// (insufficient data), never a NaN.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KpiSummary {
    /// Percentage of rows with `SlaStatus::Met`, in `[0, 100]`.
    pub sla_rate: Option<f64>,
    /// Percentage of rows flagged as first-contact resolutions, in `[0, 100]`.
    pub fcr_rate: Option<f64>,
    /// Mean resolution time over resolved tickets only.
    pub avg_resolution_time_days: Option<f64>,
    pub total_tickets: usize,
    pub open_tickets: usize,
    pub resolved_tickets: usize,
}

/// Everything a single pipeline run produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub input_path: PathBuf,
    /// Processing timestamp, captured once and reused for every open-ticket
    /// age calculation in the run.
    pub timestamp: DateTime<Utc>,
    pub tickets: Vec<EnrichedTicket>,
    /// Rows excluded at load because their creation date was null.
    pub dropped_rows: usize,
    pub summary: KpiSummary,
}
