// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    AgingBucket, AnalysisResults, EnrichedTicket, KpiSummary, SlaStatus, TicketRecord,
};

pub use crate::analysis::{analyze_aging, bucket_for, calculate_kpis, ticket_age_days};

pub use crate::config::{KpiConfig, TicketlensConfig};

pub use crate::errors::TicketlensError;

pub use crate::io::{load_tickets, CsvTableWriter, JsonSummaryWriter, LoadedTable, ReportWriter};
