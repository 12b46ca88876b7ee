use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Colored human-readable summary block
    Terminal,
    /// Machine-readable summary document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ticketlens")]
#[command(about = "Support ticket aging and KPI analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a ticket export and write the enriched table
    Analyze {
        /// Ticket export to analyze (.csv, .xlsx or .xls)
        input: PathBuf,

        /// Where to write the enriched table
        #[arg(short, long, default_value = "processed_tickets.csv")]
        output: PathBuf,

        /// Configuration file (defaults to .ticketlens.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the SLA threshold in days
        #[arg(long = "sla-threshold-days")]
        sla_threshold_days: Option<f64>,

        /// Count any single-interaction ticket as FCR, resolved or not
        #[arg(long = "fcr-any-interaction")]
        fcr_any_interaction: bool,

        /// Summary output format
        #[arg(short = 'f', long = "summary-format", value_enum, default_value = "terminal")]
        summary_format: SummaryFormat,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Create a default .ticketlens.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
