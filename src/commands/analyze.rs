//! The analyze command: the whole pipeline, load to report, in one
//! sequential pass over a single in-memory table.

use crate::analysis::{analyze_aging, calculate_kpis};
use crate::cli::SummaryFormat;
use crate::config::TicketlensConfig;
use crate::core::AnalysisResults;
use crate::io::{self, load_tickets, CsvTableWriter, JsonSummaryWriter, ReportWriter};
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::File;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub sla_threshold_days: Option<f64>,
    pub fcr_any_interaction: bool,
    pub summary_format: SummaryFormat,
    pub verbosity: u8,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let kpi_config = resolve_kpi_config(&config)?;
    log::info!(
        "analyzing {} (SLA threshold {} days, strict FCR: {})",
        config.input.display(),
        kpi_config.sla_threshold_days,
        kpi_config.fcr_requires_resolved_status
    );

    let table = load_tickets(&config.input)?;
    log::info!(
        "loaded {} ticket(s), dropped {} row(s) with null creation dates",
        table.records.len(),
        table.dropped_rows
    );

    // One timestamp for the whole run; every open-ticket age uses it.
    let now = Utc::now();
    let enriched = analyze_aging(table.records, now);
    let (tickets, summary) = calculate_kpis(enriched, &kpi_config);

    let results = AnalysisResults {
        input_path: config.input.clone(),
        timestamp: now,
        tickets,
        dropped_rows: table.dropped_rows,
        summary,
    };

    write_report(&results, &config.output)?;
    log::info!("enriched table written to {}", config.output.display());

    print_summary(&results, config.summary_format)?;
    Ok(())
}

// Config file first, CLI flags override
fn resolve_kpi_config(config: &AnalyzeConfig) -> Result<crate::config::KpiConfig> {
    let mut kpi = TicketlensConfig::load(config.config.as_deref())?.kpi;
    if let Some(threshold) = config.sla_threshold_days {
        kpi.sla_threshold_days = threshold;
    }
    if config.fcr_any_interaction {
        kpi.fcr_requires_resolved_status = false;
    }
    kpi.validate().map_err(|msg| anyhow::anyhow!(msg))?;
    Ok(kpi)
}

fn write_report(results: &AnalysisResults, output: &PathBuf) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            io::ensure_dir(parent)?;
        }
    }
    let file = File::create(output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;
    CsvTableWriter::new(file).write_results(results)
}

fn print_summary(results: &AnalysisResults, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Terminal => {
            print!("{}", io::writer::format_terminal_summary(results));
        }
        SummaryFormat::Json => {
            JsonSummaryWriter::new(std::io::stdout().lock()).write_results(results)?;
        }
    }
    Ok(())
}
