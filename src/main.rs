use anyhow::Result;
use clap::Parser;
use ticketlens::cli::{Cli, Commands};
use ticketlens::commands::analyze::AnalyzeConfig;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            config,
            sla_threshold_days,
            fcr_any_interaction,
            summary_format,
            verbosity,
        } => {
            init_logging(verbosity);
            let analyze_config = AnalyzeConfig {
                input,
                output,
                config,
                sla_threshold_days,
                fcr_any_interaction,
                summary_format,
                verbosity,
            };
            ticketlens::commands::analyze::handle_analyze(analyze_config)
        }
        Commands::Init { force } => {
            init_logging(0);
            ticketlens::commands::init::init_config(force)
        }
    }
}

// RUST_LOG wins when set; -v flags raise the default level otherwise
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
