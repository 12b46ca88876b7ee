use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use std::fs;
use ticketlens::analysis::{analyze_aging, calculate_kpis};
use ticketlens::cli::SummaryFormat;
use ticketlens::commands::analyze::{handle_analyze, AnalyzeConfig};
use ticketlens::core::{AgingBucket, SlaStatus};
use ticketlens::io::load_tickets;
use ticketlens::KpiConfig;

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn analyze_config(
    input: std::path::PathBuf,
    output: std::path::PathBuf,
) -> AnalyzeConfig {
    AnalyzeConfig {
        input,
        output,
        config: None,
        sla_threshold_days: None,
        fcr_any_interaction: false,
        summary_format: SummaryFormat::Terminal,
        verbosity: 0,
    }
}

#[test]
fn end_to_end_resolved_ticket_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n\
         T-1,2024-01-01,2024-01-02,Resolved,1\n",
    );
    let output = dir.path().join("out.csv");

    handle_analyze(analyze_config(input, output.clone())).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count,\
         Resolution_Time_Days,Ticket_Age_Days,Aging_Bucket,SLA_Status,Is_FCR"
    );
    assert_eq!(
        lines.next().unwrap(),
        "T-1,2024-01-01 00:00:00,2024-01-02 00:00:00,Resolved,1,1,1,0-1 Day,Met,true"
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn open_ticket_ten_days_old_lands_in_seven_to_fourteen() {
    let dir = tempfile::tempdir().unwrap();
    let created = (Utc::now() - Duration::days(10)).format("%Y-%m-%d %H:%M:%S");
    let input = write_input(
        &dir,
        "tickets.csv",
        &format!(
            "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n\
             T-2,{created},,Open,3\n"
        ),
    );

    let table = load_tickets(&input).unwrap();
    let enriched = analyze_aging(table.records, Utc::now());
    let (tickets, summary) = calculate_kpis(enriched, &KpiConfig::default());

    assert_eq!(tickets[0].resolution_time_days, None);
    assert_eq!(tickets[0].ticket_age_days, 10.0);
    assert_eq!(tickets[0].aging_bucket, AgingBucket::SevenToFourteen);
    assert_eq!(tickets[0].sla_status, SlaStatus::Breached);
    assert_eq!(summary.sla_rate, Some(0.0));
    assert_eq!(summary.avg_resolution_time_days, None);
}

#[test]
fn header_only_input_writes_header_only_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n",
    );
    let output = dir.path().join("out.csv");

    handle_analyze(analyze_config(input, output.clone())).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn missing_input_aborts_before_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = handle_analyze(analyze_config(
        dir.path().join("nope.csv"),
        output.clone(),
    ))
    .unwrap_err();

    assert!(err.to_string().contains("input not found"));
    assert!(!output.exists());
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Status\nT-1,2024-01-01,Open\n",
    );
    let output = dir.path().join("out.csv");

    let err = handle_analyze(analyze_config(input, output.clone())).unwrap_err();

    assert!(err.to_string().contains("missing required column"));
    assert!(err.to_string().contains("Interaction_Count"));
    assert!(!output.exists());
}

#[test]
fn malformed_date_is_fatal_with_no_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n\
         T-1,2024-01-01,2024-01-02,Resolved,1\n\
         T-2,01/13/2024,,Open,2\n",
    );
    let output = dir.path().join("out.csv");

    let err = handle_analyze(analyze_config(input, output.clone())).unwrap_err();

    assert!(err.to_string().contains("invalid date"));
    assert!(err.to_string().contains("Created_Date"));
    assert!(!output.exists());
}

#[test]
fn null_created_date_rows_never_reach_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n\
         T-1,2024-01-01,2024-01-03,Resolved,2\n\
         T-2,,2024-01-03,Resolved,1\n",
    );
    let output = dir.path().join("out.csv");

    handle_analyze(analyze_config(input, output.clone())).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(!text.contains("T-2"));
}

#[test]
fn output_round_trips_through_the_loader() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n\
         T-1,2024-01-01 08:00:00,2024-01-04 20:00:00,Resolved,1\n\
         T-2,2024-02-01,,Open,4\n",
    );
    let output = dir.path().join("out.csv");

    handle_analyze(analyze_config(input.clone(), output.clone())).unwrap();

    // The enriched output still carries the required columns, so it loads
    // like any other export; re-deriving must reproduce the same values.
    let first = load_tickets(&input).unwrap();
    let reloaded = load_tickets(&output).unwrap();
    assert_eq!(first.records, reloaded.records);

    let now = Utc::now();
    let (first_pass, _) = calculate_kpis(analyze_aging(first.records, now), &KpiConfig::default());
    let (second_pass, _) =
        calculate_kpis(analyze_aging(reloaded.records, now), &KpiConfig::default());
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass[0].resolution_time_days, Some(3.5));
    assert_eq!(first_pass[0].aging_bucket, AgingBucket::ThreeToSeven);
}

#[test]
fn two_day_threshold_override_changes_sla_status() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "tickets.csv",
        "Ticket_ID,Created_Date,Resolved_Date,Status,Interaction_Count\n\
         T-1,2024-01-01,2024-01-03 12:00:00,Resolved,1\n",
    );
    let output = dir.path().join("out.csv");

    let mut config = analyze_config(input, output.clone());
    config.sla_threshold_days = Some(2.0);
    handle_analyze(config).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.lines().nth(1).unwrap().contains("Breached"));
}
