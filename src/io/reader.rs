//! Tabular input: CSV and Excel sources normalized into ticket records.
//!
//! Both formats funnel through the same header/row representation so the
//! column checks and cell parsing live in one place. Date parsing is
//! fail-fast; a cell that is neither empty nor a recognizable date aborts
//! the load.

use crate::core::TicketRecord;
use crate::errors::TicketlensError;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Ticket_ID",
    "Created_Date",
    "Resolved_Date",
    "Status",
    "Interaction_Count",
];

/// Cell values treated as absent, matching common spreadsheet exports.
const NULL_MARKERS: [&str; 5] = ["", "na", "n/a", "null", "nat"];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Excel,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, TicketlensError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xls" | "xlsm" => Ok(InputFormat::Excel),
            other => Err(TicketlensError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The loader's output: retained records plus the count of rows dropped
/// for having a null creation date.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub records: Vec<TicketRecord>,
    pub dropped_rows: usize,
}

/// Read a tabular source into ticket records.
///
/// The input must exist and carry all required columns. Rows whose
/// `Created_Date` is null are silently excluded (counted, logged at
/// debug). A missing `Resolved_Date` is preserved as `None`.
pub fn load_tickets(path: &Path) -> Result<LoadedTable> {
    if !path.is_file() {
        return Err(TicketlensError::InputNotFound(path.to_path_buf()).into());
    }
    let format = InputFormat::from_path(path)?;

    let (headers, rows) = match format {
        InputFormat::Csv => read_csv(path)?,
        InputFormat::Excel => read_excel(path)?,
    };

    parse_rows(&headers, rows)
}

fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("failed to read {}", path.display()))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }
    Ok((headers, rows))
}

fn read_excel(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("workbook {} has no sheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet '{}' of {}", sheet_name, path.display()))?;

    let mut iter = range.rows();
    let headers = match iter.next() {
        Some(row) => row.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
        None => Vec::new(),
    };
    let rows = iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok((headers, rows))
}

// Normalize typed spreadsheet cells to the same strings a CSV would carry
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::new(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

fn parse_rows(headers: &[String], rows: Vec<Vec<String>>) -> Result<LoadedTable> {
    let columns = ColumnIndex::resolve(headers)?;

    let mut table = LoadedTable::default();
    for (i, row) in rows.iter().enumerate() {
        // Data rows are 1-indexed in diagnostics, matching how users see
        // them under the header in a spreadsheet.
        let row_number = i + 1;
        let created = parse_date_cell(columns.cell(row, columns.created), "Created_Date", row_number)?;
        let resolved =
            parse_date_cell(columns.cell(row, columns.resolved), "Resolved_Date", row_number)?;

        let Some(created_date) = created else {
            table.dropped_rows += 1;
            continue;
        };

        table.records.push(TicketRecord {
            ticket_id: columns.cell(row, columns.ticket_id).to_string(),
            created_date,
            resolved_date: resolved,
            status: columns.cell(row, columns.status).trim().to_string(),
            interaction_count: parse_count_cell(columns.cell(row, columns.interactions), row_number)?,
        });
    }

    if table.dropped_rows > 0 {
        log::debug!(
            "dropped {} row(s) with a null Created_Date",
            table.dropped_rows
        );
    }
    Ok(table)
}

struct ColumnIndex {
    ticket_id: usize,
    created: usize,
    resolved: usize,
    status: usize,
    interactions: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, TicketlensError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TicketlensError::MissingColumns(missing));
        }
        Ok(Self {
            ticket_id: find("Ticket_ID").unwrap(),
            created: find("Created_Date").unwrap(),
            resolved: find("Resolved_Date").unwrap(),
            status: find("Status").unwrap(),
            interactions: find("Interaction_Count").unwrap(),
        })
    }

    // Short rows yield empty cells rather than an index panic
    fn cell<'a>(&self, row: &'a [String], index: usize) -> &'a str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

fn is_null_cell(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    NULL_MARKERS.contains(&normalized.as_str())
}

fn parse_date_cell(
    value: &str,
    column: &str,
    row: usize,
) -> Result<Option<DateTime<Utc>>, TicketlensError> {
    let trimmed = value.trim();
    if is_null_cell(trimmed) {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Some(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc()));
    }

    Err(TicketlensError::InvalidDate {
        column: column.to_string(),
        row,
        value: trimmed.to_string(),
    })
}

fn parse_count_cell(value: &str, row: usize) -> Result<u32, TicketlensError> {
    let trimmed = value.trim();
    if is_null_cell(trimmed) {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| TicketlensError::InvalidCount {
        row,
        value: trimmed.to_string(),
    })
}
