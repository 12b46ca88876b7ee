pub mod reader;
pub mod writer;

pub use reader::{load_tickets, InputFormat, LoadedTable};
pub use writer::{CsvTableWriter, JsonSummaryWriter, ReportWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
