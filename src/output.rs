//! Output formatting and persistence for query results.
//!
//! Supports pretty-printing, JSON report writing, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{DistrictGrowth, Grade, Subject};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// A finished growth query answer, stamped for report output.
#[derive(Debug, Serialize, Deserialize)]
pub struct GrowthReport {
    pub generated_at: DateTime<Utc>,
    pub grade: Grade,
    pub subject: Option<Subject>,
    pub results: Vec<DistrictGrowth>,
}

impl GrowthReport {
    pub fn new(grade: Grade, subject: Option<Subject>, results: Vec<DistrictGrowth>) -> Self {
        GrowthReport {
            generated_at: Utc::now(),
            grade,
            subject,
            results,
        }
    }
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &GrowthReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &GrowthReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a report as pretty-printed JSON to `path`.
pub fn write_report(path: &str, report: &GrowthReport) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(report)?)?;
    info!(path, results = report.results.len(), "Report written");
    Ok(())
}

/// Appends ranked results as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_results(path: &str, results: &[DistrictGrowth]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV results");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;

    Ok(())
}
