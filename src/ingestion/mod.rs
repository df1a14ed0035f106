//! Ingestion Module - spreadsheet upload to canonical records
//!
//! Handles uploaded spreadsheets with:
//! - Format and size gating before any decoding
//! - Header synonym normalization
//! - Per-row coercion and validation (collected, never thrown)
//! - Best-effort acceptance: any valid row makes the upload succeed

pub mod columns;
pub mod sample;
pub mod validation;
pub mod workbook;

pub use columns::normalize_column_name;
pub use sample::{sample_records, sample_workbook, SAMPLE_FILE_NAME, SAMPLE_SHEET_NAME};
pub use validation::{FieldIssue, RowError};
pub use workbook::{RawSheet, SpreadsheetFormat};

use crate::config::Config;
use crate::error::{IngestError, Result};
use crate::record::Record;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Successful ingestion result
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    /// Accepted records in sheet order
    pub records: Vec<Record>,

    /// Number of accepted records
    pub row_count: usize,

    /// Rows that were dropped, with the reason
    pub skipped: Vec<RowError>,
}

/// Parses an uploaded file with the default limits.
pub fn parse(file_bytes: &[u8], file_name: &str) -> Result<ParseOutcome> {
    parse_with(&Config::default(), file_bytes, file_name)
}

/// Parses an uploaded file.
///
/// Fails only on fatal conditions: wrong extension, oversize file, no sheet,
/// no data rows, undecodable bytes, or no row surviving validation.
pub fn parse_with(config: &Config, file_bytes: &[u8], file_name: &str) -> Result<ParseOutcome> {
    let format = check_upload(config, file_name, file_bytes.len() as u64)?;

    let sheet = workbook::decode(file_bytes, format)?;
    if sheet.rows.is_empty() {
        return Err(IngestError::EmptySheet);
    }
    debug!(
        "Decoded sheet '{}' from {}: {} columns, {} rows",
        sheet.name,
        file_name,
        sheet.headers.len(),
        sheet.rows.len()
    );

    let mut records = Vec::with_capacity(sheet.rows.len());
    let mut errors = Vec::new();
    for index in 0..sheet.rows.len() {
        match validation::validate_row(&sheet, index) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    if records.is_empty() {
        return Err(IngestError::NoValidData {
            details: summarize_errors(&errors, config.max_reported_errors),
        });
    }

    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        warn!("Skipped {} invalid rows: {:?}", errors.len(), messages);
    }

    info!("Loaded {} records from {}", records.len(), file_name);

    Ok(ParseOutcome {
        row_count: records.len(),
        records,
        skipped: errors,
    })
}

/// Reads a spreadsheet from disk and parses it. The size cap is checked
/// against file metadata before the bytes are read.
pub async fn load_file(config: &Config, path: impl AsRef<Path>) -> Result<ParseOutcome> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let metadata = tokio::fs::metadata(path).await?;
    check_upload(config, &file_name, metadata.len())?;

    let bytes = tokio::fs::read(path).await?;
    parse_with(config, &bytes, &file_name)
}

fn check_upload(config: &Config, file_name: &str, size: u64) -> Result<SpreadsheetFormat> {
    let format = SpreadsheetFormat::from_file_name(file_name).ok_or_else(|| {
        IngestError::UnsupportedFormat {
            file_name: file_name.to_string(),
        }
    })?;

    if size > config.max_upload_bytes {
        return Err(IngestError::FileTooLarge {
            size,
            limit: config.max_upload_bytes,
        });
    }

    Ok(format)
}

/// First `limit` row errors, one per line, plus a count of the rest.
fn summarize_errors(errors: &[RowError], limit: usize) -> String {
    let mut lines: Vec<String> = errors.iter().take(limit).map(ToString::to_string).collect();
    if errors.len() > limit {
        lines.push(format!("...and {} more errors", errors.len() - limit));
    }
    lines.join("\n")
}
