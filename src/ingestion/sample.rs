//! Downloadable sample workbook showing the expected upload layout.

use crate::record::{Record, CANONICAL_FIELDS};
use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

pub const SAMPLE_FILE_NAME: &str = "sample_real_estate_data.xlsx";
pub const SAMPLE_SHEET_NAME: &str = "Real Estate Data";

/// The three rows written into the sample workbook.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(2023, "Sample Area 1", 7500.0, 85.0, 1200.0, 450),
        Record::new(2024, "Sample Area 1", 8200.0, 88.0, 1180.0, 520),
        Record::new(2023, "Sample Area 2", 6800.0, 78.0, 1300.0, 380),
    ]
}

/// Builds the sample `.xlsx` file: one sheet, the six canonical headers, three rows.
pub fn sample_workbook() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SAMPLE_SHEET_NAME)
        .context("Failed to name sample sheet")?;

    for (col, header) in CANONICAL_FIELDS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, record) in sample_records().iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_number(row, 0, record.year)?;
        worksheet.write_string(row, 1, &record.area)?;
        worksheet.write_number(row, 2, record.avg_price)?;
        worksheet.write_number(row, 3, record.demand)?;
        worksheet.write_number(row, 4, record.avg_size)?;
        worksheet.write_number(row, 5, record.transactions as f64)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize sample workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::parse;

    #[test]
    fn test_sample_workbook_parses_back() {
        let bytes = sample_workbook().unwrap();
        let outcome = parse(&bytes, SAMPLE_FILE_NAME).unwrap();
        assert_eq!(outcome.row_count, 3);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.records, sample_records());
    }

    #[test]
    fn test_sample_covers_two_areas() {
        let mut areas: Vec<String> = sample_records().into_iter().map(|r| r.area).collect();
        areas.dedup();
        assert_eq!(areas, vec!["Sample Area 1", "Sample Area 2"]);
    }
}
