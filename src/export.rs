//! CSV export of the records currently on display.
//!
//! Fields are written verbatim with no quoting, so an area name containing a
//! comma shifts the columns of its row.

use crate::record::Record;
use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "real_estate_data.csv";

pub const EXPORT_HEADERS: [&str; 6] = [
    "Year",
    "Area",
    "Avg Price (₹/sqft)",
    "Demand Index",
    "Avg Size (sqft)",
    "Transactions",
];

/// Renders `records` as CSV: header line, one line per record, `\n`
/// separated, no trailing newline.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for r in records {
        writer.write_record([
            r.year.to_string(),
            r.area.clone(),
            r.avg_price.to_string(),
            r.demand.to_string(),
            r.avg_size.to_string(),
            r.transactions.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {}", e))?;
    let mut text = String::from_utf8(bytes).context("CSV export is not valid UTF-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Writes the export to `path`.
pub fn write_csv(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let text = to_csv(records)?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_layout() {
        let records = vec![
            Record::new(2022, "Wakad", 6500.0, 85.0, 1200.0, 450),
            Record::new(2023, "Wakad", 7200.5, 90.0, 1180.0, 520),
        ];
        assert_eq!(
            to_csv(&records).unwrap(),
            "Year,Area,Avg Price (₹/sqft),Demand Index,Avg Size (sqft),Transactions\n\
             2022,Wakad,6500,85,1200,450\n\
             2023,Wakad,7200.5,90,1180,520"
        );
    }

    #[test]
    fn test_embedded_comma_is_not_quoted() {
        let records = vec![Record::new(2024, "Baner, West", 9000.0, 90.0, 1000.0, 1)];
        let text = to_csv(&records).unwrap();
        assert!(text.ends_with("2024,Baner, West,9000,90,1000,1"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(
            to_csv(&[]).unwrap(),
            "Year,Area,Avg Price (₹/sqft),Demand Index,Avg Size (sqft),Transactions"
        );
    }
}
