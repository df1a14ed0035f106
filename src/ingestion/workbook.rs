//! Workbook decoding - turns uploaded bytes into a header row plus raw cells.
//!
//! CSV files go through the `csv` reader; `.xlsx` / `.xls` go through
//! calamine. Either way the first sheet is flattened into [`RawSheet`], with
//! empty cells as `Value::Null` and numeric-looking CSV cells decoded as
//! numbers, the same shape a spreadsheet library hands back.

use crate::error::{IngestError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::io::Cursor;

/// Accepted upload formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SpreadsheetFormat {
    /// Case-insensitive extension match on the file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".xlsx") {
            Some(Self::Xlsx)
        } else if lower.ends_with(".xls") {
            Some(Self::Xls)
        } else if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// First sheet of a workbook: headers in column order, one cell vector per
/// data row (always the same length as `headers`).
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RawSheet {
    /// Row as (header, cell) pairs in column order.
    pub fn row_cells(&self, index: usize) -> impl Iterator<Item = (&str, &Value)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.rows[index].iter())
    }
}

/// Decodes the first sheet of `bytes`.
pub fn decode(bytes: &[u8], format: SpreadsheetFormat) -> Result<RawSheet> {
    match format {
        SpreadsheetFormat::Csv => decode_csv(bytes),
        SpreadsheetFormat::Xlsx | SpreadsheetFormat::Xls => decode_workbook(bytes),
    }
}

fn decode_csv(bytes: &[u8]) -> Result<RawSheet> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = header_names(rdr.headers()?.iter().map(|h| h.trim().to_string()));

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cells: Vec<Value> = (0..headers.len())
            .map(|idx| coerce_cell(record.get(idx).unwrap_or("")))
            .collect();
        if cells.iter().all(Value::is_null) {
            continue;
        }
        rows.push(cells);
    }

    Ok(RawSheet {
        name: "Sheet1".to_string(),
        headers,
        rows,
    })
}

fn decode_workbook(bytes: &[u8]) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let name = match workbook.sheet_names().first() {
        Some(name) => name.clone(),
        None => return Err(IngestError::EmptyWorkbook),
    };
    let range = workbook.worksheet_range(&name)?;

    let mut row_iter = range.rows();
    let headers = match row_iter.next() {
        Some(header_row) => header_names(header_row.iter().map(header_text)),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for row in row_iter {
        let cells: Vec<Value> = (0..headers.len())
            .map(|idx| row.get(idx).map(cell_value).unwrap_or(Value::Null))
            .collect();
        if cells.iter().all(Value::is_null) {
            continue;
        }
        rows.push(cells);
    }

    Ok(RawSheet { name, headers, rows })
}

/// Blank headers get positional placeholders so every column keeps a key.
fn header_names(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut blanks = 0usize;
    raw.map(|h| {
        if !h.is_empty() {
            return h;
        }
        let name = if blanks == 0 {
            "__EMPTY".to_string()
        } else {
            format!("__EMPTY_{}", blanks)
        };
        blanks += 1;
        name
    })
    .collect()
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => number(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::DateTime(dt) => number(dt.as_f64()),
        other => Value::String(other.to_string()),
    }
}

fn number(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// CSV cells carry no type information; decode them the way a spreadsheet
/// reader would.
fn coerce_cell(s: &str) -> Value {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Number(i.into());
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }

    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(SpreadsheetFormat::from_file_name("data.XLSX"), Some(SpreadsheetFormat::Xlsx));
        assert_eq!(SpreadsheetFormat::from_file_name("old.xls"), Some(SpreadsheetFormat::Xls));
        assert_eq!(SpreadsheetFormat::from_file_name("rows.Csv"), Some(SpreadsheetFormat::Csv));
        assert_eq!(SpreadsheetFormat::from_file_name("notes.txt"), None);
        assert_eq!(SpreadsheetFormat::from_file_name("csv"), None);
    }

    #[test]
    fn test_coerce_cell() {
        assert_eq!(coerce_cell("  "), Value::Null);
        assert_eq!(coerce_cell("2023"), json!(2023));
        assert_eq!(coerce_cell("92.5"), json!(92.5));
        assert_eq!(coerce_cell("TRUE"), json!(true));
        assert_eq!(coerce_cell("Wakad"), json!("Wakad"));
        assert_eq!(coerce_cell("NaN"), json!("NaN"));
    }

    #[test]
    fn test_decode_csv_pads_short_rows_and_skips_blank_lines() {
        let csv = "Year,Area,Price\n2023,Wakad\n,,\n2024,Baner,9500\n";
        let sheet = decode(csv.as_bytes(), SpreadsheetFormat::Csv).unwrap();
        assert_eq!(sheet.headers, vec!["Year", "Area", "Price"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec![json!(2023), json!("Wakad"), Value::Null]);
        assert_eq!(sheet.rows[1][2], json!(9500));
    }

    #[test]
    fn test_decode_csv_strips_bom() {
        let csv = "\u{feff}year,area\n2023,Aundh\n";
        let sheet = decode(csv.as_bytes(), SpreadsheetFormat::Csv).unwrap();
        assert_eq!(sheet.headers[0], "year");
    }

    #[test]
    fn test_blank_headers_get_placeholders() {
        let csv = "year,,area,\n2023,x,Aundh,y\n";
        let sheet = decode(csv.as_bytes(), SpreadsheetFormat::Csv).unwrap();
        assert_eq!(sheet.headers, vec!["year", "__EMPTY", "area", "__EMPTY_1"]);
    }

    #[test]
    fn test_garbage_workbook_is_decode_error() {
        let err = decode(b"definitely not a zip", SpreadsheetFormat::Xlsx).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }
}
