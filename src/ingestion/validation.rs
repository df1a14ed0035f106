//! Row normalization, coercion and schema validation.
//!
//! Every row goes through the same three steps: headers are mapped to
//! canonical names, the six required fields are checked for presence, then
//! the coerced values are validated against the record constraints. A row
//! failing any step yields a [`RowError`] instead of a [`Record`]; nothing in
//! here aborts a batch.

use crate::ingestion::columns::normalize_column_name;
use crate::ingestion::workbook::RawSheet;
use crate::record::{Record, CANONICAL_FIELDS};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Sheet row number of the first data row (1-based, after the header).
pub const FIRST_DATA_ROW: usize = 2;

/// Largest integer an f64 holds exactly; caps integer counts.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

static NULL: Value = Value::Null;

lazy_static! {
    static ref INT_PREFIX: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
    static ref INFINITY_PREFIX: Regex = Regex::new(r"^\s*([+-]?)Infinity").unwrap();
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// Non-fatal, per-row ingestion failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    MissingFields { row: usize, fields: Vec<&'static str> },
    Invalid { row: usize, issues: Vec<FieldIssue> },
}

impl RowError {
    /// Row number in the original sheet.
    pub fn row(&self) -> usize {
        match self {
            RowError::MissingFields { row, .. } | RowError::Invalid { row, .. } => *row,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::MissingFields { row, fields } => {
                write!(f, "Row {}: Missing required fields - {}", row, fields.join(", "))
            }
            RowError::Invalid { row, issues } => {
                let rendered: Vec<String> = issues
                    .iter()
                    .map(|issue| format!("{}: {}", issue.field, issue.message))
                    .collect();
                write!(f, "Row {}: {}", row, rendered.join(", "))
            }
        }
    }
}

/// Maps one sheet row onto canonical field names. When two headers map to
/// the same field the later column wins.
pub fn normalize_row(sheet: &RawSheet, index: usize) -> HashMap<String, Value> {
    let mut normalized = HashMap::with_capacity(sheet.headers.len());
    for (header, value) in sheet.row_cells(index) {
        normalized.insert(normalize_column_name(header), value.clone());
    }
    normalized
}

/// Canonical fields that are absent, null or an empty string.
pub fn missing_fields(row: &HashMap<String, Value>) -> Vec<&'static str> {
    CANONICAL_FIELDS
        .iter()
        .copied()
        .filter(|field| match row.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect()
}

/// Runs normalization, the required-field check and validation for the row
/// at `index`.
pub fn validate_row(sheet: &RawSheet, index: usize) -> Result<Record, RowError> {
    let row_number = index + FIRST_DATA_ROW;
    let row = normalize_row(sheet, index);

    let missing = missing_fields(&row);
    if !missing.is_empty() {
        return Err(RowError::MissingFields {
            row: row_number,
            fields: missing,
        });
    }

    // presence was checked above
    let field = |name: &str| row.get(name).unwrap_or(&NULL);

    let year = coerce_number(field("year"), NumberKind::Integer);
    let area = coerce_text(field("area"));
    let avg_price = coerce_number(field("avgPrice"), NumberKind::Real);
    let demand = coerce_number(field("demand"), NumberKind::Real);
    let avg_size = coerce_number(field("avgSize"), NumberKind::Real);
    let transactions = coerce_number(field("transactions"), NumberKind::Integer);

    let mut issues = Vec::new();
    check_number(&mut issues, "year", &year, &[Rule::Int, Rule::Min(2000.0), Rule::Max(2100.0)]);
    check_text(&mut issues, "area", &area);
    check_number(&mut issues, "avgPrice", &avg_price, &[Rule::Positive]);
    check_number(&mut issues, "demand", &demand, &[Rule::Min(0.0), Rule::Max(100.0)]);
    check_number(&mut issues, "avgSize", &avg_size, &[Rule::Positive]);
    check_number(
        &mut issues,
        "transactions",
        &transactions,
        &[Rule::Int, Rule::Min(0.0), Rule::Max(MAX_SAFE_INTEGER)],
    );

    if !issues.is_empty() {
        return Err(RowError::Invalid {
            row: row_number,
            issues,
        });
    }

    Ok(Record {
        year: year.value() as i32,
        area,
        avg_price: avg_price.value(),
        demand: demand.value(),
        avg_size: avg_size.value(),
        transactions: transactions.value() as u64,
    })
}

#[derive(Debug, Clone, Copy)]
enum NumberKind {
    Integer,
    Real,
}

/// A numeric field after coercion. Non-numeric cells keep their type name
/// for the error message.
#[derive(Debug, Clone, PartialEq)]
enum Coerced {
    Number(f64),
    NotNumber(&'static str),
}

impl Coerced {
    fn value(&self) -> f64 {
        match self {
            Coerced::Number(n) => *n,
            Coerced::NotNumber(_) => f64::NAN,
        }
    }
}

fn coerce_number(value: &Value, kind: NumberKind) -> Coerced {
    match value {
        Value::Number(n) => Coerced::Number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => Coerced::Number(match kind {
            NumberKind::Integer => parse_int_prefix(s),
            NumberKind::Real => parse_float_prefix(s),
        }),
        Value::Bool(_) => Coerced::NotNumber("boolean"),
        Value::Null => Coerced::NotNumber("null"),
        Value::Array(_) => Coerced::NotNumber("array"),
        Value::Object(_) => Coerced::NotNumber("object"),
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Leading-integer parse: `"2023.9"` -> 2023, `"12 units"` -> 12, else NaN.
pub fn parse_int_prefix(s: &str) -> f64 {
    INT_PREFIX
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Leading-float parse: `"92.5%"` -> 92.5, `"1e3"` -> 1000, else NaN.
pub fn parse_float_prefix(s: &str) -> f64 {
    if let Some(c) = INFINITY_PREFIX.captures(s) {
        return if c.get(1).map(|m| m.as_str()) == Some("-") {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    FLOAT_PREFIX
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Int,
    Min(f64),
    Max(f64),
    Positive,
}

fn check_number(issues: &mut Vec<FieldIssue>, field: &'static str, value: &Coerced, rules: &[Rule]) {
    let mut push = |message: String| issues.push(FieldIssue { field, message });

    let n = match value {
        Coerced::NotNumber(type_name) => {
            push(format!("Expected number, received {}", type_name));
            return;
        }
        Coerced::Number(n) if n.is_nan() => {
            push("Expected number, received nan".to_string());
            return;
        }
        Coerced::Number(n) => *n,
    };

    if !n.is_finite() {
        push("Number must be finite".to_string());
        return;
    }

    for rule in rules {
        match *rule {
            Rule::Int if n.fract() != 0.0 => {
                push("Expected integer, received float".to_string());
            }
            Rule::Min(min) if n < min => {
                push(format!("Number must be greater than or equal to {}", min));
            }
            Rule::Max(max) if n > max => {
                push(format!("Number must be less than or equal to {}", max));
            }
            Rule::Positive if n <= 0.0 => {
                push("Number must be greater than 0".to_string());
            }
            _ => {}
        }
    }
}

fn check_text(issues: &mut Vec<FieldIssue>, field: &'static str, value: &str) {
    let len = value.chars().count();
    if len < 1 {
        issues.push(FieldIssue {
            field,
            message: "String must contain at least 1 character(s)".to_string(),
        });
    }
    if len > 100 {
        issues.push(FieldIssue {
            field,
            message: "String must contain at most 100 character(s)".to_string(),
        });
    }
}
