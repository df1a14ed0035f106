//! Heuristic property price estimate and the keyword help responder.
//!
//! Inputs are coerced leniently: anything that does not read as a number
//! falls back to 0 sqft, 0 bedrooms and a location factor of 1.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Base price per square foot, in rupees.
pub const BASE_PRICE_PER_SQFT: f64 = 5200.0;

/// Flat addition per bedroom, in rupees.
pub const BEDROOM_BOOST: f64 = 150_000.0;

/// Share of the location factor's distance from 1 applied as a multiplier.
pub const LOCATION_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyInput {
    pub area_sqft: f64,
    pub bedrooms: i64,
    pub location_factor: f64,
}

impl Default for PropertyInput {
    fn default() -> Self {
        Self {
            area_sqft: 0.0,
            bedrooms: 0,
            location_factor: 1.0,
        }
    }
}

impl PropertyInput {
    /// Builds an input from loosely typed values (JSON body fields or CLI text).
    pub fn from_values(area: &Value, bedrooms: &Value, location_factor: &Value) -> Self {
        let defaults = Self::default();
        Self {
            area_sqft: coerce_float(area).unwrap_or(defaults.area_sqft),
            bedrooms: coerce_int(bedrooms).unwrap_or(defaults.bedrooms),
            location_factor: coerce_float(location_factor).unwrap_or(defaults.location_factor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub estimated_price: f64,
    pub message: String,
}

/// `(area * 5200 + bedrooms * 150000) * (1 + (factor - 1) * 0.2)`, rounded
/// to two decimals.
pub fn estimate_price(input: &PropertyInput) -> f64 {
    let base = input.area_sqft * BASE_PRICE_PER_SQFT;
    let bedroom_boost = input.bedrooms as f64 * BEDROOM_BOOST;
    let multiplier = 1.0 + (input.location_factor - 1.0) * LOCATION_WEIGHT;
    round_cents((base + bedroom_boost) * multiplier)
}

pub fn estimate(input: &PropertyInput) -> Estimate {
    let price = estimate_price(input);
    debug!(
        "Estimated {} (area={}, bedrooms={}, location_factor={})",
        price, input.area_sqft, input.bedrooms, input.location_factor
    );
    Estimate {
        estimated_price: price,
        message: format!("Estimated property value: ₹{}", group_thousands(price)),
    }
}

/// Canned reply for free-text questions about estimates.
pub fn assistant_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("price") || lower.contains("estimate") {
        "To estimate price share area (sqft), number of bedrooms and a location factor (1-5)."
    } else if lower.contains("hello") || lower.contains("hi") {
        "Hello! I'm Pixel Perfect — tell me about the property (area, bedrooms, location)."
    } else {
        "I can help with property price estimates and simple analysis. Ask about price or area."
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Integers truncate toward zero; fractional text is rejected.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Nearest cent; ties resolved on the exact binary value, half to even.
fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// `1234567.5` -> `1,234,567.5`; whole amounts keep a `.0`.
fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = value.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
        None => (text, "0".to_string()),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
