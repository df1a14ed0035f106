//! Header synonym table
//!
//! Spreadsheet headers are lower-cased, trimmed and stripped of whitespace and
//! underscores before lookup, so `Avg Price`, `avg_price` and `AVGPRICE` all
//! resolve to `avgPrice`. Unknown headers pass through untouched.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[_\s]+").unwrap();

    /// Collapsed header -> canonical field name.
    static ref COLUMN_SYNONYMS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // year
        m.insert("year", "year");
        m.insert("yr", "year");
        // area
        m.insert("area", "area");
        m.insert("location", "area");
        m.insert("locality", "area");
        m.insert("region", "area");
        // price
        m.insert("avgprice", "avgPrice");
        m.insert("averageprice", "avgPrice");
        m.insert("price", "avgPrice");
        m.insert("pricepersqft", "avgPrice");
        // demand
        m.insert("demand", "demand");
        m.insert("demandindex", "demand");
        // size
        m.insert("avgsize", "avgSize");
        m.insert("averagesize", "avgSize");
        m.insert("size", "avgSize");
        // transactions
        m.insert("transactions", "transactions");
        m.insert("transactioncount", "transactions");
        m.insert("count", "transactions");
        m
    };
}

/// Collapses a raw header into its lookup key.
pub fn collapse_header(header: &str) -> String {
    SEPARATORS
        .replace_all(header.trim().to_lowercase().as_str(), "")
        .into_owned()
}

/// Maps a raw header to its canonical field name, or returns it unchanged.
pub fn normalize_column_name(header: &str) -> String {
    match COLUMN_SYNONYMS.get(collapse_header(header).as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => header.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_header() {
        assert_eq!(collapse_header("  Avg_Price  "), "avgprice");
        assert_eq!(collapse_header("Price per\tSqft"), "pricepersqft");
        assert_eq!(collapse_header("demand__ index"), "demandindex");
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        let cases = [
            ("Year", "year"),
            ("YR", "year"),
            ("Location", "area"),
            ("locality", "area"),
            ("Region", "area"),
            ("Avg Price", "avgPrice"),
            ("average_price", "avgPrice"),
            ("Price Per Sqft", "avgPrice"),
            ("price", "avgPrice"),
            ("Demand Index", "demand"),
            ("avg size", "avgSize"),
            ("Average Size", "avgSize"),
            ("SIZE", "avgSize"),
            ("Transaction Count", "transactions"),
            ("count", "transactions"),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_column_name(raw), expected, "header {:?}", raw);
        }
    }

    #[test]
    fn test_unknown_header_passes_through() {
        assert_eq!(normalize_column_name("Builder Name"), "Builder Name");
        // already-canonical camelCase names collapse to a known key
        assert_eq!(normalize_column_name("avgPrice"), "avgPrice");
    }
}
