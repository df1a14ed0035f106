//! Canonical record type shared by ingestion and query processing.

use serde::{Deserialize, Serialize};

/// One observation of a locality in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub year: i32,
    pub area: String,
    /// Average price per square foot.
    pub avg_price: f64,
    /// Demand index, 0-100.
    pub demand: f64,
    /// Average property size in square feet.
    pub avg_size: f64,
    pub transactions: u64,
}

impl Record {
    pub fn new(
        year: i32,
        area: impl Into<String>,
        avg_price: f64,
        demand: f64,
        avg_size: f64,
        transactions: u64,
    ) -> Self {
        Self {
            year,
            area: area.into(),
            avg_price,
            demand,
            avg_size,
            transactions,
        }
    }
}

/// The six canonical field names, in column order.
pub const CANONICAL_FIELDS: [&str; 6] = [
    "year",
    "area",
    "avgPrice",
    "demand",
    "avgSize",
    "transactions",
];

/// Built-in demo dataset: six Pune localities, 2022-2025.
pub fn demo_dataset() -> Vec<Record> {
    vec![
        // Wakad
        Record::new(2022, "Wakad", 6500.0, 85.0, 1200.0, 450),
        Record::new(2023, "Wakad", 7200.0, 90.0, 1180.0, 520),
        Record::new(2024, "Wakad", 7800.0, 88.0, 1150.0, 580),
        Record::new(2025, "Wakad", 8400.0, 92.0, 1130.0, 620),
        // Aundh
        Record::new(2022, "Aundh", 8200.0, 92.0, 1100.0, 380),
        Record::new(2023, "Aundh", 8900.0, 95.0, 1080.0, 420),
        Record::new(2024, "Aundh", 9600.0, 94.0, 1050.0, 460),
        Record::new(2025, "Aundh", 10200.0, 96.0, 1030.0, 490),
        // Ambegaon Budruk
        Record::new(2022, "Ambegaon Budruk", 5800.0, 75.0, 1300.0, 320),
        Record::new(2023, "Ambegaon Budruk", 6200.0, 78.0, 1280.0, 350),
        Record::new(2024, "Ambegaon Budruk", 6700.0, 80.0, 1250.0, 380),
        Record::new(2025, "Ambegaon Budruk", 7100.0, 82.0, 1230.0, 410),
        // Akurdi
        Record::new(2022, "Akurdi", 5200.0, 72.0, 1350.0, 280),
        Record::new(2023, "Akurdi", 5600.0, 75.0, 1320.0, 310),
        Record::new(2024, "Akurdi", 6100.0, 77.0, 1300.0, 340),
        Record::new(2025, "Akurdi", 6500.0, 79.0, 1280.0, 370),
        // Hinjewadi
        Record::new(2022, "Hinjewadi", 7000.0, 88.0, 1150.0, 520),
        Record::new(2023, "Hinjewadi", 7600.0, 91.0, 1120.0, 580),
        Record::new(2024, "Hinjewadi", 8300.0, 93.0, 1100.0, 640),
        Record::new(2025, "Hinjewadi", 9000.0, 95.0, 1080.0, 700),
        // Baner
        Record::new(2022, "Baner", 8800.0, 94.0, 1050.0, 420),
        Record::new(2023, "Baner", 9500.0, 96.0, 1030.0, 460),
        Record::new(2024, "Baner", 10300.0, 97.0, 1000.0, 500),
        Record::new(2025, "Baner", 11000.0, 98.0, 980.0, 540),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dataset_shape() {
        let data = demo_dataset();
        assert_eq!(data.len(), 24);
        assert_eq!(data.iter().filter(|r| r.area == "Wakad").count(), 4);
    }

    #[test]
    fn test_record_serializes_with_canonical_names() {
        let record = Record::new(2023, "Baner", 9500.0, 96.0, 1030.0, 460);
        let json = serde_json::to_value(&record).unwrap();
        for field in CANONICAL_FIELDS {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
    }
}
