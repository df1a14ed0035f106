//! Keyword intent detection
//!
//! Areas are detected by plain substring matching of each known area name
//! against the lower-cased question; intent is a set of independent keyword
//! flags.

use crate::record::Record;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Distinct area names in the dataset, sorted.
pub fn available_areas(dataset: &[Record]) -> Vec<String> {
    dataset
        .iter()
        .map(|r| r.area.as_str())
        .unique()
        .sorted()
        .map(str::to_string)
        .collect()
}

/// Areas whose lower-cased name occurs in `query_lower`, in `areas` order.
///
/// Example: "compare baner and aundh" against ["Aundh", "Baner", "Wakad"]
/// yields ["Aundh", "Baner"].
pub fn mentioned_areas(query_lower: &str, areas: &[String]) -> Vec<String> {
    areas
        .iter()
        .filter(|area| query_lower.contains(&area.to_lowercase()))
        .cloned()
        .collect()
}

/// Keyword flags; not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryIntent {
    pub comparison: bool,
    pub demand: bool,
    pub price: bool,
}

impl QueryIntent {
    pub fn classify(query_lower: &str, mentioned: usize) -> Self {
        Self {
            comparison: mentioned > 1 || query_lower.contains("compare"),
            demand: query_lower.contains("demand"),
            price: query_lower.contains("price") || query_lower.contains("growth"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::demo_dataset;

    #[test]
    fn test_available_areas_sorted_distinct() {
        assert_eq!(
            available_areas(&demo_dataset()),
            vec!["Akurdi", "Ambegaon Budruk", "Aundh", "Baner", "Hinjewadi", "Wakad"]
        );
    }

    #[test]
    fn test_mentions_follow_sorted_order_not_query_order() {
        let areas = available_areas(&demo_dataset());
        let mentioned = mentioned_areas("compare wakad with baner and aundh", &areas);
        assert_eq!(mentioned, vec!["Aundh", "Baner", "Wakad"]);
    }

    #[test]
    fn test_classify_flags() {
        let intent = QueryIntent::classify("compare price growth and demand", 1);
        assert_eq!(
            intent,
            QueryIntent {
                comparison: true,
                demand: true,
                price: true
            }
        );
        assert_eq!(QueryIntent::classify("analyze wakad", 1), QueryIntent::default());
        assert!(QueryIntent::classify("wakad baner", 2).comparison);
    }
}
