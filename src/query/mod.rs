//! Query Processor - free-text questions over the active dataset
//!
//! `process` never fails: unknown areas, empty filters and degenerate
//! arithmetic all come back as ordinary results with explanatory text.

pub mod intent;
pub mod narrative;

pub use intent::{available_areas, mentioned_areas, QueryIntent};
pub use narrative::{format_pct, Growth};

use crate::record::Record;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Single,
    Comparison,
    Trend,
}

/// Answer to one query. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub summary: String,
    pub chart_data: Vec<Record>,
    pub table_data: Vec<Record>,
    pub areas: Vec<String>,
    pub kind: QueryKind,
    /// Set for trend answers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<Growth>,
}

impl QueryResult {
    fn message(summary: String, areas: Vec<String>) -> Self {
        Self {
            summary,
            chart_data: Vec::new(),
            table_data: Vec::new(),
            areas,
            kind: QueryKind::Single,
            growth: None,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.chart_data.is_empty()
    }
}

/// Answers `query_text` against `dataset`.
pub fn process(query_text: &str, dataset: &[Record]) -> QueryResult {
    let query_lower = query_text.to_lowercase();
    let areas = available_areas(dataset);
    let mentioned = mentioned_areas(&query_lower, &areas);

    if mentioned.is_empty() {
        return QueryResult::message(narrative::no_area_recognized(&areas), Vec::new());
    }

    let filtered: Vec<Record> = dataset
        .iter()
        .filter(|r| mentioned.contains(&r.area))
        .cloned()
        .collect();

    let intent = QueryIntent::classify(&query_lower, mentioned.len());
    debug!("Query intent {:?} for areas {:?}", intent, mentioned);

    if intent.comparison && mentioned.len() > 1 {
        return compare(&mentioned, filtered, intent);
    }

    trend(&mentioned[0], &filtered, intent)
}

/// Two-area comparison. "Latest" is the last row of each area in dataset
/// order, not the highest year.
fn compare(mentioned: &[String], filtered: Vec<Record>, intent: QueryIntent) -> QueryResult {
    let first = mentioned[0].as_str();
    let second = mentioned[1].as_str();

    let latest_of = |area: &str| filtered.iter().rev().find(|r| r.area == area);

    let summary = match (latest_of(first), latest_of(second)) {
        (Some(latest1), Some(latest2)) if intent.demand => {
            narrative::demand_comparison((first, latest1), (second, latest2))
        }
        (Some(latest1), Some(latest2)) => {
            narrative::price_comparison((first, latest1), (second, latest2))
        }
        // mentioned areas come from the dataset, so each has at least one row
        _ => narrative::no_data_for_area(first),
    };

    QueryResult {
        summary,
        chart_data: filtered.clone(),
        table_data: filtered,
        areas: mentioned.to_vec(),
        kind: QueryKind::Comparison,
        growth: None,
    }
}

/// Single-area trend over the first mentioned area.
fn trend(area: &str, filtered: &[Record], intent: QueryIntent) -> QueryResult {
    let mut area_data: Vec<Record> = filtered.iter().filter(|r| r.area == area).cloned().collect();
    area_data.sort_by_key(|r| r.year);

    let (oldest, latest) = match (area_data.first(), area_data.last()) {
        (Some(oldest), Some(latest)) => (oldest, latest),
        _ => {
            return QueryResult::message(narrative::no_data_for_area(area), vec![area.to_string()])
        }
    };

    let growth = Growth::between(oldest, latest);
    let summary = if intent.price {
        narrative::price_analysis(area, latest, &growth)
    } else if intent.demand {
        narrative::demand_analysis(area, latest, &growth)
    } else {
        narrative::overview(area, latest, &growth)
    };

    QueryResult {
        summary,
        chart_data: area_data.clone(),
        table_data: area_data,
        areas: vec![area.to_string()],
        kind: QueryKind::Trend,
        growth: Some(growth),
    }
}
