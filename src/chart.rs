//! Chart series derived from a query result, ready for a plotting front end.

use crate::query::{QueryKind, QueryResult};
use crate::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub description: String,
    pub series: Vec<ChartSeries>,
}

/// Price and demand charts for `result`; empty when the result carries no data.
pub fn build(result: &QueryResult) -> Vec<ChartSpec> {
    if !result.has_data() || result.areas.is_empty() {
        return Vec::new();
    }

    let description = if result.areas.len() > 1 {
        format!("Comparing {}", result.areas.join(" vs "))
    } else {
        format!("Historical data for {}", result.areas[0])
    };

    vec![
        price_chart(result, description.clone()),
        ChartSpec {
            kind: ChartKind::Bar,
            title: "Demand Trends".to_string(),
            description,
            series: vec![ChartSeries {
                name: "Demand Index".to_string(),
                points: points(result.chart_data.iter(), |r| r.demand),
            }],
        },
    ]
}

fn price_chart(result: &QueryResult, description: String) -> ChartSpec {
    let (title, series) = if result.kind == QueryKind::Comparison {
        let series = result
            .areas
            .iter()
            .map(|area| ChartSeries {
                name: format!("{} Price", area),
                points: points(
                    result.chart_data.iter().filter(|r| &r.area == area),
                    |r| r.avg_price,
                ),
            })
            .collect();
        ("Comparative Analysis", series)
    } else {
        let series = vec![ChartSeries {
            name: "Avg Price (₹/sqft)".to_string(),
            points: points(result.chart_data.iter(), |r| r.avg_price),
        }];
        ("Price Trends", series)
    };

    ChartSpec {
        kind: ChartKind::Line,
        title: title.to_string(),
        description,
        series,
    }
}

fn points<'a>(
    records: impl Iterator<Item = &'a Record>,
    metric: impl Fn(&Record) -> f64,
) -> Vec<ChartPoint> {
    records
        .map(|r| ChartPoint {
            year: r.year,
            value: metric(r),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::process;
    use crate::record::demo_dataset;

    #[test]
    fn test_trend_charts() {
        let result = process("Analyze Wakad", &demo_dataset());
        let charts = build(&result);
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].title, "Price Trends");
        assert_eq!(charts[0].kind, ChartKind::Line);
        assert_eq!(charts[0].description, "Historical data for Wakad");
        assert_eq!(charts[0].series[0].points.len(), 4);
        assert_eq!(charts[0].series[0].points[3], ChartPoint { year: 2025, value: 8400.0 });
        assert_eq!(charts[1].title, "Demand Trends");
        assert_eq!(charts[1].kind, ChartKind::Bar);
    }

    #[test]
    fn test_comparison_has_series_per_area() {
        let result = process("Compare Aundh and Baner", &demo_dataset());
        let charts = build(&result);
        assert_eq!(charts[0].title, "Comparative Analysis");
        assert_eq!(charts[0].description, "Comparing Aundh vs Baner");
        let names: Vec<&str> = charts[0].series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Aundh Price", "Baner Price"]);
        assert!(charts[0].series.iter().all(|s| s.points.len() == 4));
    }

    #[test]
    fn test_no_data_no_charts() {
        let result = process("xyz nonsense", &demo_dataset());
        assert!(build(&result).is_empty());
    }
}
