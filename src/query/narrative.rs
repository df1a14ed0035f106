//! Narrative templates for query answers.

use crate::record::Record;
use serde::Serialize;

/// Growth between the oldest and latest record of one area.
///
/// Percentages keep IEEE semantics: a zero baseline yields `inf` or `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Growth {
    pub from_year: i32,
    pub to_year: i32,
    pub price_pct: f64,
    pub demand_pct: f64,
}

impl Growth {
    pub fn between(oldest: &Record, latest: &Record) -> Self {
        Self {
            from_year: oldest.year,
            to_year: latest.year,
            price_pct: growth_pct(oldest.avg_price, latest.avg_price),
            demand_pct: growth_pct(oldest.demand, latest.demand),
        }
    }

    pub fn price_display(&self) -> String {
        format_pct(self.price_pct)
    }

    pub fn demand_display(&self) -> String {
        format_pct(self.demand_pct)
    }
}

pub fn growth_pct(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}

/// One decimal place, exact ties rounded away from zero; non-finite values
/// spelled out.
pub fn format_pct(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if is_tenths_tie(value) {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// True when `value` lies exactly halfway between two tenths. The only such
/// doubles are odd multiples of 0.25, where scaling by 10 is exact.
fn is_tenths_tie(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.fract() == 0.0 && quarters % 2.0 != 0.0 && quarters.abs() < 1e15
}

pub fn no_area_recognized(areas: &[String]) -> String {
    format!(
        "I couldn't identify any specific area in your query. Available areas in the dataset: {}.\n\n\
         Please mention an area from this list.",
        areas.join(", ")
    )
}

pub fn no_data_for_area(area: &str) -> String {
    format!("No data available for {}.", area)
}

pub fn demand_comparison(first: (&str, &Record), second: (&str, &Record)) -> String {
    let (name1, latest1) = first;
    let (name2, latest2) = second;
    let stronger = if latest1.demand > latest2.demand { name1 } else { name2 };

    format!(
        "Comparing demand trends between {name1} and {name2}:\n\n\
         {name1} shows a current demand index of {d1}, with consistent growth over the years. \
         {name2} has a demand index of {d2}. \
         {stronger} demonstrates stronger market demand. \
         Both areas show positive momentum, making them attractive for real estate investment.",
        d1 = latest1.demand,
        d2 = latest2.demand,
    )
}

pub fn price_comparison(first: (&str, &Record), second: (&str, &Record)) -> String {
    let (name1, latest1) = first;
    let (name2, latest2) = second;
    let better_value = if latest1.avg_price > latest2.avg_price { name2 } else { name1 };
    let higher_demand = if latest1.demand > latest2.demand { name1 } else { name2 };

    format!(
        "Comparative analysis of {name1} vs {name2}:\n\n\
         {name1}: Current avg price ₹{p1}/sqft, demand index {d1}\n\
         {name2}: Current avg price ₹{p2}/sqft, demand index {d2}\n\n\
         {better_value} offers better value, while {higher_demand} shows higher market demand.",
        p1 = latest1.avg_price,
        d1 = latest1.demand,
        p2 = latest2.avg_price,
        d2 = latest2.demand,
    )
}

pub fn price_analysis(area: &str, latest: &Record, growth: &Growth) -> String {
    format!(
        "Price analysis for {area}:\n\n\
         Current average price: ₹{price}/sqft\n\
         Price growth ({from}-{to}): {pct}%\n\
         Year-over-year growth: Strong upward trend\n\n\
         The area has shown consistent price appreciation with {tx} transactions in {to}. \
         This indicates a healthy market with good liquidity and investor confidence.",
        price = latest.avg_price,
        from = growth.from_year,
        to = growth.to_year,
        pct = growth.price_display(),
        tx = latest.transactions,
    )
}

pub fn demand_analysis(area: &str, latest: &Record, growth: &Growth) -> String {
    let strength = if latest.demand > 85.0 { "strong" } else { "moderate" };
    let momentum = if growth.demand_pct > 5.0 { "accelerating" } else { "steady" };

    format!(
        "Demand analysis for {area}:\n\n\
         Current demand index: {demand}/100\n\
         Demand growth: {pct}%\n\
         Market activity: {tx} transactions\n\n\
         {area} maintains {strength} demand with {momentum} growth momentum. \
         The consistent transaction volume suggests sustained buyer interest.",
        demand = latest.demand,
        pct = growth.demand_display(),
        tx = latest.transactions,
    )
}

pub fn overview(area: &str, latest: &Record, growth: &Growth) -> String {
    let standing = if latest.demand > 90.0 {
        "a premium locality"
    } else if latest.demand > 80.0 {
        "an emerging hotspot"
    } else {
        "a developing area"
    };
    let potential = if growth.price_pct > 20.0 {
        "excellent"
    } else if growth.price_pct > 10.0 {
        "good"
    } else {
        "steady"
    };

    format!(
        "Comprehensive analysis of {area}:\n\n\
         📊 Current Metrics ({year}):\n\
         • Average Price: ₹{price}/sqft\n\
         • Demand Index: {demand}/100\n\
         • Avg Property Size: {size} sqft\n\
         • Transactions: {tx}\n\n\
         📈 Growth Trends:\n\
         • Price Growth: {price_pct}% ({from}-{to})\n\
         • Demand Growth: {demand_pct}%\n\n\
         {area} is {standing} with {potential} appreciation potential.",
        year = latest.year,
        price = latest.avg_price,
        demand = latest.demand,
        size = latest.avg_size,
        tx = latest.transactions,
        price_pct = growth.price_display(),
        from = growth.from_year,
        to = growth.to_year,
        demand_pct = growth.demand_display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(29.230769), "29.2");
        assert_eq!(format_pct(25.0), "25.0");
        assert_eq!(format_pct(-3.04), "-3.0");
        assert_eq!(format_pct(f64::INFINITY), "Infinity");
        assert_eq!(format_pct(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_pct(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_pct_rounds_ties_away_from_zero() {
        assert_eq!(format_pct(growth_pct(80.0, 81.0)), "1.3");
        assert_eq!(format_pct(growth_pct(8000.0, 7900.0)), "-1.3");
        assert_eq!(format_pct(0.25), "0.3");
        assert_eq!(format_pct(-0.75), "-0.8");
        // 0.15 is stored just below the tie
        assert_eq!(format_pct(0.15), "0.1");
        assert_eq!(format_pct(0.5), "0.5");
    }

    #[test]
    fn test_zero_baseline_growth() {
        assert_eq!(growth_pct(0.0, 10.0), f64::INFINITY);
        assert!(growth_pct(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_numbers_print_without_trailing_zero() {
        let latest = Record::new(2025, "Wakad", 8400.0, 92.5, 1130.0, 620);
        let oldest = Record::new(2022, "Wakad", 6500.0, 85.0, 1200.0, 450);
        let text = overview("Wakad", &latest, &Growth::between(&oldest, &latest));
        assert!(text.contains("• Average Price: ₹8400/sqft"));
        assert!(text.contains("• Demand Index: 92.5/100"));
        assert!(text.contains("Wakad is a premium locality with excellent appreciation potential."));
    }

    #[test]
    fn test_demand_analysis_labels() {
        let oldest = Record::new(2022, "Akurdi", 5200.0, 72.0, 1350.0, 280);
        let latest = Record::new(2025, "Akurdi", 6500.0, 79.0, 1280.0, 370);
        let text = demand_analysis("Akurdi", &latest, &Growth::between(&oldest, &latest));
        assert!(text.contains("Demand growth: 9.7%"));
        assert!(text.contains("Akurdi maintains moderate demand with accelerating growth momentum."));
    }
}
