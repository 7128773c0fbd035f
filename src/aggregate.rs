//! Scalar and grouped statistics over filtered views.

use std::collections::HashMap;

use crate::constants::aggregate::SUMMARY_DECIMALS;
use crate::data::{SaleRecord, Summary, TrendPoint};
use crate::types::{Month, Year};
use crate::utils::{mean, median, round_to};

/// Mean price, median living area, and count over `view`.
///
/// Both statistics are rounded to two decimals. An empty view yields zeros.
pub fn summary(view: &[&SaleRecord]) -> Summary {
    let Some(average_price) = mean(view.iter().map(|record| record.price)) else {
        return Summary::empty();
    };
    let mut sqft: Vec<f64> = view.iter().map(|record| record.sqft_living).collect();
    let median_sqft = median(&mut sqft).unwrap_or(0.0);
    Summary {
        average_price: round_to(average_price, SUMMARY_DECIMALS),
        median_sqft: round_to(median_sqft, SUMMARY_DECIMALS),
        total_sales: view.len(),
    }
}

/// Running totals for one `(year, month)` group.
#[derive(Default)]
struct TrendAccumulator {
    count: usize,
    price_sum: f64,
    price_per_sqft_sum: f64,
    sqft: Vec<f64>,
}

impl TrendAccumulator {
    fn push(&mut self, record: &SaleRecord) {
        self.count += 1;
        self.price_sum += record.price;
        self.price_per_sqft_sum += record.price_per_sqft;
        self.sqft.push(record.sqft_living);
    }

    fn finish(mut self, year: Year, month: Month) -> TrendPoint {
        let count = self.count as f64;
        TrendPoint {
            year,
            month,
            average_price: self.price_sum / count,
            median_sqft: median(&mut self.sqft).unwrap_or(0.0),
            average_price_per_sqft: self.price_per_sqft_sum / count,
            total_sales: self.count,
        }
    }
}

/// Per-month statistics, ascending by year then month.
///
/// Each `(year, month)` present in `view` appears exactly once. Values are not rounded.
pub fn trends(view: &[&SaleRecord]) -> Vec<TrendPoint> {
    let mut groups: HashMap<(Year, Month), TrendAccumulator> = HashMap::new();
    for record in view {
        groups
            .entry((record.year, record.month))
            .or_default()
            .push(record);
    }

    let mut points: Vec<TrendPoint> = groups
        .into_iter()
        .map(|((year, month), acc)| acc.finish(year, month))
        .collect();
    points.sort_by_key(|point| (point.year, point.month));
    points
}
