use crate::data::SaleRecord;
use crate::sampler::partition;
use crate::types::Year;

/// Aggregate skew metrics for per-stratum record counts.
#[derive(Clone, Debug, PartialEq)]
pub struct StratumSkew {
    pub total: usize,
    pub strata: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub max_share: f64,
    pub min_share: f64,
    pub ratio: f64,
    pub per_stratum: Vec<StratumShare>,
}

/// One stratum's share of a view.
#[derive(Clone, Debug, PartialEq)]
pub struct StratumShare {
    pub bedroom_category: String,
    pub year: Year,
    pub count: usize,
    pub share: f64,
}

/// Compute skew metrics over the `(bedroom_category, year)` strata of `view`.
///
/// `per_stratum` is sorted by descending count, ties by key. Returns `None` for an empty view.
pub fn stratum_skew(view: &[&SaleRecord]) -> Option<StratumSkew> {
    let strata = partition(view);
    let min = strata.values().map(Vec::len).min()?;
    let max = strata.values().map(Vec::len).max()?;
    let total = view.len();
    let share_of = |count: usize| count as f64 / total as f64;

    let mut per_stratum: Vec<StratumShare> = strata
        .iter()
        .map(|(key, members)| StratumShare {
            bedroom_category: key.bedroom_category.to_string(),
            year: key.year,
            count: members.len(),
            share: share_of(members.len()),
        })
        .collect();
    per_stratum.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.bedroom_category.cmp(&b.bedroom_category))
            .then_with(|| a.year.cmp(&b.year))
    });

    Some(StratumSkew {
        total,
        strata: strata.len(),
        min,
        max,
        mean: total as f64 / strata.len() as f64,
        max_share: share_of(max),
        min_share: share_of(min),
        ratio: max as f64 / min as f64,
        per_stratum,
    })
}
