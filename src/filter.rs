//! Single-pass row selection.
//!
//! Every present `FilterSpec` field folds into one predicate, evaluated once per record.
//! No per-field intermediate collections are built.

use crate::config::FilterSpec;
use crate::data::{RecordView, SaleRecord};

impl FilterSpec {
    /// Whether `record` satisfies every present constraint.
    pub fn matches(&self, record: &SaleRecord) -> bool {
        within(record.price, self.min_price, self.max_price)
            && within(record.sqft_living, self.min_sqft, self.max_sqft)
            && within(record.year, self.start_year, self.end_year)
            && within(record.month, self.start_month, self.end_month)
            && self
                .bedroom_category
                .as_deref()
                .is_none_or(|category| record.bedroom_category == category)
    }

    /// Whether no field is set.
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterSpec::default()
    }
}

// NaN fails any present bound.
fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

/// Select the records matching `spec`, preserving input order.
///
/// Accepts the dataset itself or any previously filtered view, so
/// `apply(apply(d, f), f) == apply(d, f)`.
pub fn apply<'a, I>(records: I, spec: &FilterSpec) -> RecordView<'a>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    records
        .into_iter()
        .filter(|record| spec.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<SaleRecord> {
        vec![
            SaleRecord::new(100_000.0, 500.0, "small", 2014, 5),
            SaleRecord::new(200_000.0, 1_000.0, "medium", 2014, 11),
            SaleRecord::new(300_000.0, 1_500.0, "large", 2015, 1),
            SaleRecord::new(400_000.0, 2_000.0, "medium", 2015, 4),
        ]
    }

    #[test]
    fn unconstrained_spec_keeps_everything() {
        let records = fixture();
        let spec = FilterSpec::default();
        assert!(spec.is_unconstrained());
        assert_eq!(apply(&records, &spec).len(), records.len());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let records = fixture();
        let spec = FilterSpec::default().with_price_range(Some(200_000.0), Some(300_000.0));
        let view = apply(&records, &spec);
        let prices: Vec<f64> = view.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![200_000.0, 300_000.0]);
    }

    #[test]
    fn fields_combine_conjunctively() {
        let records = fixture();
        let spec = FilterSpec::default()
            .with_bedroom_category("medium")
            .with_sqft_range(Some(1_500.0), None);
        let view = apply(&records, &spec);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].price, 400_000.0);
    }

    #[test]
    fn month_range_applies_independently_of_year() {
        let records = fixture();
        let spec = FilterSpec::default().with_month_range(Some(1), Some(5));
        let months: Vec<u32> = apply(&records, &spec).iter().map(|r| r.month).collect();
        assert_eq!(months, vec![5, 1, 4]);
    }

    #[test]
    fn flipped_year_range_selects_nothing() {
        let records = fixture();
        let spec = FilterSpec::default().with_year_range(Some(2015), Some(2014));
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn unknown_category_selects_nothing() {
        let records = fixture();
        let spec = FilterSpec::default().with_bedroom_category("superluxury");
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn nan_price_fails_present_bound_only() {
        let records = vec![SaleRecord::new(f64::NAN, 1_000.0, "small", 2014, 1)];
        assert_eq!(apply(&records, &FilterSpec::default()).len(), 1);
        let bounded = FilterSpec::default().with_price_range(Some(0.0), None);
        assert!(apply(&records, &bounded).is_empty());
    }

    #[test]
    fn apply_is_idempotent_over_views() {
        let records = fixture();
        let spec = FilterSpec::default().with_price_range(Some(150_000.0), None);
        let once = apply(&records, &spec);
        let twice = apply(once.iter().copied(), &spec);
        assert_eq!(once, twice);
    }
}
