use serde::{Deserialize, Serialize};

pub use crate::types::{BedroomCategory, Month, Year};

/// One observed home sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale price.
    pub price: f64,
    /// Interior living area in square feet.
    pub sqft_living: f64,
    /// Bedroom category label (`small`, `medium`, `large`, or anything else the source holds).
    pub bedroom_category: BedroomCategory,
    /// Sale year.
    pub year: Year,
    /// Sale month (1-12).
    pub month: Month,
    /// `price / sqft_living`, either precomputed by the source or derived on load.
    pub price_per_sqft: f64,
}

impl SaleRecord {
    /// Build a record, deriving `price_per_sqft` from `price` and `sqft_living`.
    pub fn new(
        price: f64,
        sqft_living: f64,
        bedroom_category: impl Into<BedroomCategory>,
        year: Year,
        month: Month,
    ) -> Self {
        Self {
            price,
            sqft_living,
            bedroom_category: bedroom_category.into(),
            year,
            month,
            price_per_sqft: price / sqft_living,
        }
    }

    /// Override the derived `price_per_sqft` with a source-provided value.
    pub fn with_price_per_sqft(mut self, price_per_sqft: f64) -> Self {
        self.price_per_sqft = price_per_sqft;
        self
    }
}

/// Ordered, read-only subset of a dataset produced by a query step.
pub type RecordView<'a> = Vec<&'a SaleRecord>;

/// Immutable, ordered collection of sale records.
///
/// Nothing mutates a dataset after construction; queries borrow records into views.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<SaleRecord>,
}

impl Dataset {
    /// Wrap already-validated records.
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    /// All records in source order.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow every record as an unfiltered view.
    pub fn view(&self) -> RecordView<'_> {
        self.records.iter().collect()
    }
}

/// Scalar statistics over a filtered view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Mean sale price, rounded to two decimals (`0` when empty).
    pub average_price: f64,
    /// Median living area, rounded to two decimals (`0` when empty).
    pub median_sqft: f64,
    /// Number of matching sales.
    pub total_sales: usize,
}

impl Summary {
    /// Result for a view with no records.
    pub fn empty() -> Self {
        Self {
            average_price: 0.0,
            median_sqft: 0.0,
            total_sales: 0,
        }
    }
}

/// Statistics for one `(year, month)` group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: Year,
    pub month: Month,
    pub average_price: f64,
    pub median_sqft: f64,
    pub average_price_per_sqft: f64,
    pub total_sales: usize,
}

/// Projection of a sampled record for the price/size scatter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub price: f64,
    pub bedroom_category: BedroomCategory,
    pub sqft_living: f64,
}

impl From<&SaleRecord> for ScatterPoint {
    fn from(record: &SaleRecord) -> Self {
        Self {
            price: record.price,
            bedroom_category: record.bedroom_category.clone(),
            sqft_living: record.sqft_living,
        }
    }
}

/// Sale counts per recognized bedroom category.
///
/// `total` counts every record, so `small + medium + large` falls short of it whenever
/// the view holds unrecognized categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedroomCounts {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    pub total: usize,
}
