/// Constants used by the stratified sampler and its call sites.
pub mod sampler {
    /// Default seed used when a caller does not supply one.
    pub const DEFAULT_SEED: u64 = 42;
    /// Upper bound on values returned by the size distribution query.
    pub const SIZE_DISTRIBUTION_MAX_SAMPLES: usize = 750;
    /// Upper bound on values returned by the price distribution query.
    pub const PRICE_DISTRIBUTION_MAX_SAMPLES: usize = 750;
    /// Upper bound on points returned by the scatter query.
    pub const SCATTER_MAX_SAMPLES: usize = 500;
}

/// Constants used by scalar and grouped aggregation.
pub mod aggregate {
    /// Decimal places kept by summary statistics. Trend values are not rounded.
    pub const SUMMARY_DECIMALS: i32 = 2;
}

/// Recognized bedroom category labels.
pub mod bedrooms {
    /// Label for small homes.
    pub const SMALL: &str = "small";
    /// Label for medium homes.
    pub const MEDIUM: &str = "medium";
    /// Label for large homes.
    pub const LARGE: &str = "large";
}

/// Column names and defaults for the tabular dataset source.
pub mod dataset {
    /// Sale price column.
    pub const COL_PRICE: &str = "price";
    /// Living area column.
    pub const COL_SQFT_LIVING: &str = "sqft_living";
    /// Bedroom category column.
    pub const COL_BEDROOM_CATEGORY: &str = "bedroom_category";
    /// Sale year column.
    pub const COL_YEAR: &str = "year";
    /// Sale month column.
    pub const COL_MONTH: &str = "month";
    /// Optional precomputed price-per-square-foot column.
    pub const COL_PRICE_PER_SQFT: &str = "price_per_sqft";
    /// Columns that must be present for a load to succeed.
    pub const REQUIRED_COLUMNS: [&str; 5] = [
        COL_PRICE,
        COL_SQFT_LIVING,
        COL_BEDROOM_CATEGORY,
        COL_YEAR,
        COL_MONTH,
    ];
    /// Environment variable consulted for the dataset path.
    pub const DATA_PATH_ENV: &str = "HOUSING_DATA_PATH";
    /// Project default dataset path.
    pub const DEFAULT_DATA_PATH: &str = "data/houses.csv";
}

/// Filter keys accepted at the request boundary.
pub mod filters {
    /// Inclusive lower price bound.
    pub const MIN_PRICE: &str = "min_price";
    /// Inclusive upper price bound.
    pub const MAX_PRICE: &str = "max_price";
    /// Exact bedroom category.
    pub const BEDROOM_CATEGORY: &str = "bedroom_category";
    /// Inclusive lower living-area bound.
    pub const MIN_SQFT: &str = "min_sqft";
    /// Inclusive upper living-area bound.
    pub const MAX_SQFT: &str = "max_sqft";
    /// Inclusive first sale year.
    pub const START_YEAR: &str = "start_year";
    /// Inclusive last sale year.
    pub const END_YEAR: &str = "end_year";
    /// Inclusive first sale month.
    pub const START_MONTH: &str = "start_month";
    /// Inclusive last sale month.
    pub const END_MONTH: &str = "end_month";
}
