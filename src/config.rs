use std::str::FromStr;

use crate::constants::filters::{
    BEDROOM_CATEGORY, END_MONTH, END_YEAR, MAX_PRICE, MAX_SQFT, MIN_PRICE, MIN_SQFT, START_MONTH,
    START_YEAR,
};
use crate::constants::sampler::{
    DEFAULT_SEED, PRICE_DISTRIBUTION_MAX_SAMPLES, SCATTER_MAX_SAMPLES,
    SIZE_DISTRIBUTION_MAX_SAMPLES,
};
use crate::errors::QueryError;
use crate::types::{BedroomCategory, Month, Seed, Year};

/// Optional row constraints combined with logical AND.
///
/// An absent field imposes no constraint. Range bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    /// Lower price bound.
    pub min_price: Option<f64>,
    /// Upper price bound.
    pub max_price: Option<f64>,
    /// Exact bedroom category.
    pub bedroom_category: Option<BedroomCategory>,
    /// Lower living-area bound.
    pub min_sqft: Option<f64>,
    /// Upper living-area bound.
    pub max_sqft: Option<f64>,
    /// First sale year.
    pub start_year: Option<Year>,
    /// Last sale year.
    pub end_year: Option<Year>,
    /// First sale month.
    pub start_month: Option<Month>,
    /// Last sale month.
    pub end_month: Option<Month>,
}

impl FilterSpec {
    /// Constrain prices to `[min, max]`; `None` leaves that side open.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Constrain living area to `[min, max]`; `None` leaves that side open.
    pub fn with_sqft_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_sqft = min;
        self.max_sqft = max;
        self
    }

    /// Require an exact bedroom category.
    pub fn with_bedroom_category(mut self, category: impl Into<BedroomCategory>) -> Self {
        self.bedroom_category = Some(category.into());
        self
    }

    /// Constrain sale years to `[start, end]`.
    pub fn with_year_range(mut self, start: Option<Year>, end: Option<Year>) -> Self {
        self.start_year = start;
        self.end_year = end;
        self
    }

    /// Constrain sale months to `[start, end]`, independently of the year range.
    pub fn with_month_range(mut self, start: Option<Month>, end: Option<Month>) -> Self {
        self.start_month = start;
        self.end_month = end;
        self
    }

    /// Build a spec from textual `key=value` style pairs, as received from a request boundary.
    ///
    /// Unknown keys are rejected rather than ignored, and numeric fields must parse. A key
    /// repeated later in the input overrides the earlier value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut spec = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            match key {
                MIN_PRICE => spec.min_price = Some(parse_field(key, value)?),
                MAX_PRICE => spec.max_price = Some(parse_field(key, value)?),
                BEDROOM_CATEGORY => spec.bedroom_category = Some(value.to_string()),
                MIN_SQFT => spec.min_sqft = Some(parse_field(key, value)?),
                MAX_SQFT => spec.max_sqft = Some(parse_field(key, value)?),
                START_YEAR => spec.start_year = Some(parse_field(key, value)?),
                END_YEAR => spec.end_year = Some(parse_field(key, value)?),
                START_MONTH => spec.start_month = Some(parse_field(key, value)?),
                END_MONTH => spec.end_month = Some(parse_field(key, value)?),
                other => return Err(QueryError::UnknownFilter(other.to_string())),
            }
        }
        Ok(spec)
    }
}

fn parse_field<T: FromStr>(field: &str, raw: &str) -> Result<T, QueryError> {
    raw.parse::<T>()
        .map_err(|_| QueryError::InvalidFilterValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Query engine configuration: sampling seed and per-query sample bounds.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Seed that determines every sampling pass made by the engine.
    pub seed: Seed,
    /// Max values returned by the size distribution query.
    pub size_distribution_samples: usize,
    /// Max values returned by the price distribution query.
    pub price_distribution_samples: usize,
    /// Max points returned by the scatter query.
    pub scatter_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            size_distribution_samples: SIZE_DISTRIBUTION_MAX_SAMPLES,
            price_distribution_samples: PRICE_DISTRIBUTION_MAX_SAMPLES,
            scatter_samples: SCATTER_MAX_SAMPLES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_parses_every_recognized_field() {
        let spec = FilterSpec::from_pairs([
            ("min_price", "100000"),
            ("max_price", "750000.5"),
            ("bedroom_category", "medium"),
            ("min_sqft", "800"),
            ("max_sqft", "3000"),
            ("start_year", "2014"),
            ("end_year", "2015"),
            ("start_month", "1"),
            ("end_month", "10"),
        ])
        .unwrap();
        assert_eq!(
            spec,
            FilterSpec::default()
                .with_price_range(Some(100_000.0), Some(750_000.5))
                .with_bedroom_category("medium")
                .with_sqft_range(Some(800.0), Some(3_000.0))
                .with_year_range(Some(2014), Some(2015))
                .with_month_range(Some(1), Some(10))
        );
    }

    #[test]
    fn from_pairs_empty_input_is_unconstrained() {
        let spec = FilterSpec::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn from_pairs_rejects_unknown_key() {
        let err = FilterSpec::from_pairs([("min_prike", "100000")]).unwrap_err();
        assert!(matches!(err, QueryError::UnknownFilter(ref key) if key == "min_prike"));
    }

    #[test]
    fn from_pairs_rejects_non_numeric_value() {
        let err = FilterSpec::from_pairs([("min_price", "abc")]).unwrap_err();
        match err {
            QueryError::InvalidFilterValue { field, value } => {
                assert_eq!(field, "min_price");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_pairs_rejects_fractional_year() {
        let err = FilterSpec::from_pairs([("start_year", "2015.5")]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilterValue { .. }));
    }

    #[test]
    fn engine_config_defaults_match_call_site_bounds() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.size_distribution_samples, 750);
        assert_eq!(config.price_distribution_samples, 750);
        assert_eq!(config.scatter_samples, 500);
    }
}
