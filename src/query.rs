//! Query facade: filter, then aggregate, sample, or count.
//!
//! `QueryEngine` owns no mutable state. It borrows the shared dataset for each call,
//! builds transient views, and returns plain serializable results. Empty matches produce
//! the documented zero/empty results, never errors.

use std::sync::Arc;

use serde::Serialize;
use tracing::{Level, debug};

use crate::aggregate::{summary, trends};
use crate::bedrooms::bedroom_counts;
use crate::config::{EngineConfig, FilterSpec};
use crate::data::{
    BedroomCounts, Dataset, RecordView, SaleRecord, ScatterPoint, Summary, TrendPoint,
};
use crate::filter::apply;
use crate::metrics::stratum_skew;
use crate::sampler::stratified_sample;
use crate::types::BedroomCategory;

/// One request to the engine, carrying only the filters that query kind accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// Mean price, median size, and count.
    Summary(FilterSpec),
    /// Per-month statistics.
    Trends(FilterSpec),
    /// Sampled living-area values.
    SizeDistribution {
        min_sqft: Option<f64>,
        max_sqft: Option<f64>,
    },
    /// Sampled price values.
    PriceDistribution {
        min_price: Option<f64>,
        max_price: Option<f64>,
    },
    /// Sampled price/size points.
    Scatter {
        min_sqft: Option<f64>,
        max_sqft: Option<f64>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    },
    /// Counts per bedroom category.
    BedroomDistribution {
        min_price: Option<f64>,
        max_price: Option<f64>,
        bedroom_category: Option<BedroomCategory>,
    },
}

/// Result of `QueryEngine::execute`, serialized as the bare payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Summary(Summary),
    Trends(Vec<TrendPoint>),
    Distribution(Vec<f64>),
    Scatter(Vec<ScatterPoint>),
    Bedrooms(BedroomCounts),
}

/// Stateless dispatcher over a shared, immutable dataset.
#[derive(Clone, Debug)]
pub struct QueryEngine {
    dataset: Arc<Dataset>,
    config: EngineConfig,
}

impl QueryEngine {
    /// Create an engine with default sampling bounds and seed.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_config(dataset, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(dataset: Arc<Dataset>, config: EngineConfig) -> Self {
        Self { dataset, config }
    }

    /// Dataset this engine queries.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Route `query` to the matching operation.
    pub fn execute(&self, query: &Query) -> QueryResult {
        match query {
            Query::Summary(spec) => QueryResult::Summary(self.summary(spec)),
            Query::Trends(spec) => QueryResult::Trends(self.trends(spec)),
            Query::SizeDistribution { min_sqft, max_sqft } => {
                QueryResult::Distribution(self.size_distribution(*min_sqft, *max_sqft))
            }
            Query::PriceDistribution {
                min_price,
                max_price,
            } => QueryResult::Distribution(self.price_distribution(*min_price, *max_price)),
            Query::Scatter {
                min_sqft,
                max_sqft,
                min_price,
                max_price,
            } => QueryResult::Scatter(self.scatter(*min_sqft, *max_sqft, *min_price, *max_price)),
            Query::BedroomDistribution {
                min_price,
                max_price,
                bedroom_category,
            } => QueryResult::Bedrooms(self.bedroom_distribution(
                *min_price,
                *max_price,
                bedroom_category.clone(),
            )),
        }
    }

    /// Summary statistics for records matching `spec`.
    pub fn summary(&self, spec: &FilterSpec) -> Summary {
        summary(&self.select("summary", spec))
    }

    /// Per-month trends for records matching `spec`, ascending by year then month.
    pub fn trends(&self, spec: &FilterSpec) -> Vec<TrendPoint> {
        trends(&self.select("trends", spec))
    }

    /// Up to `size_distribution_samples` living-area values.
    pub fn size_distribution(&self, min_sqft: Option<f64>, max_sqft: Option<f64>) -> Vec<f64> {
        let spec = FilterSpec::default().with_sqft_range(min_sqft, max_sqft);
        let view = self.select("size_distribution", &spec);
        self.sample(&view, self.config.size_distribution_samples)
            .iter()
            .map(|record| record.sqft_living)
            .collect()
    }

    /// Up to `price_distribution_samples` price values.
    pub fn price_distribution(&self, min_price: Option<f64>, max_price: Option<f64>) -> Vec<f64> {
        let spec = FilterSpec::default().with_price_range(min_price, max_price);
        let view = self.select("price_distribution", &spec);
        self.sample(&view, self.config.price_distribution_samples)
            .iter()
            .map(|record| record.price)
            .collect()
    }

    /// Up to `scatter_samples` price/size points.
    ///
    /// Records with a non-finite price or living area are dropped before sampling and do
    /// not count toward any stratum.
    pub fn scatter(
        &self,
        min_sqft: Option<f64>,
        max_sqft: Option<f64>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Vec<ScatterPoint> {
        let spec = FilterSpec::default()
            .with_sqft_range(min_sqft, max_sqft)
            .with_price_range(min_price, max_price);
        let mut view = self.select("scatter", &spec);
        view.retain(|record| record.price.is_finite() && record.sqft_living.is_finite());
        self.sample(&view, self.config.scatter_samples)
            .into_iter()
            .map(ScatterPoint::from)
            .collect()
    }

    /// Bedroom-category counts for records matching the price range and category.
    pub fn bedroom_distribution(
        &self,
        min_price: Option<f64>,
        max_price: Option<f64>,
        bedroom_category: Option<BedroomCategory>,
    ) -> BedroomCounts {
        let spec = FilterSpec {
            bedroom_category,
            ..FilterSpec::default().with_price_range(min_price, max_price)
        };
        bedroom_counts(&self.select("bedroom_distribution", &spec))
    }

    fn select(&self, query: &'static str, spec: &FilterSpec) -> RecordView<'_> {
        let view = apply(self.dataset.records(), spec);
        debug!(
            query,
            matched = view.len(),
            total = self.dataset.len(),
            "filter applied"
        );
        view
    }

    fn sample<'a>(&self, view: &[&'a SaleRecord], max_samples: usize) -> RecordView<'a> {
        let sampled = stratified_sample(view, max_samples, self.config.seed);
        if sampled.len() < view.len() && tracing::enabled!(Level::DEBUG) {
            if let Some(skew) = stratum_skew(&sampled) {
                debug!(
                    input = view.len(),
                    sampled = sampled.len(),
                    strata = skew.strata,
                    max_share = skew.max_share,
                    "sampled view strata"
                );
            }
        }
        sampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(records: Vec<SaleRecord>) -> QueryEngine {
        QueryEngine::new(Arc::new(Dataset::from_records(records)))
    }

    #[test]
    fn execute_routes_each_query_kind() {
        let engine = engine(vec![
            SaleRecord::new(100_000.0, 500.0, "small", 2014, 5),
            SaleRecord::new(200_000.0, 1_000.0, "medium", 2015, 1),
        ]);
        assert!(matches!(
            engine.execute(&Query::Summary(FilterSpec::default())),
            QueryResult::Summary(Summary { total_sales: 2, .. })
        ));
        assert!(matches!(
            engine.execute(&Query::Trends(FilterSpec::default())),
            QueryResult::Trends(points) if points.len() == 2
        ));
        assert_eq!(
            engine.execute(&Query::SizeDistribution {
                min_sqft: Some(600.0),
                max_sqft: None
            }),
            QueryResult::Distribution(vec![1_000.0])
        );
        assert_eq!(
            engine.execute(&Query::PriceDistribution {
                min_price: None,
                max_price: Some(150_000.0)
            }),
            QueryResult::Distribution(vec![100_000.0])
        );
        assert!(matches!(
            engine.execute(&Query::Scatter {
                min_sqft: None,
                max_sqft: None,
                min_price: None,
                max_price: None
            }),
            QueryResult::Scatter(points) if points.len() == 2
        ));
        assert_eq!(
            engine.execute(&Query::BedroomDistribution {
                min_price: None,
                max_price: None,
                bedroom_category: Some("medium".into())
            }),
            QueryResult::Bedrooms(BedroomCounts {
                small: 0,
                medium: 1,
                large: 0,
                total: 1
            })
        );
    }

    #[test]
    fn scatter_drops_non_finite_records() {
        let engine = engine(vec![
            SaleRecord::new(f64::NAN, 500.0, "small", 2014, 5),
            SaleRecord::new(200_000.0, f64::INFINITY, "medium", 2015, 1),
            SaleRecord::new(300_000.0, 1_500.0, "large", 2015, 2),
        ]);
        let points = engine.scatter(None, None, None, None);
        assert_eq!(
            points,
            vec![ScatterPoint {
                price: 300_000.0,
                bedroom_category: "large".into(),
                sqft_living: 1_500.0,
            }]
        );
    }

    #[test]
    fn distributions_respect_configured_bounds() {
        let records: Vec<SaleRecord> = (0..50)
            .map(|idx| {
                let idx = idx as f64;
                SaleRecord::new(1_000.0 * idx + 1.0, 500.0 + idx, "small", 2014, 1)
            })
            .collect();
        let config = EngineConfig {
            size_distribution_samples: 10,
            price_distribution_samples: 5,
            scatter_samples: 3,
            ..EngineConfig::default()
        };
        let engine = QueryEngine::with_config(Arc::new(Dataset::from_records(records)), config);
        assert_eq!(engine.size_distribution(None, None).len(), 10);
        assert_eq!(engine.price_distribution(None, None).len(), 5);
        assert_eq!(engine.scatter(None, None, None, None).len(), 3);
    }

    #[test]
    fn query_result_serializes_bare_payload() {
        let json = serde_json::to_value(QueryResult::Bedrooms(BedroomCounts::default())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"small": 0, "medium": 0, "large": 0, "total": 0})
        );
    }
}
