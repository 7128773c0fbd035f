#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Scalar and grouped statistics.
pub mod aggregate;
/// Bedroom-category tallies.
pub mod bedrooms;
/// Command-line boundary over the query engine.
pub mod cli;
/// Filter and engine configuration types.
pub mod config;
/// Centralized constants used across filtering, sampling, and loading.
pub mod constants;
/// Sale record, dataset, and result types.
pub mod data;
/// Single-pass row filtering.
pub mod filter;
/// Stratum skew metrics for sampled views.
pub mod metrics;
/// Query facade and dispatch.
pub mod query;
/// Stratified, seeded downsampling.
pub mod sampler;
/// Dataset sources.
pub mod source;
/// Process-wide dataset snapshot.
pub mod store;
/// Shared type aliases.
pub mod types;
/// Numeric helpers.
pub mod utils;

mod errors;

pub use config::{EngineConfig, FilterSpec};
pub use data::{
    BedroomCounts, Dataset, RecordView, SaleRecord, ScatterPoint, Summary, TrendPoint,
};
pub use errors::QueryError;
pub use query::{Query, QueryEngine, QueryResult};
pub use sampler::{DeterministicRng, StratumKey, stratified_sample};
pub use source::{CsvSource, DatasetSource, InMemorySource};
pub use types::{BedroomCategory, Month, Seed, Year};
