use std::io;

use thiserror::Error;

use crate::types::{ColumnName, FilterKey};

/// Error type for dataset loading and filter-boundary failures.
///
/// Empty query results are never reported through this type.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid value '{value}' for filter '{field}'")]
    InvalidFilterValue { field: FilterKey, value: String },
    #[error("'{0}' is not a recognized filter")]
    UnknownFilter(FilterKey),
    #[error("dataset '{path}' could not be loaded: {reason}")]
    DatasetLoad { path: String, reason: String },
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: ColumnName },
    #[error("row {row}: column '{column}' has untypeable value '{value}'")]
    InvalidValue {
        column: ColumnName,
        row: usize,
        value: String,
    },
    #[error("a dataset snapshot is already installed")]
    DatasetAlreadyLoaded,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
