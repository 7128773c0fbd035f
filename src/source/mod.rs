//! Dataset source interfaces.
//!
//! A source materializes a complete, schema-validated `Dataset` in one call. Loading
//! happens once at startup; any failure is fatal to the caller and no partial dataset is
//! ever returned.

use std::sync::Arc;

use crate::data::{Dataset, SaleRecord};
use crate::errors::QueryError;

/// CSV-backed source.
pub mod csv_source;

pub use csv_source::CsvSource;

/// Producer of an immutable dataset snapshot.
pub trait DatasetSource: Send + Sync {
    /// Stable identifier used in logs and error messages (a path for file sources).
    fn id(&self) -> &str;
    /// Load and validate every record.
    fn load(&self) -> Result<Dataset, QueryError>;
}

/// Source backed by prebuilt records, mostly for tests and embedding.
pub struct InMemorySource {
    id: String,
    records: Arc<Vec<SaleRecord>>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<String>, records: Vec<SaleRecord>) -> Self {
        Self {
            id: id.into(),
            records: Arc::new(records),
        }
    }
}

impl DatasetSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Dataset, QueryError> {
        Ok(Dataset::from_records(self.records.as_ref().clone()))
    }
}
