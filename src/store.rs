//! Process-wide dataset snapshot.
//!
//! The snapshot is installed once at startup and shared read-only by every query
//! afterwards. Nothing mutates it, so readers never lock.

use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::data::Dataset;
use crate::errors::QueryError;
use crate::source::DatasetSource;

static SNAPSHOT: OnceLock<Arc<Dataset>> = OnceLock::new();

/// Install `dataset` as the process-wide snapshot.
///
/// Fails with `DatasetAlreadyLoaded` if a snapshot is already present; the existing
/// snapshot is left untouched.
pub fn install(dataset: Dataset) -> Result<Arc<Dataset>, QueryError> {
    let dataset = Arc::new(dataset);
    SNAPSHOT
        .set(Arc::clone(&dataset))
        .map_err(|_| QueryError::DatasetAlreadyLoaded)?;
    Ok(dataset)
}

/// Load from `source` and install the result. Load failures leave no snapshot behind.
pub fn install_from(source: &dyn DatasetSource) -> Result<Arc<Dataset>, QueryError> {
    if SNAPSHOT.get().is_some() {
        return Err(QueryError::DatasetAlreadyLoaded);
    }
    let dataset = source.load()?;
    info!(
        source_id = %source.id(),
        record_count = dataset.len(),
        "dataset snapshot installed"
    );
    install(dataset)
}

/// The installed snapshot, if any.
pub fn snapshot() -> Option<Arc<Dataset>> {
    SNAPSHOT.get().cloned()
}
