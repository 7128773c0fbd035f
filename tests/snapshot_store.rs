use std::sync::Arc;
use std::thread;

use housing_trends::store;
use housing_trends::{
    Dataset, FilterSpec, InMemorySource, QueryEngine, QueryError, SaleRecord,
};

// The snapshot is process-wide, so the whole lifecycle runs in one test.
#[test]
fn snapshot_installs_once_and_serves_concurrent_readers() {
    assert!(store::snapshot().is_none());

    let source = InMemorySource::new(
        "unit",
        vec![
            SaleRecord::new(100_000.0, 500.0, "small", 2014, 5),
            SaleRecord::new(300_000.0, 1_500.0, "large", 2015, 1),
        ],
    );
    let installed = store::install_from(&source).expect("first install");
    assert_eq!(installed.len(), 2);

    let again = store::install(Dataset::default());
    assert!(matches!(again, Err(QueryError::DatasetAlreadyLoaded)));
    let reload = store::install_from(&source);
    assert!(matches!(reload, Err(QueryError::DatasetAlreadyLoaded)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let dataset = store::snapshot().expect("snapshot installed");
                QueryEngine::new(dataset).summary(&FilterSpec::default())
            })
        })
        .collect();
    for handle in handles {
        let summary = handle.join().expect("reader thread");
        assert_eq!(summary.total_sales, 2);
        assert_eq!(summary.average_price, 200_000.0);
    }

    let shared = store::snapshot().expect("snapshot installed");
    assert!(Arc::ptr_eq(&shared, &installed));
}
