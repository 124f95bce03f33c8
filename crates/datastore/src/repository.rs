use crate::dataset::{Dataset, DatasetSummary};
use crate::error::StoreError;
use std::sync::{Arc, RwLock};

/// The shared handle to the current dataset.
///
/// Cloning is cheap and every clone points at the same slot. Readers take a
/// `snapshot()` once per request and keep using that `Arc<Dataset>` for the
/// whole request, so a concurrent `replace` never tears a response apart.
/// Writers build the new dataset entirely off-lock; the lock is held only for
/// the pointer swap.
#[derive(Debug, Clone, Default)]
pub struct DatasetRepository {
    current: Arc<RwLock<Option<Arc<Dataset>>>>,
}

impl DatasetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically installs a freshly-ingested dataset, dropping the previous
    /// one. Last writer wins.
    pub fn replace(&self, dataset: Dataset) -> DatasetSummary {
        let dataset = Arc::new(dataset);
        let summary = dataset.summary();
        let mut slot = self.current.write().expect("dataset lock poisoned");
        *slot = Some(dataset);
        tracing::info!(
            funds = summary.total_funds,
            periods = summary.total_periods,
            "dataset replaced"
        );
        summary
    }

    /// Removes the current dataset entirely.
    pub fn clear(&self) {
        let mut slot = self.current.write().expect("dataset lock poisoned");
        *slot = None;
        tracing::info!("dataset cleared");
    }

    /// The current dataset, if one has been uploaded. In-flight readers keep
    /// their snapshot alive even after a replace or clear.
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        self.current.read().expect("dataset lock poisoned").clone()
    }

    /// Convenience for handlers: the snapshot or the canonical "no data"
    /// error.
    pub fn require_snapshot(&self) -> Result<Arc<Dataset>, StoreError> {
        self.snapshot().ok_or(StoreError::NoDataLoaded)
    }

    pub fn has_data(&self) -> bool {
        self.current.read().expect("dataset lock poisoned").is_some()
    }
}
