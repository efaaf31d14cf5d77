use crate::error::IndexError;
use crate::index::{BuildReport, Index};
use crate::MovieRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// A built index readers can query while a rebuild runs.
///
/// Rebuilds happen off-lock; only the final pointer swap takes the write lock.
#[derive(Clone, Default)]
pub struct SharedIndex {
    current: Arc<RwLock<Option<Arc<Index>>>>,
}

impl SharedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn rebuild(&self, records: Vec<MovieRecord>) -> BuildReport {
        let (index, report) = Index::build(records);
        self.replace(index);
        report
    }

    pub fn replace(&self, index: Index) {
        *self.current.write() = Some(Arc::new(index));
    }

    pub fn snapshot(&self) -> Result<Arc<Index>, IndexError> {
        self.current.read().clone().ok_or(IndexError::NotBuilt)
    }

    pub fn search(&self, query: &str) -> Result<Vec<String>, IndexError> {
        Ok(self.snapshot()?.search(query))
    }
}
