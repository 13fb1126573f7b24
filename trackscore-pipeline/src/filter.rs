use async_trait::async_trait;

use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

impl<C> FilterResult<C> {
    /// Partition `candidates` with `keep`; order is preserved on both sides.
    pub fn partition<F>(candidates: Vec<C>, keep: F) -> Self
    where
        F: FnMut(&C) -> bool,
    {
        let (kept, removed) = candidates.into_iter().partition(keep);
        Self { kept, removed }
    }
}

/// Filters run sequentially; removed candidates are reported but never
/// reach scoring or selection.
#[async_trait]
pub trait Filter<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this filter should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Split candidates into those that continue down the pipeline and
    /// those that are dropped. A failing filter leaves its input untouched.
    async fn filter(&self, query: &Q, candidates: Vec<C>) -> Result<FilterResult<C>, String>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
