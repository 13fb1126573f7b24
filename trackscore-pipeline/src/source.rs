use async_trait::async_trait;

use crate::util;

/// Where the order window comes from: the seeded generator, a loaded CSV
/// export, or later a storefront API.
///
/// Every enabled source is queried at once and the windows are concatenated
/// in source order, so a source that fails only drops its own orders.
#[async_trait]
pub trait Source<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// A source with nothing to serve should return `false` here rather than
    /// an empty window, so it does not show up in the retrieval log.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// The full window for the query. Filtering and paging happen later;
    /// the ship quota is computed over everything returned here.
    async fn get_candidates(&self, query: &Q) -> Result<Vec<C>, String>;

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
