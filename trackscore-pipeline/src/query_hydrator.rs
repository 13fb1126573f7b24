use async_trait::async_trait;

use crate::util;

/// Normalizes what the orders page sent before any order is fetched: the
/// search box text, the page size, anything the URL left blank.
///
/// Query hydrators run concurrently on copies of the same query and each one
/// copies back only the fields it owns in `update`, so two hydrators must
/// never own the same field.
#[async_trait]
pub trait QueryHydrator<Q>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return a normalized copy. An `Err` leaves the query as the caller sent it.
    async fn hydrate(&self, query: &Q) -> Result<Q, String>;

    fn update(&self, query: &mut Q, hydrated: Q);

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
