use async_trait::async_trait;

use crate::query_hydrator::QueryHydrator;
use crate::types::OrderQuery;
use crate::util;

/// Rows per page when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Normalizes the search box and fills in the page size.
pub struct PageDefaultsQueryHydrator {
    pub default_page_size: usize,
}

impl Default for PageDefaultsQueryHydrator {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[async_trait]
impl QueryHydrator<OrderQuery> for PageDefaultsQueryHydrator {
    async fn hydrate(&self, query: &OrderQuery) -> Result<OrderQuery, String> {
        Ok(OrderQuery {
            search: util::normalize_search(query.search.as_deref()),
            page_size: Some(query.page_size.unwrap_or(self.default_page_size).max(1)),
            ..query.clone()
        })
    }

    fn update(&self, query: &mut OrderQuery, hydrated: OrderQuery) {
        query.search = hydrated.search;
        query.page_size = hydrated.page_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackscore_sim::Threshold;

    #[tokio::test]
    async fn fills_page_size_and_trims_search() {
        let hydrator = PageDefaultsQueryHydrator::default();
        let mut query = OrderQuery::new("q-1", Threshold::default());
        query.search = Some("  PUNE ".into());

        let hydrated = hydrator.hydrate(&query).await.unwrap();
        hydrator.update(&mut query, hydrated);
        assert_eq!(query.search.as_deref(), Some("pune"));
        assert_eq!(query.page_size, Some(DEFAULT_PAGE_SIZE));
    }

    #[tokio::test]
    async fn keeps_explicit_page_size_but_never_zero() {
        let hydrator = PageDefaultsQueryHydrator::default();
        let mut query = OrderQuery::new("q-2", Threshold::default());
        query.page_size = Some(0);
        let hydrated = hydrator.hydrate(&query).await.unwrap();
        assert_eq!(hydrated.page_size, Some(1));
    }
}
