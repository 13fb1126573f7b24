use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{OrderCandidate, OrderQuery};

/// Keeps orders whose id, customer, city, pincode or product contains the
/// search text. Runs only when the query carries a search term.
pub struct SearchFilter;

#[async_trait]
impl Filter<OrderQuery, OrderCandidate> for SearchFilter {
    fn enable(&self, query: &OrderQuery) -> bool {
        query.search.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    async fn filter(
        &self,
        query: &OrderQuery,
        candidates: Vec<OrderCandidate>,
    ) -> Result<FilterResult<OrderCandidate>, String> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        Ok(FilterResult::partition(candidates, |c| {
            c.search_haystack().contains(&needle)
        }))
    }
}
