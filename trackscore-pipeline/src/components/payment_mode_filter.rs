use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{OrderCandidate, OrderQuery};

/// Keeps only orders with the requested payment mode.
pub struct PaymentModeFilter;

#[async_trait]
impl Filter<OrderQuery, OrderCandidate> for PaymentModeFilter {
    fn enable(&self, query: &OrderQuery) -> bool {
        query.payment_mode.is_some()
    }

    async fn filter(
        &self,
        query: &OrderQuery,
        candidates: Vec<OrderCandidate>,
    ) -> Result<FilterResult<OrderCandidate>, String> {
        let mode = query
            .payment_mode
            .ok_or_else(|| "payment mode filter ran without a mode".to_string())?;
        Ok(FilterResult::partition(candidates, |c| c.payment_mode == mode))
    }
}
