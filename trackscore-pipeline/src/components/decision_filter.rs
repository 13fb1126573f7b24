use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{OrderCandidate, OrderQuery, OrderView, ShipDecision};

/// Narrows the table to the "to ship" or "flagged" tab.
pub struct DecisionFilter;

#[async_trait]
impl Filter<OrderQuery, OrderCandidate> for DecisionFilter {
    fn enable(&self, query: &OrderQuery) -> bool {
        query.view != OrderView::All
    }

    async fn filter(
        &self,
        query: &OrderQuery,
        candidates: Vec<OrderCandidate>,
    ) -> Result<FilterResult<OrderCandidate>, String> {
        let wanted = match query.view {
            OrderView::Ship => ShipDecision::Ship,
            OrderView::Flagged => ShipDecision::Flagged,
            OrderView::All => return Ok(FilterResult::partition(candidates, |_| true)),
        };
        Ok(FilterResult::partition(candidates, |c| c.decision == wanted))
    }
}
