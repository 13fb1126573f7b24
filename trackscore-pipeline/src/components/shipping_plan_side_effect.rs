use async_trait::async_trait;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{OrderCandidate, OrderQuery, ShipDecision};

/// Records the shipping plan shown to the seller.
///
/// Only logs for now; there is no dispatch integration to notify.
pub struct ShippingPlanSideEffect;

#[async_trait]
impl SideEffect<OrderQuery, OrderCandidate> for ShippingPlanSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<OrderQuery, OrderCandidate>>,
    ) -> Result<(), String> {
        let ship = input.count_where(|c| c.decision == ShipDecision::Ship);
        let flagged = input.count_where(|c| c.decision == ShipDecision::Flagged);
        log::info!(
            "request_id={} threshold={} shipping plan page: {} to ship, {} flagged",
            input.query.request_id,
            input.query.threshold,
            ship,
            flagged
        );
        Ok(())
    }
}
