use async_trait::async_trait;

use trackscore_sim::metrics::orders_to_ship;

use crate::hydrator::Hydrator;
use crate::selector::compare_scores;
use crate::types::{OrderCandidate, OrderQuery, ShipDecision};

/// Marks the best orders for shipping and flags the rest.
///
/// The quota comes from the same formula as the dashboard cards, applied to
/// the number of retrieved orders, so a 156-order window ships exactly what
/// the "Orders to Ship" card shows. Orders are ranked by quality score, ties
/// broken by id for a stable split. An order without a usable score ranks
/// after every scored order.
pub struct ShipDecisionHydrator;

#[async_trait]
impl Hydrator<OrderQuery, OrderCandidate> for ShipDecisionHydrator {
    async fn hydrate(
        &self,
        query: &OrderQuery,
        candidates: &[OrderCandidate],
    ) -> Result<Vec<OrderCandidate>, String> {
        let total = u32::try_from(candidates.len())
            .map_err(|_| format!("too many orders to rank: {}", candidates.len()))?;
        let quota = orders_to_ship(query.threshold, total) as usize;

        let mut ranked: Vec<(usize, &OrderCandidate)> = candidates.iter().enumerate().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            compare_scores(a.quality_score, b.quality_score, true).then_with(|| a.id.cmp(&b.id))
        });

        let mut hydrated = vec![OrderCandidate::default(); candidates.len()];
        for (rank, (original_idx, _)) in ranked.into_iter().enumerate() {
            hydrated[original_idx].decision = if rank < quota {
                ShipDecision::Ship
            } else {
                ShipDecision::Flagged
            };
        }
        Ok(hydrated)
    }

    fn update(&self, candidate: &mut OrderCandidate, hydrated: OrderCandidate) {
        candidate.decision = hydrated.decision;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackscore_sim::Threshold;

    fn order(id: &str, quality: f64) -> OrderCandidate {
        OrderCandidate {
            id: id.into(),
            quality_score: quality,
            ..OrderCandidate::default()
        }
    }

    #[tokio::test]
    async fn ships_the_highest_quality_orders() {
        let candidates = vec![order("a", 20.0), order("b", 90.0), order("c", 55.0), order("d", 70.0)];
        let query = OrderQuery::new("ship-1", Threshold::new(50));
        let hydrated = ShipDecisionHydrator.hydrate(&query, &candidates).await.unwrap();
        let decisions: Vec<ShipDecision> = hydrated.iter().map(|c| c.decision).collect();
        assert_eq!(
            decisions,
            vec![
                ShipDecision::Flagged,
                ShipDecision::Ship,
                ShipDecision::Flagged,
                ShipDecision::Ship
            ]
        );
    }

    #[tokio::test]
    async fn zero_threshold_still_ships_one() {
        let candidates = vec![order("a", 20.0), order("b", 90.0)];
        let query = OrderQuery::new("ship-2", Threshold::MIN);
        let hydrated = ShipDecisionHydrator.hydrate(&query, &candidates).await.unwrap();
        assert_eq!(hydrated[1].decision, ShipDecision::Ship);
        assert_eq!(hydrated[0].decision, ShipDecision::Flagged);
    }

    #[tokio::test]
    async fn ties_split_by_id() {
        let candidates = vec![order("b", 50.0), order("a", 50.0)];
        let query = OrderQuery::new("ship-3", Threshold::new(50));
        let hydrated = ShipDecisionHydrator.hydrate(&query, &candidates).await.unwrap();
        assert_eq!(hydrated[1].decision, ShipDecision::Ship);
        assert_eq!(hydrated[0].decision, ShipDecision::Flagged);
    }

    #[tokio::test]
    async fn unscored_order_never_ships_ahead_of_a_scored_one() {
        let candidates = vec![
            order("A", 10.0),
            order("B", f64::NAN),
            order("C", 90.0),
            order("D", 20.0),
        ];
        let query = OrderQuery::new("ship-4", Threshold::new(50));
        let hydrated = ShipDecisionHydrator.hydrate(&query, &candidates).await.unwrap();
        let decisions: Vec<ShipDecision> = hydrated.iter().map(|c| c.decision).collect();
        assert_eq!(
            decisions,
            vec![
                ShipDecision::Flagged,
                ShipDecision::Flagged,
                ShipDecision::Ship,
                ShipDecision::Ship
            ]
        );
    }
}
