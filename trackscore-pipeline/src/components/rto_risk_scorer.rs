use async_trait::async_trait;

use crate::scorer::Scorer;
use crate::types::{OrderCandidate, OrderQuery, PaymentMode};

/// Scores how much attention an order deserves before dispatch.
///
/// Each signal dimension gets a weight and the score is their product:
/// - quality gap: `100 - quality_score`
/// - payment: COD orders carry the collection risk
/// - value: larger orders lose more on an RTO, on a square-root scale
pub struct RtoRiskScorer {
    pub cod_weight: f64,
    pub prepaid_weight: f64,
    /// Order value (rupees) that scores a value multiplier of 1.0.
    pub reference_amount: f64,
}

impl Default for RtoRiskScorer {
    fn default() -> Self {
        Self {
            cod_weight: 1.4,
            prepaid_weight: 0.6,
            reference_amount: 1_000.0,
        }
    }
}

impl RtoRiskScorer {
    pub fn risk(&self, order: &OrderCandidate) -> f64 {
        let quality_gap = (100.0 - order.quality_score).max(0.0);
        let payment_weight = match order.payment_mode {
            PaymentMode::Cod => self.cod_weight,
            PaymentMode::Prepaid => self.prepaid_weight,
        };
        let value_weight = (order.amount.max(0.0) / self.reference_amount).sqrt();
        quality_gap * payment_weight * value_weight
    }
}

#[async_trait]
impl Scorer<OrderQuery, OrderCandidate> for RtoRiskScorer {
    async fn score(
        &self,
        _query: &OrderQuery,
        candidates: &[OrderCandidate],
    ) -> Result<Vec<OrderCandidate>, String> {
        Ok(candidates
            .iter()
            .map(|c| OrderCandidate {
                priority_score: Some(self.risk(c)),
                ..OrderCandidate::default()
            })
            .collect())
    }

    fn update(&self, candidate: &mut OrderCandidate, scored: OrderCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}
