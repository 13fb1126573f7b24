use async_trait::async_trait;

use crate::hydrator::Hydrator;
use crate::types::{OrderCandidate, OrderQuery, RiskBand};

/// Buckets each order's quality score into a risk band for the table badge.
pub struct RiskBandHydrator {
    /// Scores at or above this are low risk.
    pub low_risk_from: f64,
    /// Scores at or above this (and below `low_risk_from`) are medium risk.
    pub medium_risk_from: f64,
}

impl Default for RiskBandHydrator {
    fn default() -> Self {
        Self {
            low_risk_from: 70.0,
            medium_risk_from: 40.0,
        }
    }
}

impl RiskBandHydrator {
    pub fn band(&self, quality_score: f64) -> RiskBand {
        if quality_score >= self.low_risk_from {
            RiskBand::Low
        } else if quality_score >= self.medium_risk_from {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }
}

#[async_trait]
impl Hydrator<OrderQuery, OrderCandidate> for RiskBandHydrator {
    async fn hydrate(
        &self,
        _query: &OrderQuery,
        candidates: &[OrderCandidate],
    ) -> Result<Vec<OrderCandidate>, String> {
        Ok(candidates
            .iter()
            .map(|c| OrderCandidate {
                risk_band: Some(self.band(c.quality_score)),
                ..OrderCandidate::default()
            })
            .collect())
    }

    fn update(&self, candidate: &mut OrderCandidate, hydrated: OrderCandidate) {
        candidate.risk_band = hydrated.risk_band;
    }
}
