use serde::Serialize;

use crate::comparison::{compute_comparison, ComparisonMetricRow};
use crate::metrics::{compute_metrics, DashboardMetrics};
use crate::threshold::Threshold;
use crate::tuning::TuningConfig;

/// State behind the main dashboard page.
///
/// Moving the slider recomputes both derived objects wholesale; nothing is
/// updated incrementally and nothing outlives the next recompute.
pub struct DashboardState {
    tuning: TuningConfig,
    threshold: Threshold,
    metrics: DashboardMetrics,
    comparison: Vec<ComparisonMetricRow>,
}

/// Serializable view of the dashboard at one threshold.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSnapshot {
    pub threshold: Threshold,
    pub metrics: DashboardMetrics,
    pub comparison: Vec<ComparisonMetricRow>,
}

impl DashboardState {
    pub fn new(tuning: TuningConfig) -> Self {
        Self::with_threshold(tuning, Threshold::default())
    }

    pub fn with_threshold(tuning: TuningConfig, threshold: Threshold) -> Self {
        let metrics = compute_metrics(threshold, &tuning.metrics);
        let comparison = compute_comparison(threshold, &tuning);
        Self {
            tuning,
            threshold,
            metrics,
            comparison,
        }
    }

    /// Apply a slider move. Returns whether anything was recomputed.
    pub fn set_threshold(&mut self, threshold: Threshold) -> bool {
        if threshold == self.threshold {
            return false;
        }
        self.threshold = threshold;
        self.metrics = compute_metrics(threshold, &self.tuning.metrics);
        self.comparison = compute_comparison(threshold, &self.tuning);
        true
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }

    pub fn comparison(&self) -> &[ComparisonMetricRow] {
        &self.comparison
    }

    pub fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            threshold: self.threshold,
            metrics: self.metrics.clone(),
            comparison: self.comparison.clone(),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(TuningConfig::default())
    }
}
