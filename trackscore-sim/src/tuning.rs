//! Centralized tuning constants for the dashboard derivations.
//!
//! These are demo calibration values, not model outputs. Changing a value
//! here affects BOTH the metric cards (`metrics.rs`) and the strategy
//! comparison table (`comparison.rs`), as well as the chart generators
//! that reuse them.

use serde::{Deserialize, Serialize};

/// Orders placed in the current dashboard window.
pub const TOTAL_ORDERS: u32 = 156;

/// Delivery rate (%) observed before any quality filtering.
pub const PREVIOUS_DELIVERY_RATE: u32 = 56;

/// Thresholds strictly below this value raise the low-threshold warning.
pub const WARNING_THRESHOLD: u8 = 50;

/// Threshold at which every comparison baseline is calibrated.
pub const BASELINE_THRESHOLD: u8 = 75;

/// A baseline value with a linear sensitivity to the threshold.
///
/// The value at threshold `t` is `baseline * (1 + (t - anchor) * coefficient)`,
/// so at the anchor the baseline comes back untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaledMetric {
    pub baseline: f64,
    pub coefficient: f64,
}

impl ScaledMetric {
    pub const fn new(baseline: f64, coefficient: f64) -> Self {
        Self {
            baseline,
            coefficient,
        }
    }

    /// Evaluate the metric at `threshold` relative to `anchor`.
    pub fn at(&self, threshold: u8, anchor: u8) -> f64 {
        let delta = f64::from(threshold) - f64::from(anchor);
        self.baseline * (1.0 + delta * self.coefficient)
    }
}

/// Override document for one `ScaledMetric`; either half may be omitted.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct ScaledMetricOverride {
    baseline: Option<f64>,
    coefficient: Option<f64>,
}

impl ScaledMetricOverride {
    fn apply(self, base: ScaledMetric) -> ScaledMetric {
        ScaledMetric {
            baseline: self.baseline.unwrap_or(base.baseline),
            coefficient: self.coefficient.unwrap_or(base.coefficient),
        }
    }
}

/// Constants behind the metric cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsTuning {
    pub total_orders: u32,
    pub previous_delivery_rate: u32,
    pub warning_threshold: u8,
}

impl Default for MetricsTuning {
    fn default() -> Self {
        Self {
            total_orders: TOTAL_ORDERS,
            previous_delivery_rate: PREVIOUS_DELIVERY_RATE,
            warning_threshold: WARNING_THRESHOLD,
        }
    }
}

/// The six figures every strategy column reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyFigures {
    pub orders_per_day: f64,
    pub net_profit: f64,
    pub net_profit_pct: f64,
    pub upfront_cost: f64,
    pub capital_efficiency: f64,
    pub rto_rate: f64,
}

/// The fixed Ship All column.
pub fn ship_all_defaults() -> StrategyFigures {
    StrategyFigures {
        orders_per_day: f64::from(TOTAL_ORDERS),
        net_profit: 60_000.0,
        net_profit_pct: 15.0,
        upfront_cost: 95_000.0,
        capital_efficiency: 0.63,
        rto_rate: 28.0,
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct StrategyFiguresOverride {
    orders_per_day: Option<f64>,
    net_profit: Option<f64>,
    net_profit_pct: Option<f64>,
    upfront_cost: Option<f64>,
    capital_efficiency: Option<f64>,
    rto_rate: Option<f64>,
}

impl StrategyFiguresOverride {
    fn apply(self, base: StrategyFigures) -> StrategyFigures {
        StrategyFigures {
            orders_per_day: self.orders_per_day.unwrap_or(base.orders_per_day),
            net_profit: self.net_profit.unwrap_or(base.net_profit),
            net_profit_pct: self.net_profit_pct.unwrap_or(base.net_profit_pct),
            upfront_cost: self.upfront_cost.unwrap_or(base.upfront_cost),
            capital_efficiency: self.capital_efficiency.unwrap_or(base.capital_efficiency),
            rto_rate: self.rto_rate.unwrap_or(base.rto_rate),
        }
    }
}

fn deserialize_ship_all<'de, D>(deserializer: D) -> Result<StrategyFigures, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StrategyFiguresOverride::deserialize(deserializer).map(|o| o.apply(ship_all_defaults()))
}

/// Threshold-sensitive baselines for the TrackScore column.
///
/// Overrides merge field by field: `{"net_profit": {"coefficient": -0.005}}`
/// keeps the default net profit baseline and anchor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TrackScoreOverride")]
pub struct TrackScoreTuning {
    pub anchor_threshold: u8,
    pub orders_per_day: ScaledMetric,
    pub net_profit: ScaledMetric,
    pub net_profit_pct: ScaledMetric,
    pub upfront_cost: ScaledMetric,
    pub capital_efficiency: ScaledMetric,
    pub rto_rate: ScaledMetric,
}

impl Default for TrackScoreTuning {
    fn default() -> Self {
        Self {
            anchor_threshold: BASELINE_THRESHOLD,
            // 117 orders at 75 scales to zero at threshold 0.
            orders_per_day: ScaledMetric::new(117.0, 1.0 / 75.0),
            net_profit: ScaledMetric::new(75_000.0, -0.003),
            net_profit_pct: ScaledMetric::new(25.0, -0.004),
            upfront_cost: ScaledMetric::new(70_000.0, 0.004),
            capital_efficiency: ScaledMetric::new(1.07, -0.002),
            rto_rate: ScaledMetric::new(12.0, 0.01),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct TrackScoreOverride {
    anchor_threshold: Option<u8>,
    orders_per_day: ScaledMetricOverride,
    net_profit: ScaledMetricOverride,
    net_profit_pct: ScaledMetricOverride,
    upfront_cost: ScaledMetricOverride,
    capital_efficiency: ScaledMetricOverride,
    rto_rate: ScaledMetricOverride,
}

impl From<TrackScoreOverride> for TrackScoreTuning {
    fn from(o: TrackScoreOverride) -> Self {
        let base = TrackScoreTuning::default();
        Self {
            anchor_threshold: o.anchor_threshold.unwrap_or(base.anchor_threshold),
            orders_per_day: o.orders_per_day.apply(base.orders_per_day),
            net_profit: o.net_profit.apply(base.net_profit),
            net_profit_pct: o.net_profit_pct.apply(base.net_profit_pct),
            upfront_cost: o.upfront_cost.apply(base.upfront_cost),
            capital_efficiency: o.capital_efficiency.apply(base.capital_efficiency),
            rto_rate: o.rto_rate.apply(base.rto_rate),
        }
    }
}

/// How the Scale Business column arrives at its net profit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleBusinessProfit {
    /// Copy the TrackScore profit so the column always looks competitive.
    #[default]
    MatchTrackScore,
    /// Scale the Ship All profit by the ratio of order volumes.
    Proportional,
}

/// Fixed volume and cost for the Scale Business column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleBusinessTuning {
    pub orders_per_day: f64,
    pub upfront_cost: f64,
    pub profit: ScaleBusinessProfit,
}

impl Default for ScaleBusinessTuning {
    fn default() -> Self {
        Self {
            orders_per_day: 220.0,
            upfront_cost: 135_000.0,
            profit: ScaleBusinessProfit::MatchTrackScore,
        }
    }
}

/// Every tunable the dashboard reads, in one place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub metrics: MetricsTuning,
    pub track_score: TrackScoreTuning,
    #[serde(deserialize_with = "deserialize_ship_all")]
    pub ship_all: StrategyFigures,
    pub scale_business: ScaleBusinessTuning,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            metrics: MetricsTuning::default(),
            track_score: TrackScoreTuning::default(),
            ship_all: ship_all_defaults(),
            scale_business: ScaleBusinessTuning::default(),
        }
    }
}

impl TuningConfig {
    /// Parse a tuning override document. Missing sections keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid tuning config: {}", e))
    }

    /// Load a tuning override document from disk.
    pub fn load_file(path: &str) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
        Self::from_json(&raw)
    }
}
