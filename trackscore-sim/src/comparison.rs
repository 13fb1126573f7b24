//! Strategy comparison table.
//!
//! Three hypothetical strategies side by side:
//! - Ship All: fixed figures, independent of the threshold
//! - Scale Business: Ship All ratios at a higher volume and upfront cost
//! - TrackScore: baselines scaled linearly around the anchor threshold
//!
//! Trend arrows and highlights are fixed per row; they encode the intended
//! reading of the table, not a comparison of the numbers.

use serde::{Deserialize, Serialize};

use crate::format::{format_count, format_multiplier, format_percent, format_rupees};
use crate::threshold::Threshold;
use crate::tuning::{ScaleBusinessProfit, StrategyFigures, TrackScoreTuning, TuningConfig};

/// Direction of the trend arrow rendered next to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// One cell of the comparison table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricCell {
    /// Display string (`₹75,000`, `25%`, `1.07x`).
    pub value: String,
    pub raw: f64,
    pub trend: Trend,
    pub highlight: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetricRow {
    pub metric: String,
    pub description: String,
    pub shipping_all: MetricCell,
    pub scaling_business: MetricCell,
    pub shipping_less: MetricCell,
}

#[derive(Clone, Copy)]
enum Unit {
    Count,
    Rupees,
    Percent,
    Multiplier,
}

impl Unit {
    fn render(self, raw: f64) -> String {
        match self {
            Unit::Count => format_count(raw),
            Unit::Rupees => format_rupees(raw),
            Unit::Percent => format_percent(raw),
            Unit::Multiplier => format_multiplier(raw),
        }
    }
}

/// Static presentation of one row: label, unit and per-column styling.
struct RowSpec {
    metric: &'static str,
    description: &'static str,
    unit: Unit,
    pick: fn(&StrategyFigures) -> f64,
    shipping_all: (Trend, bool),
    scaling_business: (Trend, bool),
    shipping_less: (Trend, bool),
}

const ROWS: [RowSpec; 6] = [
    RowSpec {
        metric: "Orders/Day",
        description: "Orders dispatched per day",
        unit: Unit::Count,
        pick: |f| f.orders_per_day,
        shipping_all: (Trend::Neutral, false),
        scaling_business: (Trend::Up, false),
        shipping_less: (Trend::Down, false),
    },
    RowSpec {
        metric: "Net Profit",
        description: "Profit after product, shipping and RTO losses",
        unit: Unit::Rupees,
        pick: |f| f.net_profit,
        shipping_all: (Trend::Down, false),
        scaling_business: (Trend::Up, false),
        shipping_less: (Trend::Up, true),
    },
    RowSpec {
        metric: "Net Profit %",
        description: "Net profit as a share of revenue",
        unit: Unit::Percent,
        pick: |f| f.net_profit_pct,
        shipping_all: (Trend::Down, false),
        scaling_business: (Trend::Down, false),
        shipping_less: (Trend::Up, true),
    },
    RowSpec {
        metric: "Upfront Cost",
        description: "Capital locked in stock and shipping before remittance",
        unit: Unit::Rupees,
        pick: |f| f.upfront_cost,
        shipping_all: (Trend::Up, false),
        scaling_business: (Trend::Up, false),
        shipping_less: (Trend::Down, true),
    },
    RowSpec {
        metric: "Capital Efficiency",
        description: "Net profit returned per rupee of upfront cost",
        unit: Unit::Multiplier,
        pick: |f| f.capital_efficiency,
        shipping_all: (Trend::Down, false),
        scaling_business: (Trend::Down, false),
        shipping_less: (Trend::Up, true),
    },
    RowSpec {
        metric: "RTO Rate",
        description: "Share of shipped orders returned to origin",
        unit: Unit::Percent,
        pick: |f| f.rto_rate,
        shipping_all: (Trend::Up, false),
        scaling_business: (Trend::Up, false),
        shipping_less: (Trend::Down, true),
    },
];

/// TrackScore column figures at `threshold`.
pub fn track_score_figures(threshold: Threshold, tuning: &TrackScoreTuning) -> StrategyFigures {
    let t = threshold.value();
    let anchor = tuning.anchor_threshold;
    StrategyFigures {
        orders_per_day: tuning.orders_per_day.at(t, anchor).round(),
        net_profit: tuning.net_profit.at(t, anchor).round(),
        net_profit_pct: tuning.net_profit_pct.at(t, anchor),
        upfront_cost: tuning.upfront_cost.at(t, anchor).round(),
        capital_efficiency: tuning.capital_efficiency.at(t, anchor),
        rto_rate: tuning.rto_rate.at(t, anchor),
    }
}

/// Scale Business column figures, given the TrackScore column.
pub fn scale_business_figures(track_score: &StrategyFigures, tuning: &TuningConfig) -> StrategyFigures {
    let ship_all = &tuning.ship_all;
    let scale = &tuning.scale_business;
    let net_profit = match scale.profit {
        ScaleBusinessProfit::MatchTrackScore => track_score.net_profit,
        ScaleBusinessProfit::Proportional if ship_all.orders_per_day > 0.0 => {
            (ship_all.net_profit * scale.orders_per_day / ship_all.orders_per_day).round()
        }
        ScaleBusinessProfit::Proportional => ship_all.net_profit,
    };

    StrategyFigures {
        orders_per_day: scale.orders_per_day,
        net_profit,
        net_profit_pct: ship_all.net_profit_pct,
        upfront_cost: scale.upfront_cost,
        capital_efficiency: ship_all.capital_efficiency,
        rto_rate: ship_all.rto_rate,
    }
}

/// Regenerate all six comparison rows for `threshold`.
pub fn compute_comparison(threshold: Threshold, tuning: &TuningConfig) -> Vec<ComparisonMetricRow> {
    let shipping_less = track_score_figures(threshold, &tuning.track_score);
    let scaling_business = scale_business_figures(&shipping_less, tuning);
    let shipping_all = &tuning.ship_all;

    ROWS.iter()
        .map(|row| ComparisonMetricRow {
            metric: row.metric.to_string(),
            description: row.description.to_string(),
            shipping_all: cell(row, shipping_all, row.shipping_all),
            scaling_business: cell(row, &scaling_business, row.scaling_business),
            shipping_less: cell(row, &shipping_less, row.shipping_less),
        })
        .collect()
}

fn cell(row: &RowSpec, figures: &StrategyFigures, style: (Trend, bool)) -> MetricCell {
    let raw = (row.pick)(figures);
    MetricCell {
        value: row.unit.render(raw),
        raw,
        trend: style.0,
        highlight: style.1,
    }
}
