//! Metric cards derived from the quality threshold.
//!
//! The threshold decides what share of the window's orders get shipped:
//! - orders to ship: `max(1, round(t/100 * total))`, or exactly 1 at `t = 0`
//! - flagged orders: everything not shipped
//! - delivery rate: interpolates from 100% (ship almost nothing) down to the
//!   pre-filtering rate (ship everything)

use serde::{Deserialize, Serialize};

use crate::threshold::Threshold;
use crate::tuning::MetricsTuning;

/// Values behind the dashboard metric cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_orders: u32,
    pub flagged_orders: u32,
    pub orders_to_ship: u32,
    pub delivery_rate: u32,
    pub previous_delivery_rate: u32,
    /// Raised when the threshold is low enough to starve order volume.
    pub show_warning: bool,
}

/// Recompute every metric card for `threshold`.
pub fn compute_metrics(threshold: Threshold, tuning: &MetricsTuning) -> DashboardMetrics {
    let total = tuning.total_orders;
    let to_ship = orders_to_ship(threshold, total);

    DashboardMetrics {
        total_orders: total,
        flagged_orders: total - to_ship,
        orders_to_ship: to_ship,
        delivery_rate: delivery_rate(threshold, tuning.previous_delivery_rate),
        previous_delivery_rate: tuning.previous_delivery_rate,
        show_warning: show_warning(threshold, tuning.warning_threshold),
    }
}

/// Number of orders that pass the threshold out of `total`.
///
/// Never exceeds `total`; an empty window ships nothing.
pub fn orders_to_ship(threshold: Threshold, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    if threshold.value() == 0 {
        return 1;
    }
    let shipped = (threshold.fraction() * f64::from(total)).round() as u32;
    shipped.clamp(1, total)
}

/// Projected delivery rate (%) when shipping at `threshold`.
pub fn delivery_rate(threshold: Threshold, previous_delivery_rate: u32) -> u32 {
    if threshold.value() == 0 {
        return 100;
    }
    let previous = f64::from(previous_delivery_rate.min(100));
    let headroom = 100.0 - previous;
    let rejected_share = f64::from(100 - threshold.value()) / 100.0;
    (previous + rejected_share * headroom).round() as u32
}

pub fn show_warning(threshold: Threshold, warning_threshold: u8) -> bool {
    threshold.value() < warning_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_at(t: i64) -> DashboardMetrics {
        compute_metrics(Threshold::new(t), &MetricsTuning::default())
    }

    #[test]
    fn zero_threshold_ships_one_order_at_full_delivery() {
        let m = metrics_at(0);
        assert_eq!(m.orders_to_ship, 1);
        assert_eq!(m.flagged_orders, 155);
        assert_eq!(m.delivery_rate, 100);
    }

    #[test]
    fn full_threshold_ships_everything_at_previous_rate() {
        let m = metrics_at(100);
        assert_eq!(m.orders_to_ship, 156);
        assert_eq!(m.flagged_orders, 0);
        assert_eq!(m.delivery_rate, m.previous_delivery_rate);
        assert_eq!(m.delivery_rate, 56);
    }

    #[test]
    fn baseline_threshold_values() {
        let m = metrics_at(75);
        // round(0.75 * 156) = 117, round(56 + 0.25 * 44) = 67
        assert_eq!(m.orders_to_ship, 117);
        assert_eq!(m.flagged_orders, 39);
        assert_eq!(m.delivery_rate, 67);
        assert!(!m.show_warning);
    }

    #[test]
    fn small_threshold_still_ships_at_least_one() {
        let m = metrics_at(1);
        // round(0.01 * 156) = 2
        assert_eq!(m.orders_to_ship, 2);
        assert_eq!(orders_to_ship(Threshold::new(1), 20), 1);
    }

    #[test]
    fn empty_window_ships_nothing() {
        assert_eq!(orders_to_ship(Threshold::new(0), 0), 0);
        assert_eq!(orders_to_ship(Threshold::new(80), 0), 0);
    }

    #[test]
    fn warning_boundary() {
        assert!(metrics_at(0).show_warning);
        assert!(metrics_at(49).show_warning);
        assert!(!metrics_at(50).show_warning);
        assert!(!metrics_at(100).show_warning);
    }
}
