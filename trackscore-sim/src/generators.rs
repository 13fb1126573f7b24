//! Synthetic chart series.
//!
//! Every generator is a closed-form curve plus optional noise drawn from the
//! caller's RNG, so a seeded `StdRng` reproduces a chart exactly. None of
//! this is a statistical model; it only has to look plausible on a chart.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::comparison::track_score_figures;
use crate::metrics::orders_to_ship;
use crate::threshold::Threshold;
use crate::tuning::TuningConfig;

/// Days in the cashflow and inventory windows.
pub const WINDOW_DAYS: u32 = 30;
/// Average selling price per order, in rupees.
const AVG_ORDER_VALUE: f64 = 600.0;
/// Product plus forward shipping cost per order, in rupees.
const COST_PER_ORDER: f64 = 350.0;
/// Share of COD collections that actually arrive.
const DELIVERED_SHARE: f64 = 0.7;
/// Remittances arrive twice a week and cover the days since the last one.
const DAYS_PER_REMITTANCE: f64 = 3.5;
/// Bounds for the orders-per-day goal slider.
pub const MIN_ORDERS_PER_DAY: u32 = 10;
pub const MAX_ORDERS_PER_DAY: u32 = 1_000;

/// One x-axis position with two series values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub series_a: f64,
    pub series_b: f64,
}

/// A two-series chart ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub series_a_name: String,
    pub series_b_name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(title: &str, series_a_name: &str, series_b_name: &str, points: Vec<ChartPoint>) -> Self {
        Self {
            title: title.to_string(),
            series_a_name: series_a_name.to_string(),
            series_b_name: series_b_name.to_string(),
            points,
        }
    }
}

/// RNG for production callers: fresh entropy unless a seed is pinned.
pub fn chart_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Unnormalized Gaussian bell: 1.0 at the mean.
pub fn gaussian(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return if x == mean { 1.0 } else { 0.0 };
    }
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp()
}

/// COD remittance days fall twice a week.
pub fn is_remittance_day(day: i64) -> bool {
    (day - 2) % 7 == 0 || (day - 5) % 7 == 0
}

fn noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-amplitude..=amplitude)
}

/// Daily cash in (remittances) against cash out (stock and shipping) for
/// an orders-per-day goal.
pub fn cashflow<R: Rng + ?Sized>(orders_per_day: u32, rng: &mut R) -> ChartSeries {
    let orders = f64::from(orders_per_day.clamp(MIN_ORDERS_PER_DAY, MAX_ORDERS_PER_DAY));
    let remittance = orders * AVG_ORDER_VALUE * DELIVERED_SHARE * DAYS_PER_REMITTANCE;

    let points = (1..=WINDOW_DAYS)
        .map(|day| {
            let ramp = 1.0 + f64::from(day) * 0.01;
            let outflow = orders * COST_PER_ORDER * ramp * (1.0 + noise(rng, 0.1));
            let inflow = if is_remittance_day(i64::from(day)) {
                remittance * (1.0 + noise(rng, 0.05))
            } else {
                0.0
            };
            ChartPoint {
                label: format!("Day {}", day),
                series_a: inflow.round(),
                series_b: outflow.round(),
            }
        })
        .collect();

    ChartSeries::new("Cashflow", "Remittance", "Spend", points)
}

/// Inputs for the inventory forecast chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryForecastInput {
    pub current_stock: f64,
    pub daily_sell_through: f64,
    pub peak_demand: f64,
    pub peak_day: f64,
}

impl Default for InventoryForecastInput {
    fn default() -> Self {
        Self {
            current_stock: 1_200.0,
            daily_sell_through: 35.0,
            peak_demand: 80.0,
            peak_day: 15.0,
        }
    }
}

/// Projected stock on hand against a demand bump over the window.
pub fn inventory_forecast<R: Rng + ?Sized>(input: &InventoryForecastInput, rng: &mut R) -> ChartSeries {
    let points = (1..=WINDOW_DAYS)
        .map(|day| {
            let d = f64::from(day);
            let stock = (input.current_stock - input.daily_sell_through * d).max(0.0);
            let demand = input.peak_demand * gaussian(d, input.peak_day, 5.0)
                + input.daily_sell_through * 0.5
                + noise(rng, 3.0);
            ChartPoint {
                label: format!("Day {}", day),
                series_a: stock.round(),
                series_b: demand.max(0.0).round(),
            }
        })
        .collect();

    ChartSeries::new("Inventory Forecast", "Stock", "Demand", points)
}

/// Quality score distribution split into shipped and flagged orders.
///
/// Orders are bucketed by score in steps of 5 along a bell curve; the
/// highest buckets absorb the ship quota first, matching how the ship
/// decision ranks orders.
pub fn delivery_distribution(threshold: Threshold, total_orders: u32) -> ChartSeries {
    let scores: Vec<u32> = (0..=100).step_by(5).collect();
    let weights: Vec<f64> = scores
        .iter()
        .map(|&s| gaussian(f64::from(s), 62.0, 18.0))
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let mut remaining = f64::from(orders_to_ship(threshold, total_orders));
    let mut points: Vec<ChartPoint> = scores
        .iter()
        .zip(weights.iter())
        .rev()
        .map(|(&score, &w)| {
            let count = f64::from(total_orders) * w / weight_sum;
            let shipped = count.min(remaining);
            remaining -= shipped;
            ChartPoint {
                label: score.to_string(),
                series_a: shipped,
                series_b: count - shipped,
            }
        })
        .collect();
    points.reverse();

    ChartSeries::new("Order Quality Distribution", "Shipped", "Flagged", points)
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Promoter and detractor shares (%) over twelve months.
pub fn nps_trend<R: Rng + ?Sized>(rng: &mut R) -> ChartSeries {
    let points = MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let m = i as f64;
            let promoters = (38.0 + 1.5 * m + noise(rng, 2.0)).clamp(0.0, 100.0);
            let detractors = (30.0 - 1.0 * m + noise(rng, 2.0)).clamp(0.0, 100.0);
            ChartPoint {
                label: month.to_string(),
                series_a: (promoters * 10.0).round() / 10.0,
                series_b: (detractors * 10.0).round() / 10.0,
            }
        })
        .collect();

    ChartSeries::new("Net Promoter Score", "Promoters", "Detractors", points)
}

/// Orders shipped and TrackScore profit across the threshold range.
pub fn profit_vs_orders(tuning: &TuningConfig) -> ChartSeries {
    let points = (0..=100)
        .step_by(5)
        .map(|t| {
            let threshold = Threshold::new(t);
            let shipped = orders_to_ship(threshold, tuning.metrics.total_orders);
            let figures = track_score_figures(threshold, &tuning.track_score);
            ChartPoint {
                label: threshold.to_string(),
                series_a: f64::from(shipped),
                series_b: figures.net_profit,
            }
        })
        .collect();

    ChartSeries::new("Profit vs Orders", "Orders Shipped", "Net Profit", points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remittance_days_twice_a_week() {
        let days: Vec<i64> = (1..=30).filter(|&d| is_remittance_day(d)).collect();
        assert_eq!(days, vec![2, 5, 9, 12, 16, 19, 23, 26, 30]);
    }

    #[test]
    fn cashflow_only_remits_on_remittance_days() {
        let mut rng = StdRng::seed_from_u64(7);
        let chart = cashflow(100, &mut rng);
        assert_eq!(chart.points.len(), WINDOW_DAYS as usize);
        for (i, p) in chart.points.iter().enumerate() {
            let day = i as i64 + 1;
            assert_eq!(p.series_a > 0.0, is_remittance_day(day), "day {}", day);
            assert!(p.series_b > 0.0);
        }
    }

    #[test]
    fn cashflow_is_reproducible_with_seed() {
        let a = cashflow(250, &mut StdRng::seed_from_u64(42));
        let b = cashflow(250, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn cashflow_clamps_orders_goal() {
        let low = cashflow(0, &mut StdRng::seed_from_u64(1));
        let floor = cashflow(MIN_ORDERS_PER_DAY, &mut StdRng::seed_from_u64(1));
        assert_eq!(low, floor);
    }

    #[test]
    fn gaussian_peaks_at_mean() {
        assert_eq!(gaussian(62.0, 62.0, 18.0), 1.0);
        assert!(gaussian(20.0, 62.0, 18.0) < gaussian(50.0, 62.0, 18.0));
        assert_eq!(gaussian(3.0, 3.0, 0.0), 1.0);
    }

    #[test]
    fn inventory_stock_never_negative() {
        let input = InventoryForecastInput {
            current_stock: 100.0,
            ..InventoryForecastInput::default()
        };
        let chart = inventory_forecast(&input, &mut StdRng::seed_from_u64(3));
        assert!(chart.points.iter().all(|p| p.series_a >= 0.0 && p.series_b >= 0.0));
        assert_eq!(chart.points.last().unwrap().series_a, 0.0);
    }

    #[test]
    fn distribution_ships_exactly_the_quota() {
        let chart = delivery_distribution(Threshold::new(75), 156);
        let shipped: f64 = chart.points.iter().map(|p| p.series_a).sum();
        let flagged: f64 = chart.points.iter().map(|p| p.series_b).sum();
        assert!((shipped - 117.0).abs() < 1e-6);
        assert!((shipped + flagged - 156.0).abs() < 1e-6);
        // Lowest bucket is flagged first.
        assert_eq!(chart.points[0].series_a, 0.0);
    }

    #[test]
    fn nps_has_twelve_months() {
        let chart = nps_trend(&mut StdRng::seed_from_u64(9));
        assert_eq!(chart.points.len(), 12);
        assert_eq!(chart.points[0].label, "Jan");
    }

    #[test]
    fn profit_curve_hits_baseline() {
        let chart = profit_vs_orders(&TuningConfig::default());
        assert_eq!(chart.points.len(), 21);
        let baseline = chart.points.iter().find(|p| p.label == "75").unwrap();
        assert_eq!(baseline.series_a, 117.0);
        assert_eq!(baseline.series_b, 75_000.0);
    }
}
