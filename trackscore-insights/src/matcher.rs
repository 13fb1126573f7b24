//! Ask AI answer matching.
//!
//! A query first tries the canned answers (trimmed, lower-cased exact
//! match). Anything else is classified by keyword into a plan, a graph or a
//! generic answer, and the template numbers are drawn from the caller's RNG.

use rand::Rng;
use trackscore_sim::format::{format_count, format_rupees};
use trackscore_sim::{ChartPoint, ChartSeries};

use crate::canned;
use crate::error::{InsightError, InsightResult};
use crate::playground::PlanStep;
use crate::response::{AiResponse, ImplementationPlan, InsightMetric, ResponseKind};

const PLAN_KEYWORDS: [&str; 5] = ["implementation", "lakh", "plan", "roadmap", "step"];
const GRAPH_KEYWORDS: [&str; 4] = ["graph", "vs", "chart", "trend"];
const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ImplementationPlan,
    Graph,
    Generic,
}

/// Trimmed and lower-cased; the form both lookup and classification use.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Keyword classification. Plan keywords win over graph keywords.
pub fn classify(normalized: &str) -> Intent {
    if PLAN_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        Intent::ImplementationPlan
    } else if GRAPH_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        Intent::Graph
    } else {
        Intent::Generic
    }
}

/// Answer `query`. Blank input is rejected before anything else.
pub fn respond<R: Rng + ?Sized>(query: &str, rng: &mut R) -> InsightResult<AiResponse> {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return Err(InsightError::EmptyQuery);
    }
    let asked = query.trim();

    if let Some(answer) = canned::lookup(&normalized, asked) {
        return Ok(answer);
    }

    let answer = match classify(&normalized) {
        Intent::ImplementationPlan => plan_response(asked, rng),
        Intent::Graph => graph_response(asked, rng),
        Intent::Generic => generic_response(asked, rng),
    };
    Ok(answer)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn plan_response<R: Rng + ?Sized>(asked: &str, rng: &mut R) -> AiResponse {
    let months = rng.gen_range(3..=6);
    let threshold = rng.gen_range(65..=80);
    let prepaid_shift = rng.gen_range(10..=25);
    let courier_rate = rng.gen_range(40..=55);
    let restock_skus = rng.gen_range(5..=12);
    let orders_per_day = rng.gen_range(150..=300u32);
    let monthly_profit = f64::from(rng.gen_range(80..=150u32)) * 1_000.0;

    let steps = vec![
        PlanStep::new(
            format!("Turn on TrackScore at {}", threshold),
            "Operations",
            format!("Ship orders scoring {} and above, review the rest", threshold),
        ),
        PlanStep::new(
            format!("Move {}% of COD buyers to prepaid", prepaid_shift),
            "Payments",
            "Offer a checkout discount and UPI cashback",
        ),
        PlanStep::new(
            "Renegotiate courier rates",
            "Logistics",
            format!("Target \u{20b9}{} per forward shipment", courier_rate),
        ),
        PlanStep::new(
            format!("Restock the top {} SKUs", restock_skus),
            "Inventory",
            "Keep two weeks of cover on bestsellers",
        ),
        PlanStep::new(
            "Review the weekly RTO report",
            "Analytics",
            "Block pincodes with repeat returns",
        ),
    ];
    let action_items = steps.iter().map(|s| s.title.clone()).collect();

    AiResponse {
        id: format!("plan-{}", rng.gen_range(1_000..10_000)),
        kind: ResponseKind::ImplementationPlan,
        query: asked.to_string(),
        title: "Your implementation plan".to_string(),
        summary: format!("A {}-month plan to get there, one step at a time.", months),
        metrics: vec![
            InsightMetric::new("Target orders/day", format_count(f64::from(orders_per_day)), None),
            InsightMetric::new("Projected monthly profit", format_rupees(monthly_profit), None),
            InsightMetric::new("Timeframe", format!("{} months", months), None),
        ],
        action_items,
        plan: Some(ImplementationPlan {
            goal: capitalize(asked),
            timeframe: format!("{} months", months),
            steps,
        }),
        chart: None,
    }
}

fn graph_response<R: Rng + ?Sized>(asked: &str, rng: &mut R) -> AiResponse {
    let mut current = f64::from(rng.gen_range(40..=60u32)) * 1_000.0;
    let mut projected = current;
    let points: Vec<ChartPoint> = MONTHS
        .iter()
        .map(|month| {
            current *= 1.0 + rng.gen_range(-0.03..0.05);
            projected *= 1.0 + rng.gen_range(0.06..0.12);
            ChartPoint {
                label: month.to_string(),
                series_a: current.round(),
                series_b: projected.round(),
            }
        })
        .collect();

    let (first, last) = match (points.first(), points.last()) {
        (Some(f), Some(l)) => (f.series_b, l.series_b),
        _ => (0.0, 0.0),
    };
    let growth = if first > 0.0 { (last / first - 1.0) * 100.0 } else { 0.0 };
    let gap = points.last().map(|p| p.series_b - p.series_a).unwrap_or(0.0);

    AiResponse {
        id: format!("graph-{}", rng.gen_range(1_000..10_000)),
        kind: ResponseKind::Graph,
        query: asked.to_string(),
        title: "Profit trend: current vs with TrackScore".to_string(),
        summary: "Monthly net profit over the next six months.".to_string(),
        metrics: vec![
            InsightMetric::new("Projected growth", format!("{:.0}%", growth), None),
            InsightMetric::new("Extra profit by June", format_rupees(gap), None),
            InsightMetric::new("Months shown", MONTHS.len().to_string(), None),
        ],
        action_items: vec![
            "Keep the threshold near 75 while volumes grow".to_string(),
            "Re-check the trend after each sale event".to_string(),
            "Compare against Ship All on the dashboard".to_string(),
        ],
        plan: None,
        chart: Some(ChartSeries::new(
            "Monthly Net Profit",
            "Current",
            "With TrackScore",
            points,
        )),
    }
}

fn generic_response<R: Rng + ?Sized>(asked: &str, rng: &mut R) -> AiResponse {
    let delivery_lift = rng.gen_range(8..=20);
    let rto_cut = rng.gen_range(15..=35);
    let profit_gain = f64::from(rng.gen_range(20..=60u32)) * 1_000.0;

    AiResponse {
        id: format!("generic-{}", rng.gen_range(1_000..10_000)),
        kind: ResponseKind::Generic,
        query: asked.to_string(),
        title: "Here is what your order data suggests".to_string(),
        summary: "Filtering risky COD orders and nudging buyers to prepaid moves \
                  most of the numbers sellers ask about."
            .to_string(),
        metrics: vec![
            InsightMetric::new("Delivery rate", format!("+{}%", delivery_lift), Some("up".into())),
            InsightMetric::new("RTO rate", format!("-{}%", rto_cut), Some("down".into())),
            InsightMetric::new("Monthly profit", format!("+{}", format_rupees(profit_gain)), Some("up".into())),
        ],
        action_items: vec![
            "Ship only orders above your TrackScore threshold".to_string(),
            "Confirm COD orders by phone before dispatch".to_string(),
            "Offer prepaid discounts at checkout".to_string(),
            "Restock fast movers before sale weeks".to_string(),
            "Review flagged orders every morning".to_string(),
        ],
        plan: None,
        chart: None,
    }
}
