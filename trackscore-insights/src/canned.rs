//! Hand-written answers for the suggested questions on the Ask AI page.

use crate::response::{AiResponse, InsightMetric, ResponseKind};

struct CannedAnswer {
    id: &'static str,
    query: &'static str,
    title: &'static str,
    summary: &'static str,
    metrics: &'static [(&'static str, &'static str, Option<&'static str>)],
    action_items: &'static [&'static str],
}

const CANNED: [CannedAnswer; 4] = [
    CannedAnswer {
        id: "1",
        query: "how can i improve my delivery rate",
        title: "Improve your delivery rate",
        summary: "Most failed deliveries come from low-score COD orders in tier-3 pincodes. \
                  Holding those back and confirming addresses lifts the delivery rate quickly.",
        metrics: &[
            ("Current delivery rate", "56%", None),
            ("Projected delivery rate", "78%", Some("+22 pts")),
            ("Orders held for review", "39", None),
        ],
        action_items: &[
            "Ship only orders scoring above 75",
            "Call COD customers before dispatch for orders scoring 50-75",
            "Offer 5% off for switching to prepaid at checkout",
            "Block repeat RTO pincodes for COD",
        ],
    },
    CannedAnswer {
        id: "2",
        query: "reduce returns for t-shirts",
        title: "Reduce returns for t-shirts",
        summary: "62% of t-shirt returns cite size. Fit guidance and exchange-first \
                  flows convert most of them into kept orders.",
        metrics: &[
            ("T-shirt return rate", "18%", None),
            ("Size-related returns", "62%", None),
            ("Monthly savings", "\u{20b9}42,000", Some("+\u{20b9}42,000")),
        ],
        action_items: &[
            "Add a size chart with body measurements to every t-shirt listing",
            "Show a 'fits small / true / large' badge from past returns",
            "Offer free size exchange instead of refund",
            "Flag COD t-shirt orders with two sizes of the same design",
        ],
    },
    CannedAnswer {
        id: "3",
        query: "which products should i restock",
        title: "Restock recommendations",
        summary: "Three products sell out within a week and have low return rates. \
                  Restock them before slower movers.",
        metrics: &[
            ("Cotton T-Shirt cover", "6 days", Some("-4 days")),
            ("Joggers cover", "9 days", None),
            ("Kurta Set cover", "11 days", None),
        ],
        action_items: &[
            "Reorder 300 Cotton T-Shirts this week",
            "Reorder 120 Joggers before the weekend sale",
            "Pause Denim Jacket reorders until returns settle",
        ],
    },
    CannedAnswer {
        id: "4",
        query: "how to increase my profit margin",
        title: "Increase your profit margin",
        summary: "RTO shipping is the biggest leak. Each returned COD order costs both \
                  legs of shipping plus packaging.",
        metrics: &[
            ("Net profit margin", "25%", Some("+10 pts")),
            ("RTO cost per month", "\u{20b9}38,500", Some("-\u{20b9}21,000")),
            ("Capital efficiency", "1.07x", None),
        ],
        action_items: &[
            "Use TrackScore to skip the riskiest 25% of COD orders",
            "Bundle slow movers with bestsellers",
            "Negotiate courier rates above 500 shipments a month",
            "Move ad spend to pincodes with high delivery rates",
        ],
    },
];

/// Suggested questions, in display order.
pub fn suggested_queries() -> impl Iterator<Item = &'static str> {
    CANNED.iter().map(|c| c.query)
}

/// Exact lookup on a trimmed, lower-cased query.
pub fn lookup(normalized: &str, asked: &str) -> Option<AiResponse> {
    CANNED.iter().find(|c| c.query == normalized).map(|c| AiResponse {
        id: c.id.to_string(),
        kind: ResponseKind::Canned,
        query: asked.to_string(),
        title: c.title.to_string(),
        summary: c.summary.to_string(),
        metrics: c
            .metrics
            .iter()
            .map(|(label, value, change)| InsightMetric::new(*label, *value, change.map(str::to_string)))
            .collect(),
        action_items: c.action_items.iter().map(|a| a.to_string()).collect(),
        plan: None,
        chart: None,
    })
}
