use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use trackscore_pipeline::candidate_pipeline::CandidatePipeline;
use trackscore_pipeline::components::decision_filter::DecisionFilter;
use trackscore_pipeline::components::mock_order_source::{MockOrderSource, DEFAULT_ORDER_COUNT};
use trackscore_pipeline::components::rto_risk_scorer::RtoRiskScorer;
use trackscore_pipeline::components::search_filter::SearchFilter;
use trackscore_pipeline::components::sort_selector::SortSelector;
use trackscore_pipeline::filter::{Filter, FilterResult};
use trackscore_pipeline::hydrator::Hydrator;
use trackscore_pipeline::order_loader::load_orders;
use trackscore_pipeline::pipelines::order_triage::{OrderTriagePipeline, TriageSummary};
use trackscore_pipeline::query_hydrator::QueryHydrator;
use trackscore_pipeline::scorer::Scorer;
use trackscore_pipeline::selector::Selector;
use trackscore_pipeline::side_effect::{SideEffect, SideEffectInput};
use trackscore_pipeline::source::Source;
use trackscore_pipeline::types::*;
use trackscore_sim::Threshold;

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

const ORDERS_CSV: &str = "\
id,customer,city,pincode,product,amount,payment_mode,quality_score,placed_at
TS-2001,Asha Verma,Pune,411001,Cotton T-Shirt,499,COD,82,2025-01-15T09:00:00Z
TS-2002,Rohan Das,Kolkata,700019,Denim Jacket,1899,UPI,64.5,2025-01-15T08:51:00Z
TS-2003,Meera Nair,Kochi,682011,Kurta Set,1299,COD,31,2025-01-15T08:42:00Z
TS-2004,Imran Shaikh,Pune,411014,Oversized T-Shirt,699,Prepaid,91,2025-01-15T08:33:00Z
TS-2005,Priya Iyer,Jaipur,302001,Joggers,899,COD,47,2025-01-15T08:24:00Z
TS-2006,Karan Malhotra,Lucknow,226001,Graphic Hoodie,1499,COD,12,2025-01-15T08:15:00Z
TS-2007,Sneha Kulkarni,Indore,452001,Cotton T-Shirt,998,Card,73,2025-01-15T08:06:00Z
TS-2008,Arjun Reddy,Bengaluru,560034,Denim Jacket,1899,COD,58,2025-01-15T07:57:00Z
";

fn sample_orders() -> Vec<OrderCandidate> {
    load_orders(ORDERS_CSV.as_bytes()).unwrap()
}

fn query(request_id: &str, threshold: u8) -> OrderQuery {
    OrderQuery::new(request_id, Threshold::new(threshold as i64))
}

// ---------------------------------------------------------------------------
// Filter tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_filter_matches_any_column() {
    let mut q = query("search-1", 75);
    q.search = Some("pune".into());
    let FilterResult { kept, removed } = SearchFilter.filter(&q, sample_orders()).await.unwrap();
    let ids: Vec<&str> = kept.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["TS-2001", "TS-2004"]);
    assert_eq!(removed.len(), 6);

    q.search = Some("t-shirt".into());
    let FilterResult { kept, .. } = SearchFilter.filter(&q, sample_orders()).await.unwrap();
    assert_eq!(kept.len(), 3);
}

#[test]
fn search_filter_disabled_for_blank_search() {
    let mut q = query("search-2", 75);
    assert!(!SearchFilter.enable(&q));
    q.search = Some("   ".into());
    assert!(!SearchFilter.enable(&q));
}

#[tokio::test]
async fn decision_filter_keeps_requested_tab() {
    let mut orders = sample_orders();
    orders[0].decision = ShipDecision::Ship;
    orders[1].decision = ShipDecision::Flagged;
    let mut q = query("view-1", 75);
    q.view = OrderView::Flagged;
    let FilterResult { kept, removed } = DecisionFilter.filter(&q, orders).await.unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "TS-2002");
    assert_eq!(removed.len(), 7);
}

// ---------------------------------------------------------------------------
// Scorer and selector tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rto_risk_scorer_ranks_risky_cod_orders_first() {
    let orders = sample_orders();
    let scored = RtoRiskScorer::default()
        .score(&query("score-1", 75), &orders)
        .await
        .unwrap();
    // TS-2006: COD, score 12, ₹1,499. TS-2004: prepaid, score 91.
    let risky = scored[5].priority_score.unwrap();
    let safe = scored[3].priority_score.unwrap();
    assert!(risky > safe, "{} should exceed {}", risky, safe);
    assert!(scored.iter().all(|o| o.priority_score.is_some()));
}

#[test]
fn sort_selector_sorts_by_column_and_direction() {
    let mut q = query("sort-1", 75);
    q.sort = SortKey::Amount;
    q.direction = SortDirection::Ascending;
    q.page_size = Some(3);
    let selected = SortSelector.select(&q, sample_orders());
    let ids: Vec<&str> = selected.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["TS-2001", "TS-2004", "TS-2005"]);

    q.sort = SortKey::QualityScore;
    q.direction = SortDirection::Descending;
    q.page_size = None;
    let selected = SortSelector.select(&q, sample_orders());
    assert_eq!(selected.len(), 8);
    assert_eq!(selected[0].id, "TS-2004");
    assert_eq!(selected[7].id, "TS-2006");
}

#[test]
fn sort_selector_puts_unscored_orders_last() {
    let mut orders = sample_orders();
    for (i, o) in orders.iter_mut().enumerate() {
        o.priority_score = if i == 0 { None } else { Some(i as f64) };
    }
    let q = query("sort-2", 75);
    let selected = SortSelector.select(&q, orders);
    assert_eq!(selected[0].id, "TS-2008");
    assert_eq!(selected[7].id, "TS-2001");
}

// ---------------------------------------------------------------------------
// Full pipeline integration tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn default_window_ships_the_dashboard_count() {
    let pipeline = OrderTriagePipeline::with_mock_orders(DEFAULT_ORDER_COUNT, 42);
    let result = pipeline.execute(query("e2e-1", 75)).await;

    assert_eq!(result.retrieved_candidates.len(), 156);
    let summary = TriageSummary::from_orders(&result.retrieved_candidates);
    assert_eq!(summary.ship, 117);
    assert_eq!(summary.flagged, 39);

    // Default page size and priority ordering.
    assert_eq!(result.selected_candidates.len(), 20);
    let scores: Vec<f64> = result
        .selected_candidates
        .iter()
        .map(|c| c.priority_score.unwrap())
        .collect();
    for w in scores.windows(2) {
        assert!(w[0] >= w[1], "priority should be descending: {} < {}", w[0], w[1]);
    }
    assert!(result
        .selected_candidates
        .iter()
        .all(|c| c.risk_band.is_some()));
}

#[tokio::test]
async fn raising_the_threshold_ships_more() {
    let pipeline = OrderTriagePipeline::with_mock_orders(DEFAULT_ORDER_COUNT, 7);
    let low = pipeline.execute(query("e2e-2a", 30)).await;
    let high = pipeline.execute(query("e2e-2b", 90)).await;
    let low = TriageSummary::from_orders(&low.retrieved_candidates);
    let high = TriageSummary::from_orders(&high.retrieved_candidates);
    assert!(high.ship > low.ship);
    assert_eq!(low.ship + low.flagged, 156);
}

#[tokio::test]
async fn shipped_orders_outscore_flagged_orders() {
    let pipeline = OrderTriagePipeline::with_orders(sample_orders());
    let result = pipeline.execute(query("e2e-3", 50)).await;
    let min_ship = result
        .retrieved_candidates
        .iter()
        .filter(|o| o.decision == ShipDecision::Ship)
        .map(|o| o.quality_score)
        .fold(f64::INFINITY, f64::min);
    let max_flagged = result
        .retrieved_candidates
        .iter()
        .filter(|o| o.decision == ShipDecision::Flagged)
        .map(|o| o.quality_score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(min_ship >= max_flagged);
    assert_eq!(TriageSummary::from_orders(&result.retrieved_candidates).ship, 4);
}

#[tokio::test]
async fn filters_compose_and_report_removed_rows() {
    let pipeline = OrderTriagePipeline::with_orders(sample_orders());
    let mut q = query("e2e-4", 50);
    q.view = OrderView::Ship;
    q.payment_mode = Some(PaymentMode::Cod);
    let result = pipeline.execute(q).await;

    // Ship set at 50%: TS-2004, TS-2001, TS-2007, TS-2002. Only TS-2001 is COD.
    let ids: Vec<&str> = result
        .selected_candidates
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, vec!["TS-2001"]);
    assert_eq!(
        result.selected_candidates.len() + result.filtered_candidates.len(),
        result.retrieved_candidates.len()
    );
}

#[tokio::test]
async fn search_is_trimmed_and_case_insensitive() {
    let pipeline = OrderTriagePipeline::with_orders(sample_orders());
    let mut q = query("e2e-5", 75);
    q.search = Some("  DENIM ".into());
    let result = pipeline.execute(q).await;
    assert_eq!(result.selected_candidates.len(), 2);
    assert_eq!(result.query.search.as_deref(), Some("denim"));
}

#[tokio::test]
async fn empty_window_returns_nothing() {
    let pipeline = OrderTriagePipeline::with_orders(Vec::new());
    let result = pipeline.execute(query("e2e-6", 75)).await;
    assert!(result.retrieved_candidates.is_empty());
    assert!(result.selected_candidates.is_empty());
}

// ---------------------------------------------------------------------------
// Side effects
// ---------------------------------------------------------------------------

/// Counts its runs and the rows it was handed, after a short delay.
#[derive(Clone, Default)]
struct PageCounter {
    runs: Arc<AtomicUsize>,
    seen: Arc<AtomicUsize>,
}

#[async_trait]
impl SideEffect<OrderQuery, OrderCandidate> for PageCounter {
    async fn run(
        &self,
        input: Arc<SideEffectInput<OrderQuery, OrderCandidate>>,
    ) -> Result<(), String> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.seen.fetch_add(input.selected_candidates.len(), Ordering::SeqCst);
        Ok(())
    }
}

struct CountingPipeline {
    sources: Vec<Box<dyn Source<OrderQuery, OrderCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<OrderQuery, OrderCandidate>>>>,
}

#[async_trait]
impl CandidatePipeline<OrderQuery, OrderCandidate> for CountingPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<OrderQuery>>] {
        &[]
    }

    fn sources(&self) -> &[Box<dyn Source<OrderQuery, OrderCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<OrderQuery, OrderCandidate>>] {
        &[]
    }

    fn filters(&self) -> &[Box<dyn Filter<OrderQuery, OrderCandidate>>] {
        &[]
    }

    fn scorers(&self) -> &[Box<dyn Scorer<OrderQuery, OrderCandidate>>] {
        &[]
    }

    fn selector(&self) -> &dyn Selector<OrderQuery, OrderCandidate> {
        &SortSelector
    }

    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<OrderQuery, OrderCandidate>>] {
        &[]
    }

    fn post_selection_filters(&self) -> &[Box<dyn Filter<OrderQuery, OrderCandidate>>] {
        &[]
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<OrderQuery, OrderCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        usize::MAX
    }
}

fn counting_pipeline(orders: Vec<OrderCandidate>, counter: &PageCounter) -> CountingPipeline {
    CountingPipeline {
        sources: vec![Box::new(MockOrderSource::new(orders))],
        side_effects: Arc::new(vec![Box::new(counter.clone())]),
    }
}

#[tokio::test]
async fn settled_result_has_run_every_side_effect() {
    let counter = PageCounter::default();
    let pipeline = counting_pipeline(sample_orders(), &counter);

    let mut q = query("side-1", 75);
    q.page_size = Some(5);
    let mut result = pipeline.execute(q).await;
    result.settle_side_effects().await;
    assert_eq!(counter.runs.load(Ordering::SeqCst), 1);
    assert_eq!(counter.seen.load(Ordering::SeqCst), result.selected_candidates.len());
    assert_eq!(counter.seen.load(Ordering::SeqCst), 5);

    // Settling again does not wait or rerun anything.
    result.settle_side_effects().await;
    assert_eq!(counter.runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_page_skips_side_effects() {
    let counter = PageCounter::default();
    let pipeline = counting_pipeline(Vec::new(), &counter);

    let mut result = pipeline.execute(query("side-2", 75)).await;
    result.settle_side_effects().await;
    assert!(result.selected_candidates.is_empty());
    assert_eq!(counter.runs.load(Ordering::SeqCst), 0);
}
