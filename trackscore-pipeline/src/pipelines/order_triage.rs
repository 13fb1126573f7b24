use async_trait::async_trait;
use std::sync::Arc;

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::decision_filter::DecisionFilter;
use crate::components::mock_order_source::MockOrderSource;
use crate::components::page_defaults_query_hydrator::PageDefaultsQueryHydrator;
use crate::components::payment_mode_filter::PaymentModeFilter;
use crate::components::risk_band_hydrator::RiskBandHydrator;
use crate::components::rto_risk_scorer::RtoRiskScorer;
use crate::components::search_filter::SearchFilter;
use crate::components::ship_decision_hydrator::ShipDecisionHydrator;
use crate::components::shipping_plan_side_effect::ShippingPlanSideEffect;
use crate::components::sort_selector::SortSelector;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{OrderCandidate, OrderQuery, ShipDecision};

/// The orders table behind the dashboard.
///
/// Pipeline flow:
/// 1. PageDefaultsQueryHydrator trims the search box and sets the page size
/// 2. MockOrderSource serves the order window
/// 3. ShipDecisionHydrator splits the whole window at the threshold;
///    RiskBandHydrator attaches the risk badge
/// 4. SearchFilter, DecisionFilter and PaymentModeFilter narrow the table
/// 5. RtoRiskScorer assigns the priority column
/// 6. SortSelector orders by the requested column and cuts one page
/// 7. ShippingPlanSideEffect logs the page
pub struct OrderTriagePipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<OrderQuery>>>,
    sources: Vec<Box<dyn Source<OrderQuery, OrderCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<OrderQuery, OrderCandidate>>>,
    filters: Vec<Box<dyn Filter<OrderQuery, OrderCandidate>>>,
    scorers: Vec<Box<dyn Scorer<OrderQuery, OrderCandidate>>>,
    selector: SortSelector,
    post_selection_hydrators: Vec<Box<dyn Hydrator<OrderQuery, OrderCandidate>>>,
    post_selection_filters: Vec<Box<dyn Filter<OrderQuery, OrderCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<OrderQuery, OrderCandidate>>>>,
}

impl OrderTriagePipeline {
    /// Build a pipeline over a loaded order list.
    pub fn with_orders(orders: Vec<OrderCandidate>) -> Self {
        Self::with_source(MockOrderSource::new(orders))
    }

    /// Build a pipeline over `count` seeded synthetic orders.
    pub fn with_mock_orders(count: usize, seed: u64) -> Self {
        Self::with_source(MockOrderSource::generated(count, seed))
    }

    fn with_source(source: MockOrderSource) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<OrderQuery>>> =
            vec![Box::new(PageDefaultsQueryHydrator::default())];

        let sources: Vec<Box<dyn Source<OrderQuery, OrderCandidate>>> = vec![Box::new(source)];

        let hydrators: Vec<Box<dyn Hydrator<OrderQuery, OrderCandidate>>> = vec![
            Box::new(ShipDecisionHydrator),
            Box::new(RiskBandHydrator::default()),
        ];

        let filters: Vec<Box<dyn Filter<OrderQuery, OrderCandidate>>> = vec![
            Box::new(SearchFilter),
            Box::new(DecisionFilter),
            Box::new(PaymentModeFilter),
        ];

        let scorers: Vec<Box<dyn Scorer<OrderQuery, OrderCandidate>>> =
            vec![Box::new(RtoRiskScorer::default())];

        let side_effects: Arc<Vec<Box<dyn SideEffect<OrderQuery, OrderCandidate>>>> =
            Arc::new(vec![Box::new(ShippingPlanSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector: SortSelector,
            post_selection_hydrators: Vec::new(),
            post_selection_filters: Vec::new(),
            side_effects,
        }
    }
}

/// Ship and flagged counts over a whole order window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriageSummary {
    pub total: usize,
    pub ship: usize,
    pub flagged: usize,
}

impl TriageSummary {
    pub fn from_orders(orders: &[OrderCandidate]) -> Self {
        let ship = orders
            .iter()
            .filter(|o| o.decision == ShipDecision::Ship)
            .count();
        let flagged = orders
            .iter()
            .filter(|o| o.decision == ShipDecision::Flagged)
            .count();
        Self {
            total: orders.len(),
            ship,
            flagged,
        }
    }
}

#[async_trait]
impl CandidatePipeline<OrderQuery, OrderCandidate> for OrderTriagePipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<OrderQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<OrderQuery, OrderCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<OrderQuery, OrderCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<OrderQuery, OrderCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<OrderQuery, OrderCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<OrderQuery, OrderCandidate> {
        &self.selector
    }

    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<OrderQuery, OrderCandidate>>] {
        &self.post_selection_hydrators
    }

    fn post_selection_filters(&self) -> &[Box<dyn Filter<OrderQuery, OrderCandidate>>] {
        &self.post_selection_filters
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<OrderQuery, OrderCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    /// The selector already cuts to the query's page size.
    fn result_size(&self) -> usize {
        usize::MAX
    }
}
