//! Generic candidate pipeline.
//!
//! Stage order:
//! 1. query hydrators (parallel)
//! 2. sources (parallel, concatenated)
//! 3. candidate hydrators (parallel)
//! 4. filters (sequential)
//! 5. scorers (sequential)
//! 6. selector
//! 7. post-selection hydrators and filters
//! 8. side effects (spawned; callers may await them through the result)
//!
//! A failing component is logged and skipped; it never aborts the request.

use async_trait::async_trait;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a request id so every log line can be correlated.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    QueryHydrator,
    Source,
    Hydrator,
    Filter,
    Scorer,
    PostSelectionHydrator,
    PostSelectionFilter,
    SideEffect,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStage::QueryHydrator => "query_hydrator",
            PipelineStage::Source => "source",
            PipelineStage::Hydrator => "hydrator",
            PipelineStage::Filter => "filter",
            PipelineStage::Scorer => "scorer",
            PipelineStage::PostSelectionHydrator => "post_selection_hydrator",
            PipelineStage::PostSelectionFilter => "post_selection_filter",
            PipelineStage::SideEffect => "side_effect",
        };
        write!(f, "{}", s)
    }
}

/// Everything a caller needs to render one pipeline run.
pub struct PipelineResult<Q, C> {
    /// Candidates after hydration, before any filter.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by any filter, in removal order.
    pub filtered_candidates: Vec<C>,
    /// Final, sorted and truncated candidates.
    pub selected_candidates: Vec<C>,
    /// The query as seen by the stages after hydration.
    pub query: Arc<Q>,
    side_effects: Option<JoinHandle<()>>,
}

impl<Q, C> PipelineResult<Q, C> {
    /// Wait for the side effects spawned by this run. Calling it twice is a no-op.
    pub async fn settle_side_effects(&mut self) {
        if let Some(handle) = self.side_effects.take() {
            if let Err(err) = handle.await {
                log::error!("side effect task did not complete: {}", err);
            }
        }
    }
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn post_selection_filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;
    fn result_size(&self) -> usize;

    /// Run every stage for `query`.
    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let query = self.hydrate_query(query).await;

        let candidates = self.fetch_candidates(&query).await;
        let retrieved = self
            .hydrate(&query, candidates, self.hydrators(), PipelineStage::Hydrator)
            .await;

        let (kept, mut filtered) = self
            .filter(&query, retrieved.clone(), self.filters(), PipelineStage::Filter)
            .await;

        let scored = self.score(&query, kept).await;
        let selected = self.select(&query, scored);

        let post_hydrated = self
            .hydrate(
                &query,
                selected,
                self.post_selection_hydrators(),
                PipelineStage::PostSelectionHydrator,
            )
            .await;
        let (mut final_candidates, post_filtered) = self
            .filter(
                &query,
                post_hydrated,
                self.post_selection_filters(),
                PipelineStage::PostSelectionFilter,
            )
            .await;
        filtered.extend(post_filtered);
        final_candidates.truncate(self.result_size());

        log::info!(
            "request_id={} retrieved={} filtered={} selected={}",
            query.request_id(),
            retrieved.len(),
            filtered.len(),
            final_candidates.len()
        );

        let query = Arc::new(query);
        let side_effects = self.run_side_effects(Arc::new(SideEffectInput {
            query: Arc::clone(&query),
            selected_candidates: final_candidates.clone(),
        }));

        PipelineResult {
            retrieved_candidates: retrieved,
            filtered_candidates: filtered,
            selected_candidates: final_candidates,
            query,
            side_effects: Some(side_effects),
        }
    }

    async fn hydrate_query(&self, query: Q) -> Q {
        let hydrators: Vec<&Box<dyn QueryHydrator<Q>>> = self
            .query_hydrators()
            .iter()
            .filter(|h| h.enable(&query))
            .collect();
        let results = join_all(hydrators.iter().map(|h| h.hydrate(&query))).await;

        let mut hydrated_query = query;
        for (hydrator, result) in hydrators.iter().zip(results) {
            match result {
                Ok(hydrated) => hydrator.update(&mut hydrated_query, hydrated),
                Err(err) => log::error!(
                    "request_id={} stage={} component={} failed: {}",
                    hydrated_query.request_id(),
                    PipelineStage::QueryHydrator,
                    hydrator.name(),
                    err
                ),
            }
        }
        hydrated_query
    }

    async fn fetch_candidates(&self, query: &Q) -> Vec<C> {
        let sources: Vec<&Box<dyn Source<Q, C>>> = self
            .sources()
            .iter()
            .filter(|s| s.enable(query))
            .collect();
        let results = join_all(sources.iter().map(|s| s.get_candidates(query))).await;

        let mut collected = Vec::new();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(mut candidates) => {
                    log::debug!(
                        "request_id={} stage={} component={} fetched {} candidates",
                        query.request_id(),
                        PipelineStage::Source,
                        source.name(),
                        candidates.len()
                    );
                    collected.append(&mut candidates);
                }
                Err(err) => log::error!(
                    "request_id={} stage={} component={} failed: {}",
                    query.request_id(),
                    PipelineStage::Source,
                    source.name(),
                    err
                ),
            }
        }
        collected
    }

    async fn hydrate(
        &self,
        query: &Q,
        mut candidates: Vec<C>,
        hydrators: &[Box<dyn Hydrator<Q, C>>],
        stage: PipelineStage,
    ) -> Vec<C> {
        let enabled: Vec<&Box<dyn Hydrator<Q, C>>> =
            hydrators.iter().filter(|h| h.enable(query)).collect();
        let results = join_all(enabled.iter().map(|h| h.hydrate(query, &candidates))).await;

        for (hydrator, result) in enabled.iter().zip(results) {
            match result {
                Ok(hydrated) if hydrated.len() == candidates.len() => {
                    hydrator.update_all(&mut candidates, hydrated);
                }
                Ok(hydrated) => log::warn!(
                    "request_id={} stage={} component={} returned {} candidates for {} inputs",
                    query.request_id(),
                    stage,
                    hydrator.name(),
                    hydrated.len(),
                    candidates.len()
                ),
                Err(err) => log::error!(
                    "request_id={} stage={} component={} failed: {}",
                    query.request_id(),
                    stage,
                    hydrator.name(),
                    err
                ),
            }
        }
        candidates
    }

    async fn filter(
        &self,
        query: &Q,
        mut candidates: Vec<C>,
        filters: &[Box<dyn Filter<Q, C>>],
        stage: PipelineStage,
    ) -> (Vec<C>, Vec<C>) {
        let mut removed_all = Vec::new();
        for filter in filters.iter().filter(|f| f.enable(query)) {
            let backup = candidates.clone();
            match filter.filter(query, candidates).await {
                Ok(result) => {
                    candidates = result.kept;
                    removed_all.extend(result.removed);
                }
                Err(err) => {
                    log::error!(
                        "request_id={} stage={} component={} failed: {}",
                        query.request_id(),
                        stage,
                        filter.name(),
                        err
                    );
                    candidates = backup;
                }
            }
        }
        (candidates, removed_all)
    }

    async fn score(&self, query: &Q, mut candidates: Vec<C>) -> Vec<C> {
        for scorer in self.scorers().iter().filter(|s| s.enable(query)) {
            match scorer.score(query, &candidates).await {
                Ok(scored) if scored.len() == candidates.len() => {
                    scorer.update_all(&mut candidates, scored);
                }
                Ok(scored) => log::warn!(
                    "request_id={} stage={} component={} returned {} candidates for {} inputs",
                    query.request_id(),
                    PipelineStage::Scorer,
                    scorer.name(),
                    scored.len(),
                    candidates.len()
                ),
                Err(err) => log::error!(
                    "request_id={} stage={} component={} failed: {}",
                    query.request_id(),
                    PipelineStage::Scorer,
                    scorer.name(),
                    err
                ),
            }
        }
        candidates
    }

    fn select(&self, query: &Q, candidates: Vec<C>) -> Vec<C> {
        let selector = self.selector();
        if selector.enable(query) {
            selector.select(query, candidates)
        } else {
            candidates
        }
    }

    fn run_side_effects(&self, input: Arc<SideEffectInput<Q, C>>) -> JoinHandle<()> {
        let side_effects = self.side_effects();
        tokio::spawn(async move {
            for side_effect in side_effects.iter() {
                if !side_effect.enable(Arc::clone(&input.query)) {
                    continue;
                }
                if input.selected_candidates.is_empty() && !side_effect.run_on_empty_page() {
                    continue;
                }
                if let Err(err) = side_effect.run(Arc::clone(&input)).await {
                    log::error!(
                        "request_id={} stage={} component={} failed: {}",
                        input.query.request_id(),
                        PipelineStage::SideEffect,
                        side_effect.name(),
                        err
                    );
                }
            }
        })
    }
}
