use async_trait::async_trait;
use std::sync::Arc;

use crate::util;

/// The page that was just shown, handed to every side effect.
#[derive(Clone)]
pub struct SideEffectInput<Q, C> {
    pub query: Arc<Q>,
    pub selected_candidates: Vec<C>,
}

impl<Q, C> SideEffectInput<Q, C> {
    /// How many rows on the page satisfy `pred`.
    pub fn count_where(&self, pred: impl Fn(&C) -> bool) -> usize {
        self.selected_candidates.iter().filter(|c| pred(c)).count()
    }
}

/// Work that follows a rendered orders page, such as recording the shipping
/// plan or notifying the dispatch desk. It runs on a spawned task and cannot
/// change what the seller sees.
#[async_trait]
pub trait SideEffect<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: Arc<Q>) -> bool {
        true
    }

    /// Whether to run when filters left the page empty. Off by default:
    /// there is no plan to record for an empty page.
    fn run_on_empty_page(&self) -> bool {
        false
    }

    async fn run(&self, input: Arc<SideEffectInput<Q, C>>) -> Result<(), String>;

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
