use async_trait::async_trait;

use crate::util;

/// Scorers run sequentially after filtering; each sees the scores written
/// by the scorers before it.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return one scored candidate per input candidate, in input order.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy only the score fields this scorer owns.
    fn update(&self, candidate: &mut C, scored: C);

    /// Apply `update` pairwise. Callers guarantee equal lengths.
    fn update_all(&self, candidates: &mut [C], scored: Vec<C>) {
        for (candidate, s) in candidates.iter_mut().zip(scored) {
            self.update(candidate, s);
        }
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
