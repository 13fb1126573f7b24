use async_trait::async_trait;

use crate::util;

/// Candidate hydrators run in parallel over the full retrieved set and
/// attach derived fields to each candidate.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return one hydrated candidate per input candidate, in input order.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy only the fields this hydrator owns.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Apply `update` pairwise. Callers guarantee equal lengths.
    fn update_all(&self, candidates: &mut [C], hydrated: Vec<C>) {
        for (candidate, h) in candidates.iter_mut().zip(hydrated) {
            self.update(candidate, h);
        }
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
