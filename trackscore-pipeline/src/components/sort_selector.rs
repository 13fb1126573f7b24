use std::cmp::Ordering;

use crate::selector::{compare_scores, Selector};
use crate::types::{OrderCandidate, OrderQuery, SortDirection, SortKey};

/// Sorts the orders table by the column the query asks for and cuts it to
/// one page. Missing priority scores sort last in either direction.
pub struct SortSelector;

impl SortSelector {
    fn compare(key: SortKey, descending: bool, a: &OrderCandidate, b: &OrderCandidate) -> Ordering {
        let directed = |ord: Ordering| if descending { ord.reverse() } else { ord };
        match key {
            SortKey::Id => directed(a.id.cmp(&b.id)),
            SortKey::PlacedAt => directed(a.placed_at.cmp(&b.placed_at)),
            SortKey::Amount => compare_scores(a.amount, b.amount, descending),
            SortKey::QualityScore => compare_scores(a.quality_score, b.quality_score, descending),
            SortKey::Priority => compare_scores(
                a.priority_score.unwrap_or(f64::NAN),
                b.priority_score.unwrap_or(f64::NAN),
                descending,
            ),
        }
    }
}

impl Selector<OrderQuery, OrderCandidate> for SortSelector {
    fn select(&self, query: &OrderQuery, candidates: Vec<OrderCandidate>) -> Vec<OrderCandidate> {
        let descending = query.direction == SortDirection::Descending;
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            Self::compare(query.sort, descending, a, b).then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = query.page_size {
            sorted.truncate(limit);
        }
        sorted
    }

    fn score(&self, candidate: &OrderCandidate) -> f64 {
        candidate.priority_score.unwrap_or(f64::NAN)
    }
}
