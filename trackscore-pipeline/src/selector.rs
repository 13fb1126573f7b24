use std::cmp::Ordering;

use crate::util;

/// Order two scores, pushing NaN to the end regardless of direction.
pub fn compare_scores(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

/// Selectors sort and truncate the candidate list after scoring.
pub trait Selector<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Default selection: sort by score and truncate to `size`.
    fn select(&self, _query: &Q, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Decide if this selector should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Extract the score from a candidate to use for sorting.
    fn score(&self, candidate: &C) -> f64;

    /// Highest score first unless overridden.
    fn descending(&self) -> bool {
        true
    }

    /// Stable sort by score. NaN scores always land at the end so a
    /// missing value never surfaces at the top of a table.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let descending = self.descending();
        let mut sorted = candidates;
        sorted.sort_by(|a, b| compare_scores(self.score(a), self.score(b), descending));
        sorted
    }

    /// Optionally provide a maximum number of candidates to select.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_sorts_last_in_both_directions() {
        let mut xs = vec![1.0, f64::NAN, 3.0, 2.0];
        xs.sort_by(|a, b| compare_scores(*a, *b, true));
        assert_eq!(&xs[..3], &[3.0, 2.0, 1.0]);
        assert!(xs[3].is_nan());

        let mut ys = vec![f64::NAN, 3.0, 1.0];
        ys.sort_by(|a, b| compare_scores(*a, *b, false));
        assert_eq!(&ys[..2], &[1.0, 3.0]);
        assert!(ys[2].is_nan());
    }
}
