//! Rating-based ordering of candidates.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};
use std::cmp::Ordering;

/// Orders candidates by `rating_percent`, highest first.
///
/// ## Algorithm
/// - Stable sort, so equal ratings keep their accumulated order
/// - Unrated rows go after every rated row
/// - Disabled when the catalog has no rating column, leaving the
///   accumulated order untouched
pub struct RatingRanker {
    enabled: bool,
}

impl RatingRanker {
    /// # Arguments
    /// * `enabled` - Whether the source catalog carries `rating_percent`
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Filter for RatingRanker {
    fn name(&self) -> &str {
        "RatingRanker"
    }

    fn apply(
        &self,
        mut candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        if self.enabled {
            candidates.sort_by(|a, b| {
                compare_ratings_desc(a.item.rating_percent, b.item.rating_percent)
            });
        }
        Ok(candidates)
    }
}

fn compare_ratings_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Item;
    use sources::CandidateSource;

    fn candidate(title: &str, rating: Option<f64>) -> Candidate {
        let mut item = Item::new(title);
        item.rating_percent = rating;
        Candidate::new(item, CandidateSource::Similarity, 0.5)
    }

    fn titles(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.title()).collect()
    }

    #[test]
    fn test_sorts_descending_with_unrated_last() {
        let candidates = vec![
            candidate("low", Some(10.0)),
            candidate("none", None),
            candidate("high", Some(95.0)),
            candidate("mid", Some(50.0)),
        ];

        let ranked = RatingRanker::new(true)
            .apply(candidates, &UserContext::anonymous())
            .unwrap();

        assert_eq!(titles(&ranked), vec!["high", "mid", "low", "none"]);
    }

    #[test]
    fn test_equal_ratings_keep_order() {
        let candidates = vec![
            candidate("first", Some(70.0)),
            candidate("second", Some(70.0)),
            candidate("top", Some(80.0)),
        ];

        let ranked = RatingRanker::new(true)
            .apply(candidates, &UserContext::anonymous())
            .unwrap();

        assert_eq!(titles(&ranked), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_disabled_keeps_accumulated_order() {
        let candidates = vec![candidate("a", Some(1.0)), candidate("b", Some(99.0))];

        let ranked = RatingRanker::new(false)
            .apply(candidates, &UserContext::anonymous())
            .unwrap();

        assert_eq!(titles(&ranked), vec!["a", "b"]);
    }
}
