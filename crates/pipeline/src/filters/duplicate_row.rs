//! Filter to drop exact duplicate rows.
//!
//! Two viewed posts can share neighbours, so the same catalog row often
//! shows up more than once after candidate generation.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};
use std::collections::HashMap;

/// Keeps the first of every group of candidates whose rows are equal in
/// every column.
///
/// ## Algorithm
/// Rows are bucketed by title so only rows that could be equal are
/// compared field by field.
pub struct DuplicateRowFilter;

impl Filter for DuplicateRowFilter {
    fn name(&self) -> &str {
        "DuplicateRowFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
        let mut by_title: HashMap<String, Vec<usize>> = HashMap::new();

        for candidate in candidates {
            let positions = by_title.entry(candidate.item.title.clone()).or_default();
            let seen = positions
                .iter()
                .any(|&pos| kept[pos].item.same_record(&candidate.item));
            if !seen {
                positions.push(kept.len());
                kept.push(candidate);
            }
        }
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, CatalogSchema, Item};
    use sources::CandidateSource;

    #[test]
    fn test_duplicate_row_filter() {
        let mut catalog = Catalog::new(CatalogSchema::Content);
        catalog.push_item(Item::new("A").with_username("u1").with_rating(50.0));
        catalog.push_item(Item::new("B").with_username("u1"));
        // Same content as row 0 under a different index
        catalog.push_item(Item::new("A").with_username("u1").with_rating(50.0));
        catalog.push_item(Item::new("A").with_username("u2").with_rating(50.0));

        let candidate = |index: usize| {
            Candidate::new(
                catalog.get_item(index).unwrap().clone(),
                CandidateSource::Similarity,
                0.5,
            )
        };
        let candidates = vec![candidate(0), candidate(1), candidate(0), candidate(2), candidate(3)];

        let filtered = DuplicateRowFilter
            .apply(candidates, &UserContext::anonymous())
            .unwrap();

        let indices: Vec<usize> = filtered.iter().map(|c| c.item.index).collect();
        assert_eq!(indices, vec![0, 1, 3]);
    }
}
