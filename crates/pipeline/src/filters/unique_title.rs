//! Filter to keep one candidate per title.
//!
//! Runs after ranking, so the copy that survives is the best ranked one.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};
use std::collections::HashSet;

/// Keeps the first candidate for each title, in current order.
pub struct UniqueTitleFilter;

impl Filter for UniqueTitleFilter {
    fn name(&self) -> &str {
        "UniqueTitleFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut seen: HashSet<String> = HashSet::new();
        Ok(candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.item.title.clone()))
            .collect())
    }
}
