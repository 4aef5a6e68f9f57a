//! Filter to keep only posts in the requested category.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Keeps candidates whose normalized category equals `context.category`.
///
/// Without a category in the context every candidate passes.
pub struct CategoryFilter;

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let Some(category) = context.category.as_deref() else {
            return Ok(candidates);
        };

        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.item.has_category(category))
            .collect())
    }
}
