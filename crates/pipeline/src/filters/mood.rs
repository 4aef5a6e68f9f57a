//! Filter to keep only posts matching at least one requested mood.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Keeps candidates where any mood in `context.moods` is contained in one
/// of the row's mood labels (substring match, case-sensitive).
///
/// An empty mood list disables the filter.
pub struct MoodFilter;

impl Filter for MoodFilter {
    fn name(&self) -> &str {
        "MoodFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        if context.moods.is_empty() {
            return Ok(candidates);
        }

        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.item.matches_any_mood(&context.moods))
            .collect())
    }
}
