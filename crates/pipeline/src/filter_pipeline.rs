//! The FilterPipeline runs stages in order.

use crate::traits::Filter;
use anyhow::{Context, Result};
use sources::{Candidate, UserContext};
use tracing::debug;

/// Ordered list of stages, built with [`FilterPipeline::add_filter`].
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DuplicateRowFilter)
///     .add_filter(CategoryFilter)
///     .add_filter(MoodFilter)
///     .add_filter(RatingRanker::new(true))
///     .add_filter(UniqueTitleFilter);
///
/// let ranked = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a stage (builder pattern)
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every stage in sequence; the first failing stage aborts the run.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter
                .apply(current, context)
                .with_context(|| format!("{} failed", filter.name()))?;
            debug!(
                stage = filter.name(),
                before,
                after = current.len(),
                "Applied pipeline stage"
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
