//! Core traits for the filtering pipeline.
//!
//! Every post-generation step (dedupe, category and mood filters, rating
//! order) is a [`Filter`], so the two recommendation paths are just
//! different stage lists.

use anyhow::Result;
use sources::{Candidate, UserContext};

/// One stage applied to the candidate list.
///
/// ## Design Note
/// - Stages take ownership of the candidates and may drop or reorder them
/// - `Send + Sync` so a built pipeline can be shared across requests
pub trait Filter: Send + Sync {
    /// Returns the name of this stage (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this stage to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to process (takes ownership)
    /// * `context` - Request context carrying category and mood filters
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>>;
}
