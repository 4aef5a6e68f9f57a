//! Similarity Source - item-to-item neighbours of the user's history
//!
//! "Because you viewed X, here are the posts most similar to X."
//!
//! ## Algorithm
//! 1. Walk the user's viewed rows in view order
//! 2. Resolve each viewed title to its first catalog row (the seed)
//! 3. Rank every other row by its similarity to the seed, highest first,
//!    ties kept in matrix order
//! 4. Keep the top `per_item` neighbours (5 by default), never the seed
//! 5. Concatenate the per-seed lists in view order
//!
//! No deduplication happens here; that is the pipeline's job.

use crate::types::{Candidate, CandidateSource, UserContext};
use data_loader::{ContentIndex, ItemIndex};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates candidates from the precomputed similarity matrix
#[derive(Clone)]
pub struct SimilaritySource {
    /// Shared reference to the content catalog + matrix (read-only)
    content: Arc<ContentIndex>,

    /// Neighbours kept per viewed item
    per_item: usize,
}

impl SimilaritySource {
    /// Create a new Similarity source
    pub fn new(content: Arc<ContentIndex>) -> Self {
        Self {
            content,
            per_item: 5,
        }
    }

    /// Configure how many neighbours each viewed item contributes (default: 5)
    pub fn with_per_item(mut self, per_item: usize) -> Self {
        self.per_item = per_item;
        self
    }

    /// Generate candidates for every viewed row in the user context
    #[instrument(skip(self, user_context), fields(username = %user_context.username))]
    pub fn get_candidates(&self, user_context: &UserContext) -> Vec<Candidate> {
        debug!(
            "Generating similarity candidates from {} viewed rows",
            user_context.viewed_items.len()
        );

        // par_iter on a slice keeps the per-seed lists in view order
        let per_seed: Vec<Vec<Candidate>> = user_context
            .viewed_items
            .par_iter()
            .map(|&viewed| self.neighbours_of_viewed(viewed))
            .collect();

        let candidates: Vec<Candidate> = per_seed.into_iter().flatten().collect();
        debug!("Generated {} similarity candidates", candidates.len());
        candidates
    }

    /// Top neighbours for one viewed row, or nothing if its title cannot be
    /// resolved
    fn neighbours_of_viewed(&self, viewed: ItemIndex) -> Vec<Candidate> {
        let catalog = self.content.catalog();

        let Some(seed) = catalog
            .get_item(viewed)
            .and_then(|item| catalog.find_index_by_title(&item.title))
        else {
            debug!("Viewed row {} has no catalog match, skipping", viewed);
            return Vec::new();
        };

        self.top_neighbours(seed)
            .into_iter()
            .filter_map(|(other, score)| {
                let item = catalog.get_item(other)?.clone();
                Some(Candidate::new(item, CandidateSource::Similarity, score).with_seed(seed))
            })
            .collect()
    }

    /// The `per_item` most similar rows to `seed`, highest score first
    pub fn top_neighbours(&self, seed: ItemIndex) -> Vec<(ItemIndex, f64)> {
        let Some(mut scored) = self.content.similarity().similarities_for(seed) else {
            return Vec::new();
        };

        // Stable sort: equal scores keep matrix order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(self.per_item);
        scored
    }
}
