//! Mood Source - cold-start discovery
//!
//! Users without history can still ask for posts by mood. Every row of the
//! cold-start catalog whose mood labels contain one of the requested moods
//! becomes a candidate, scored by its rating.

use crate::types::{Candidate, CandidateSource};
use data_loader::Catalog;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Mood source generates candidates from the cold-start catalog
#[derive(Clone)]
pub struct MoodSource {
    /// Shared reference to the cold-start catalog
    catalog: Arc<Catalog>,
}

impl MoodSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// All rows matching any of `moods`, in catalog order
    #[instrument(skip(self))]
    pub fn get_candidates(&self, moods: &[String]) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = self
            .catalog
            .items()
            .par_iter()
            .filter(|item| item.matches_any_mood(moods))
            .map(|item| {
                Candidate::new(
                    item.clone(),
                    CandidateSource::Mood,
                    item.rating_percent.unwrap_or(0.0),
                )
            })
            .collect();

        debug!(
            "Generated {} mood candidates out of {} rows",
            candidates.len(),
            self.catalog.len()
        );
        candidates
    }
}
