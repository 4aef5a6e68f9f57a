//! Shared types for candidate generation.

use data_loader::{Item, ItemIndex};

/// Where a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Neighbour of a viewed item in the similarity matrix
    Similarity,
    /// Cold-start catalog row matching a requested mood
    Mood,
}

/// A catalog row proposed for recommendation.
///
/// Candidates carry their own copy of the row so pipeline stages can
/// filter and reorder them without going back to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub item: Item,
    pub source: CandidateSource,
    /// Similarity score for [`CandidateSource::Similarity`], rating for
    /// [`CandidateSource::Mood`] (0 when unrated)
    pub base_score: f64,
    /// Viewed row this candidate was generated from
    pub seed: Option<ItemIndex>,
}

impl Candidate {
    pub fn new(item: Item, source: CandidateSource, base_score: f64) -> Self {
        Self {
            item,
            source,
            base_score,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: ItemIndex) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }
}

/// Everything known about a request before candidates are generated.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Empty for cold-start requests
    pub username: String,
    /// Content catalog rows viewed by the user, in file order, duplicates kept
    pub viewed_items: Vec<ItemIndex>,
    /// Resolved category label to keep, if any
    pub category: Option<String>,
    /// Requested moods; empty means no mood filter
    pub moods: Vec<String>,
}

impl UserContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Context for a request with no user behind it
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_moods(mut self, moods: Vec<String>) -> Self {
        self.moods = moods;
        self
    }

    pub fn has_history(&self) -> bool {
        !self.viewed_items.is_empty()
    }
}
