//! # Sources Crate
//!
//! This crate implements candidate generation for feed recommendations.
//!
//! ## Components
//!
//! ### Similarity Source (warm path)
//! Item-to-item neighbours of what the user already viewed:
//! - Top 5 most similar posts per viewed post
//! - Backed by the precomputed similarity matrix
//!
//! ### Mood Source (cold start)
//! Posts from the cold-start catalog whose moods match the request.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{MoodSource, SimilaritySource, user_context::build_user_context};
//! use data_loader::ContentIndex;
//! use std::sync::Arc;
//!
//! let content = Arc::new(ContentIndex::load_from_files(catalog_path, matrix_path)?);
//! let context = build_user_context(content.catalog(), "alice");
//!
//! let similar = SimilaritySource::new(content.clone()).get_candidates(&context);
//! ```

// Public modules
pub mod types;
pub mod user_context;
pub mod similar_items;
pub mod mood;

// Re-export commonly used types
pub use types::{Candidate, CandidateSource, UserContext};
pub use similar_items::SimilaritySource;
pub use mood::MoodSource;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, CatalogSchema, ContentIndex, Item, SimilarityMatrix};
    use std::sync::Arc;

    fn create_test_index() -> ContentIndex {
        let mut catalog = Catalog::new(CatalogSchema::Content);
        catalog.push_item(Item::new("Test Post").with_username("alice"));

        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        ContentIndex::new(catalog, matrix).unwrap()
    }

    #[test]
    fn test_single_item_catalog_has_no_neighbours() {
        let index = Arc::new(create_test_index());
        let source = SimilaritySource::new(index.clone());
        let context = user_context::build_user_context(index.catalog(), "alice");

        assert!(context.has_history());
        assert!(source.get_candidates(&context).is_empty());
    }

    #[test]
    fn test_candidate_creation() {
        let candidate = Candidate::new(Item::new("Post"), CandidateSource::Similarity, 0.85)
            .with_seed(3);
        assert_eq!(candidate.title(), "Post");
        assert_eq!(candidate.source, CandidateSource::Similarity);
        assert_eq!(candidate.base_score, 0.85);
        assert_eq!(candidate.seed, Some(3));
    }

    #[test]
    fn test_anonymous_context() {
        let context = UserContext::anonymous().with_moods(vec!["happy".to_string()]);
        assert!(context.username.is_empty());
        assert!(!context.has_history());
        assert_eq!(context.moods, vec!["happy"]);
    }
}
