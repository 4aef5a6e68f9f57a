//! Pipeline for filtering and ranking recommendation candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - RatingRanker for ordering by `rating_percent`
//! - FilterPipeline for composing stages
//!
//! ## Architecture
//! Candidates from a source pass through stages in order:
//! 1. Exact duplicate rows are dropped
//! 2. Category and mood filters remove unwanted rows
//! 3. RatingRanker orders by rating
//! 4. UniqueTitleFilter keeps the best-ranked row per title
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//! use pipeline::ranking::RatingRanker;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(DuplicateRowFilter)
//!     .add_filter(CategoryFilter)
//!     .add_filter(MoodFilter)
//!     .add_filter(RatingRanker::new(catalog.has_rating_column()))
//!     .add_filter(UniqueTitleFilter);
//!
//! let ranked = pipeline.apply(candidates, &context)?;
//! ```

pub mod traits;
pub mod filters;
pub mod ranking;
pub mod filter_pipeline;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranking::RatingRanker;
