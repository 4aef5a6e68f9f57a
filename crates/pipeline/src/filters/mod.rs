//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filters that can be composed into
//! a FilterPipeline. Ranking lives in [`crate::ranking`].

pub mod category;
pub mod duplicate_row;
pub mod mood;
pub mod unique_title;

// Re-export for convenience
pub use category::CategoryFilter;
pub use duplicate_row::DuplicateRowFilter;
pub use mood::MoodFilter;
pub use unique_title::UniqueTitleFilter;
