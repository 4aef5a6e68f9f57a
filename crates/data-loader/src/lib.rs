//! # Data Loader Crate
//!
//! This crate loads the two catalogs and the similarity matrix the
//! recommender reads from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, Catalog, CatalogSchema)
//! - **parser**: Parse catalog CSV files and normalize list-like cells
//! - **similarity**: The precomputed item-item similarity matrix
//! - **index**: Loading, and pairing the content catalog with its matrix
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, CatalogSchema, ContentIndex};
//! use std::path::Path;
//!
//! let index = ContentIndex::load_from_files(
//!     Path::new("CONTENT_based_filtering.csv"),
//!     Path::new("similarity_matrix.npy"),
//! )?;
//! let views = index.catalog().get_user_views("alice");
//!
//! let cold = Catalog::load_from_file(
//!     Path::new("completed_data_for_cold_start.csv"),
//!     CatalogSchema::ColdStart,
//! )?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod similarity;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::ContentIndex;
pub use parser::{normalize_category, parse_moods};
pub use similarity::SimilarityMatrix;
pub use types::{Catalog, CatalogSchema, CellValue, Item, ItemIndex};
