//! Loading catalogs and pairing the content catalog with its matrix.
//!
//! The content catalog and the similarity matrix are separate files that
//! only make sense together: row `i` of one is row/column `i` of the other.
//! [`ContentIndex`] is the only way to hold both, and it refuses to build
//! when their sizes disagree.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::similarity::SimilarityMatrix;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load a catalog CSV file, keeping file order as row order
    pub fn load_from_file(path: &Path, schema: CatalogSchema) -> Result<Self> {
        info!(path = %path.display(), ?schema, "Loading catalog");

        let (items, has_rating_column) = parser::parse_catalog(path, schema)?;

        let mut catalog = Catalog::new(schema);
        for item in items {
            catalog.push_item(item);
        }
        catalog.set_has_rating_column(has_rating_column);

        let (rows, titles, viewers) = catalog.counts();
        info!(
            "Loaded {} rows ({} distinct titles, {} viewers)",
            rows, titles, viewers
        );
        Ok(catalog)
    }
}

/// Content catalog plus the similarity matrix built from it.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl ContentIndex {
    /// Pair a catalog with its matrix.
    ///
    /// Fails with [`DataLoadError::DimensionMismatch`] unless the matrix has
    /// exactly one row per catalog row.
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        if catalog.len() != similarity.len() {
            return Err(DataLoadError::DimensionMismatch {
                catalog: catalog.len(),
                matrix: similarity.len(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Load the content catalog and its similarity matrix.
    ///
    /// The two files are parsed in parallel and validated together.
    pub fn load_from_files(catalog_path: &Path, matrix_path: &Path) -> Result<Self> {
        let (catalog, similarity) = rayon::join(
            || Catalog::load_from_file(catalog_path, CatalogSchema::Content),
            || SimilarityMatrix::load_from_file(matrix_path),
        );
        let catalog = catalog?;
        let similarity = similarity?;

        info!(
            "Loaded {}x{} similarity matrix",
            similarity.len(),
            similarity.len()
        );
        Self::new(catalog, similarity)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
