//! Error types for the data-loader crate.
//!
//! Every failure to read or validate a catalog file or a similarity matrix
//! surfaces as a [`DataLoadError`].

use thiserror::Error;

/// Errors that can occur while loading catalogs and similarity matrices
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, ragged rows, ...)
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A `.npy` file could not be decoded as a 2D float array
    #[error("Failed to read matrix {file}: {reason}")]
    Npy { file: String, reason: String },

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A column the schema requires is absent from the header row
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Similarity matrix is not square
    #[error("Similarity matrix must be square, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Similarity matrix and catalog were built from different row sets
    #[error("Similarity matrix has {matrix} rows but the catalog has {catalog} items")]
    DimensionMismatch { catalog: usize, matrix: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
