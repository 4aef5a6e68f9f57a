//! Precomputed item-item similarity matrix.
//!
//! The matrix is produced offline (numpy `np.save`) and only read here.
//! Row and column `i` both refer to row `i` of the content catalog.

use crate::error::{DataLoadError, Result};
use crate::types::ItemIndex;
use ndarray::{Array2, ArrayView1};
use std::path::Path;

/// Square matrix of finite similarity scores
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Wrap an array, checking that it is square and finite
    pub fn from_array(scores: Array2<f64>) -> Result<Self> {
        let (rows, cols) = scores.dim();
        if rows != cols {
            return Err(DataLoadError::NotSquare { rows, cols });
        }
        if let Some(((i, j), value)) = scores.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(DataLoadError::InvalidValue {
                field: format!("similarity[{}][{}]", i, j),
                value: value.to_string(),
            });
        }
        Ok(Self { scores })
    }

    /// Build from nested rows; convenient for small synthetic matrices
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(DataLoadError::NotSquare {
                rows: n,
                cols: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let scores = Array2::from_shape_vec((n, n), flat).map_err(|e| DataLoadError::InvalidValue {
            field: "similarity shape".to_string(),
            value: e.to_string(),
        })?;
        Self::from_array(scores)
    }

    /// Load a matrix from `.npy` (float64 or float32) or headerless `.csv`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DataLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let scores = if is_csv {
            read_csv_matrix(path)?
        } else {
            read_npy_matrix(path)?
        };
        Self::from_array(scores)
    }

    /// Number of items the matrix covers (rows == columns)
    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn score(&self, a: ItemIndex, b: ItemIndex) -> Option<f64> {
        self.scores.get((a, b)).copied()
    }

    /// Raw similarity row for an item
    pub fn row(&self, index: ItemIndex) -> Option<ArrayView1<'_, f64>> {
        (index < self.len()).then(|| self.scores.row(index))
    }

    /// Every `(other, score)` pair for `index`, in matrix order, with the
    /// item itself left out.
    ///
    /// Returns `None` if `index` is outside the matrix.
    pub fn similarities_for(&self, index: ItemIndex) -> Option<Vec<(ItemIndex, f64)>> {
        let row = self.row(index)?;
        Some(
            row.iter()
                .copied()
                .enumerate()
                .filter(|&(other, _)| other != index)
                .collect(),
        )
    }
}

fn read_npy_matrix(path: &Path) -> Result<Array2<f64>> {
    match ndarray_npy::read_npy::<_, Array2<f64>>(path) {
        Ok(scores) => Ok(scores),
        // Older exports were saved as float32
        Err(f64_err) => ndarray_npy::read_npy::<_, Array2<f32>>(path)
            .map(|scores| scores.mapv(f64::from))
            .map_err(|_| DataLoadError::Npy {
                file: path.display().to_string(),
                reason: f64_err.to_string(),
            }),
    }
}

fn read_csv_matrix(path: &Path) -> Result<Array2<f64>> {
    let file = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|source| DataLoadError::Csv {
            file: file.clone(),
            source,
        })?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line_no = idx + 1;
        let record = record.map_err(|source| DataLoadError::Csv {
            file: file.clone(),
            source,
        })?;
        let row = record
            .iter()
            .map(|cell| {
                cell.trim().parse::<f64>().map_err(|e| DataLoadError::ParseError {
                    file: file.clone(),
                    line: line_no,
                    reason: format!("Invalid similarity '{}': {}", cell, e),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    let n = rows.len();
    let cols = rows.first().map_or(0, Vec::len);
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n, cols), flat).map_err(|e| DataLoadError::InvalidValue {
        field: "similarity shape".to_string(),
        value: e.to_string(),
    })
}
