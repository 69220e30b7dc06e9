//! Named, immutable design matrix.

use faer::Mat;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while constructing a [`DesignMatrix`].
#[derive(Debug, Error, PartialEq)]
pub enum DesignError {
    #[error("design has {n_names} column names but {n_columns} columns")]
    ColumnCountMismatch { n_names: usize, n_columns: usize },

    #[error("duplicate column name `{0}`")]
    DuplicateColumn(String),

    #[error("column names must not be empty")]
    EmptyColumnName,

    #[error("column `{column}` has {got} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        got: usize,
    },
}

/// A regression design matrix with named columns.
///
/// Rows are samples and columns are regressors. Missing entries are stored as
/// `f64::NAN`. The column order is the alignment used by every contrast vector
/// built against this design.
///
/// # Example
///
/// ```
/// use contrast_vif::core::DesignMatrix;
///
/// let design = DesignMatrix::from_columns(vec![
///     ("go", vec![1.0, 0.0, 1.0, 0.0]),
///     ("stop", vec![0.0, 1.0, 0.0, 1.0]),
/// ])
/// .unwrap();
///
/// assert_eq!(design.n_samples(), 4);
/// assert_eq!(design.column_index("stop"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    columns: Vec<String>,
    values: Mat<f64>,
}

impl DesignMatrix {
    /// Create a design matrix from column names and a value matrix.
    pub fn new<S: Into<String>>(columns: Vec<S>, values: Mat<f64>) -> Result<Self, DesignError> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if columns.len() != values.ncols() {
            return Err(DesignError::ColumnCountMismatch {
                n_names: columns.len(),
                n_columns: values.ncols(),
            });
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if name.is_empty() {
                return Err(DesignError::EmptyColumnName);
            }
            if !seen.insert(name.as_str()) {
                return Err(DesignError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns, values })
    }

    /// Create a design matrix from `(name, values)` pairs, one per column.
    pub fn from_columns<S, I>(columns: I) -> Result<Self, DesignError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let (names, data): (Vec<String>, Vec<Vec<f64>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();

        let n_rows = data.first().map_or(0, Vec::len);
        for (name, column) in names.iter().zip(&data) {
            if column.len() != n_rows {
                return Err(DesignError::RaggedColumns {
                    column: name.clone(),
                    expected: n_rows,
                    got: column.len(),
                });
            }
        }

        let values = Mat::from_fn(n_rows, data.len(), |i, j| data[j][i]);
        Self::new(names, values)
    }

    /// Number of samples (rows).
    pub fn n_samples(&self) -> usize {
        self.values.nrows()
    }

    /// Number of regressors (columns).
    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    /// Column names in design order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The underlying value matrix.
    pub fn values(&self) -> &Mat<f64> {
        &self.values
    }

    /// Copy of column `j` as a vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.n_samples()).map(|i| self.values[(i, j)]).collect()
    }

    /// Number of distinct non-missing values in column `j`.
    ///
    /// Values compare by exact equality, so `-0.0` and `0.0` count once.
    pub fn distinct_count(&self, j: usize) -> usize {
        let mut present: Vec<f64> = self.column(j).into_iter().filter(|v| !v.is_nan()).collect();
        present.sort_by(f64::total_cmp);
        present.dedup_by(|a, b| a == b);
        present.len()
    }

    /// Whether column `j` contains a missing value.
    pub fn has_missing(&self, j: usize) -> bool {
        (0..self.n_samples()).any(|i| self.values[(i, j)].is_nan())
    }

    /// Mean of the non-missing values of column `j`.
    ///
    /// Returns `None` when every value is missing.
    pub fn mean(&self, j: usize) -> Option<f64> {
        let (sum, count) = self.present_sum(j);
        (count > 0).then(|| sum / count as f64)
    }

    /// Sample standard deviation (`n - 1` denominator) of the non-missing
    /// values of column `j`.
    ///
    /// Returns `None` with fewer than two non-missing values.
    pub fn sample_std(&self, j: usize) -> Option<f64> {
        let (sum, count) = self.present_sum(j);
        if count < 2 {
            return None;
        }
        let mean = sum / count as f64;
        let ss: f64 = (0..self.n_samples())
            .map(|i| self.values[(i, j)])
            .filter(|v| !v.is_nan())
            .map(|v| (v - mean).powi(2))
            .sum();
        Some((ss / (count - 1) as f64).sqrt())
    }

    /// New design holding only the given columns, in the given order.
    pub fn select_columns(&self, indices: &[usize]) -> DesignMatrix {
        let n_rows = self.n_samples();
        DesignMatrix {
            columns: indices.iter().map(|&j| self.columns[j].clone()).collect(),
            values: Mat::from_fn(n_rows, indices.len(), |i, k| self.values[(i, indices[k])]),
        }
    }

    /// New design holding only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> DesignMatrix {
        DesignMatrix {
            columns: self.columns.clone(),
            values: Mat::from_fn(indices.len(), self.n_columns(), |i, j| {
                self.values[(indices[i], j)]
            }),
        }
    }

    fn present_sum(&self, j: usize) -> (f64, usize) {
        (0..self.n_samples())
            .map(|i| self.values[(i, j)])
            .filter(|v| !v.is_nan())
            .fold((0.0, 0), |(sum, count), v| (sum + v, count + 1))
    }
}
