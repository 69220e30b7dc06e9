//! Design matrix preprocessing: constant-column removal and unit scaling.

use super::error::VifError;
use crate::core::{DesignMatrix, NaAction, NaHandler, NaInfo};
use crate::utils::{center_and_scale, columns_to_matrix, retained_columns};
use faer::Mat;

/// A design reduced to its non-constant columns and standardized so that
/// X'X is the correlation matrix of those columns.
#[derive(Debug, Clone)]
pub struct StandardizedDesign {
    columns: Vec<String>,
    matrix: Mat<f64>,
    dropped: Vec<String>,
    na_info: NaInfo,
}

impl StandardizedDesign {
    /// Retained column names, in design order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Standardized values (n_samples x retained columns).
    pub fn matrix(&self) -> &Mat<f64> {
        &self.matrix
    }

    /// Columns removed as constant.
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped
    }

    /// Number of rows used for standardization.
    pub fn n_samples(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of retained columns.
    pub fn n_columns(&self) -> usize {
        self.matrix.ncols()
    }

    /// Missing-value handling applied before scaling.
    pub fn na_info(&self) -> &NaInfo {
        &self.na_info
    }
}

/// Drop constant columns and standardize the rest.
///
/// Columns with a single distinct value and no missing entries are removed.
/// Each remaining column is centered and divided by
/// `sample_std * sqrt(n_samples - 1)`, which leaves it with zero mean and a
/// sum of squares of one. The input is not modified.
///
/// # Errors
///
/// - `VifError::EmptyDesign` if every column is constant
/// - `VifError::Missing` if `na_action` rejects the missing values present
/// - `VifError::DegenerateRegressor` if a retained column has zero or
///   undefined variance (for instance constant observed values plus a gap)
pub fn standardize(
    design: &DesignMatrix,
    na_action: NaAction,
) -> Result<StandardizedDesign, VifError> {
    let keep = retained_columns(design);
    let kept_indices: Vec<usize> = (0..keep.len()).filter(|&j| keep[j]).collect();
    let dropped: Vec<String> = design
        .column_names()
        .iter()
        .zip(&keep)
        .filter(|(_, &k)| !k)
        .map(|(name, _)| name.clone())
        .collect();

    if !dropped.is_empty() {
        log::debug!("Dropping {} constant column(s): {:?}", dropped.len(), dropped);
    }
    if kept_indices.is_empty() {
        return Err(VifError::EmptyDesign);
    }

    let retained = design.select_columns(&kept_indices);
    let (clean, na_info) = NaHandler::process(&retained, na_action)?;
    if na_info.has_removed() {
        log::debug!(
            "Omitted {} of {} rows with missing values",
            na_info.n_removed,
            na_info.n_original
        );
    }

    let n_samples = clean.n_samples();
    let root = (n_samples as f64 - 1.0).max(0.0).sqrt();
    let mut scaled = Vec::with_capacity(clean.n_columns());

    for (j, name) in clean.column_names().iter().enumerate() {
        let degenerate = || VifError::DegenerateRegressor {
            column: name.clone(),
        };

        if clean.distinct_count(j) < 2 {
            return Err(degenerate());
        }
        let mean = clean.mean(j).ok_or_else(degenerate)?;
        let std = clean.sample_std(j).ok_or_else(degenerate)?;
        let divisor = std * root;
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(degenerate());
        }

        scaled.push(center_and_scale(&clean, j, mean, divisor));
    }

    log::debug!(
        "Standardized {} regressor(s) over {} samples",
        scaled.len(),
        n_samples
    );

    Ok(StandardizedDesign {
        columns: clean.column_names().to_vec(),
        matrix: columns_to_matrix(&scaled, n_samples),
        dropped,
        na_info,
    })
}
