//! NA (missing value) handling for design matrices.
//!
//! Three policies, mirroring R's `na.action`:
//! - `Pass`: keep every row; missing values flow into standardization
//! - `Omit`: remove rows that hold a missing value
//! - `Fail`: return an error if any value is missing
//!
//! # Example
//!
//! ```
//! use contrast_vif::core::{DesignMatrix, NaAction, NaHandler};
//!
//! let design = DesignMatrix::from_columns(vec![
//!     ("a", vec![1.0, f64::NAN, 3.0, 4.0]),
//!     ("b", vec![0.5, 1.5, 2.5, 0.0]),
//! ])
//! .unwrap();
//!
//! let (clean, info) = NaHandler::process(&design, NaAction::Omit).unwrap();
//! assert_eq!(clean.n_samples(), 3);
//! assert_eq!(info.kept_indices, vec![0, 2, 3]);
//! ```

use super::design::DesignMatrix;
use thiserror::Error;

/// Action to take when missing values (NaN) are encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NaAction {
    /// Keep missing values as they are.
    ///
    /// Column means and standard deviations skip them, and the sample count
    /// used for scaling is the full row count. Equivalent to R's `na.pass`.
    ///
    /// A retained column that still holds a missing value fails estimation
    /// with `VifError::DegenerateRegressor` (zero variance or missing values
    /// after preprocessing), even when its observed values vary. Use `Omit`
    /// to drop those rows instead.
    #[default]
    Pass,

    /// Remove rows containing missing values before standardization.
    ///
    /// Equivalent to R's `na.omit`.
    Omit,

    /// Return an error if any value is missing.
    ///
    /// Equivalent to R's `na.fail`.
    Fail,
}

/// Error raised by the missing-value policy.
#[derive(Debug, Error, PartialEq)]
pub enum NaError {
    /// NA values found in the design when using `NaAction::Fail`.
    #[error("NA values found in design (na.fail): {n_na} rows contain missing values")]
    NaValuesPresent { n_na: usize },

    /// Every row was removed due to NA values.
    #[error("all observations contain NA values")]
    AllNa,
}

/// Information about NA handling applied to a design.
#[derive(Debug, Clone, PartialEq)]
pub struct NaInfo {
    /// Number of rows before NA handling.
    pub n_original: usize,

    /// Number of rows after NA handling.
    pub n_clean: usize,

    /// Indices of rows that were kept.
    pub kept_indices: Vec<usize>,

    /// Number of rows removed.
    pub n_removed: usize,

    /// The NA action that was applied.
    pub action: NaAction,
}

impl NaInfo {
    /// Check if any rows were removed.
    pub fn has_removed(&self) -> bool {
        self.n_removed > 0
    }

    /// Create NaInfo for a design where no rows were removed.
    pub fn no_na(n_observations: usize, action: NaAction) -> Self {
        Self {
            n_original: n_observations,
            n_clean: n_observations,
            kept_indices: (0..n_observations).collect(),
            n_removed: 0,
            action,
        }
    }
}

/// Handler for missing value processing.
pub struct NaHandler;

impl NaHandler {
    /// Apply `action` to `design`.
    ///
    /// # Errors
    ///
    /// - `NaError::NaValuesPresent` if `action` is `Fail` and NA values exist
    /// - `NaError::AllNa` if `action` is `Omit` and every row holds an NA value
    pub fn process(
        design: &DesignMatrix,
        action: NaAction,
    ) -> Result<(DesignMatrix, NaInfo), NaError> {
        let n_samples = design.n_samples();

        match action {
            NaAction::Pass => Ok((design.clone(), NaInfo::no_na(n_samples, action))),

            NaAction::Fail => {
                let n_na = Self::count_na_rows(design);
                if n_na > 0 {
                    return Err(NaError::NaValuesPresent { n_na });
                }
                Ok((design.clone(), NaInfo::no_na(n_samples, action)))
            }

            NaAction::Omit => {
                let na_mask = Self::find_na_rows(design);
                let n_na = na_mask.iter().filter(|&&v| v).count();

                if n_na == 0 {
                    return Ok((design.clone(), NaInfo::no_na(n_samples, action)));
                }
                if n_na == n_samples {
                    return Err(NaError::AllNa);
                }

                let kept_indices: Vec<usize> = na_mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &had_na)| if !had_na { Some(i) } else { None })
                    .collect();

                let clean = design.select_rows(&kept_indices);
                let info = NaInfo {
                    n_original: n_samples,
                    n_clean: kept_indices.len(),
                    kept_indices,
                    n_removed: n_na,
                    action,
                };

                Ok((clean, info))
            }
        }
    }

    /// Rows of `design` holding at least one missing value.
    pub fn find_na_rows(design: &DesignMatrix) -> Vec<bool> {
        let values = design.values();
        (0..design.n_samples())
            .map(|i| (0..design.n_columns()).any(|j| values[(i, j)].is_nan()))
            .collect()
    }

    /// Number of rows holding at least one missing value.
    pub fn count_na_rows(design: &DesignMatrix) -> usize {
        Self::find_na_rows(design).into_iter().filter(|&v| v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design_with_na() -> DesignMatrix {
        // Row 1: NA in `a`, row 3: NA in `b`
        DesignMatrix::from_columns(vec![
            ("a", vec![1.0, f64::NAN, 3.0, 4.0, 5.0]),
            ("b", vec![2.0, 1.0, 0.0, f64::NAN, 7.0]),
        ])
        .unwrap()
    }

    fn clean_design() -> DesignMatrix {
        DesignMatrix::from_columns(vec![("a", vec![1.0, 2.0, 3.0])]).unwrap()
    }

    #[test]
    fn test_na_omit() {
        let (clean, info) = NaHandler::process(&design_with_na(), NaAction::Omit).unwrap();

        assert_eq!(clean.n_samples(), 3);
        assert_eq!(info.n_removed, 2);
        assert_eq!(info.kept_indices, vec![0, 2, 4]);
        assert!(info.has_removed());
        assert_eq!(clean.column(0), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_na_fail() {
        let result = NaHandler::process(&design_with_na(), NaAction::Fail);
        assert_eq!(result.unwrap_err(), NaError::NaValuesPresent { n_na: 2 });
    }

    #[test]
    fn test_na_fail_no_na() {
        let (clean, info) = NaHandler::process(&clean_design(), NaAction::Fail).unwrap();
        assert_eq!(clean.n_samples(), 3);
        assert!(!info.has_removed());
    }

    #[test]
    fn test_na_pass() {
        let (clean, info) = NaHandler::process(&design_with_na(), NaAction::Pass).unwrap();
        assert_eq!(clean.n_samples(), 5);
        assert!(clean.values()[(1, 0)].is_nan());
        assert_eq!(info.n_clean, 5);
    }

    #[test]
    fn test_all_na() {
        let design = DesignMatrix::from_columns(vec![("a", vec![f64::NAN; 3])]).unwrap();
        let result = NaHandler::process(&design, NaAction::Omit);
        assert_eq!(result.unwrap_err(), NaError::AllNa);
    }

    #[test]
    fn test_count_na_rows() {
        assert_eq!(NaHandler::count_na_rows(&design_with_na()), 2);
        assert_eq!(NaHandler::count_na_rows(&clean_design()), 0);
    }

    #[test]
    fn test_na_action_default() {
        assert_eq!(NaAction::default(), NaAction::Pass);
    }
}
