//! Variance inflation factors for linear contrasts.
//!
//! Multicollinearity between regressors inflates the variance of their
//! estimated coefficients. The classic per-regressor VIF measures that effect
//! for single coefficients; this crate measures it for *contrasts*, linear
//! combinations such as `go - stop`, by comparing the contrast variance under
//! the observed design with its variance if all regressors were uncorrelated.
//!
//! # Example
//!
//! ```rust
//! use contrast_vif::prelude::*;
//!
//! let design = DesignMatrix::from_columns(vec![
//!     ("intercept", vec![1.0; 8]),
//!     ("go", vec![1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0]),
//!     ("stop", vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]),
//!     ("rt", vec![0.4, 0.1, 0.9, 0.5, 0.0, 0.7, 0.2, 0.0]),
//! ])
//! .unwrap();
//!
//! let vifs = estimate_contrast_vifs(
//!     &design,
//!     [("go_vs_stop", "go - stop"), ("rt", "rt")],
//! )
//! .unwrap();
//!
//! // Result order follows the contrast order
//! assert_eq!(vifs.names(), vec!["go_vs_stop", "rt"]);
//! // The intercept is constant and took no part in the estimate
//! assert_eq!(vifs.dropped_columns(), &["intercept"]);
//! ```

pub mod contrast;
pub mod core;
pub mod diagnostics;
pub mod inference;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::contrast::{ContrastError, ContrastVectorBuilder, LinearExpressionParser};
    pub use crate::core::{
        ContrastVif, ContrastVifs, DesignError, DesignMatrix, NaAction, NaError, VifOptions,
        VifOptionsBuilder,
    };
    pub use crate::diagnostics::{
        standardize, ContrastVarianceModel, ContrastVifEstimator, StandardizedDesign, VifError,
    };
    pub use crate::estimate_contrast_vifs;
}

pub use crate::contrast::{ContrastError, ContrastVectorBuilder, LinearExpressionParser};
pub use crate::core::{ContrastVif, ContrastVifs, DesignMatrix, NaAction, VifOptions};
pub use crate::diagnostics::{ContrastVifEstimator, VifError};

/// Estimate the VIF of each contrast over `design` with default options.
///
/// `contrasts` is an ordered sequence of `(name, expression)` pairs, where
/// expressions are linear combinations of design column names such as
/// `"A - B"` or `"(A + B) / 2"`. Constant columns are dropped before
/// estimation and cannot be referenced. The returned mapping iterates in
/// contrast order.
///
/// # Errors
///
/// Returns the first [`VifError`] encountered; no partial result is produced.
pub fn estimate_contrast_vifs<I, K, V>(
    design: &DesignMatrix,
    contrasts: I,
) -> Result<ContrastVifs, VifError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    ContrastVifEstimator::default().estimate(design, contrasts)
}
