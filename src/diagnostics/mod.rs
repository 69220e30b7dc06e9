//! Contrast VIF diagnostics.
//!
//! - **Standardization**: constant-column removal and unit sum-of-squares
//!   scaling, so that X'X is a correlation matrix
//! - **Contrast VIF**: variance of each contrast under the observed design
//!   relative to a design with uncorrelated regressors
//!
//! # Example
//!
//! ```rust,ignore
//! use contrast_vif::diagnostics::{standardize, ContrastVarianceModel};
//!
//! let standardized = standardize(&design, NaAction::Pass)?;
//! let model = ContrastVarianceModel::from_standardized(&standardized, 1e-10)?;
//! let vif = model.evaluate("go_vs_stop", &[1.0, -1.0])?;
//! ```

mod contrast_vif;
mod error;
mod standardize;

pub use contrast_vif::{ContrastVarianceModel, ContrastVifEstimator, ContrastVifEstimatorBuilder};
pub use error::VifError;
pub use standardize::{standardize, StandardizedDesign};
