//! Estimation options and configuration.

use super::na_action::NaAction;
use thiserror::Error;

/// Configuration options for contrast VIF estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct VifOptions {
    /// How missing values in retained columns are handled (default: `Pass`).
    pub na_action: NaAction,
    /// Pivot tolerance below which the cross-product matrix is treated as
    /// singular (default: 1e-10).
    pub singular_tolerance: f64,
}

impl Default for VifOptions {
    fn default() -> Self {
        Self {
            na_action: NaAction::Pass,
            singular_tolerance: 1e-10,
        }
    }
}

/// Errors that can occur when validating estimation options.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("singular_tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
}

impl VifOptions {
    /// Create a new builder for estimation options.
    pub fn builder() -> VifOptionsBuilder {
        VifOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.singular_tolerance.is_finite() && self.singular_tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.singular_tolerance));
        }
        Ok(())
    }
}

/// Builder for `VifOptions`.
#[derive(Debug, Clone, Default)]
pub struct VifOptionsBuilder {
    options: VifOptions,
}

impl VifOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-value policy.
    pub fn na_action(mut self, action: NaAction) -> Self {
        self.options.na_action = action;
        self
    }

    /// Set the singularity tolerance for the cross-product factorization.
    pub fn singular_tolerance(mut self, tol: f64) -> Self {
        self.options.singular_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<VifOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> VifOptions {
        self.options
    }
}
