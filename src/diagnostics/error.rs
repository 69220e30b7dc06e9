//! Errors raised by contrast VIF estimation.

use crate::contrast::ContrastError;
use crate::core::{NaError, OptionsError};
use thiserror::Error;

/// Errors that can occur while estimating contrast VIFs.
#[derive(Debug, Error, PartialEq)]
pub enum VifError {
    #[error("cross-product matrix is singular: retained regressors are perfectly collinear")]
    SingularDesign,

    #[error("regressor `{column}` has zero variance or missing values after preprocessing")]
    DegenerateRegressor { column: String },

    #[error("contrast `{contrast}` references unknown regressor `{name}`")]
    UnknownRegressor { contrast: String, name: String },

    #[error("contrast `{contrast}` has {got} weights but the design has {expected} retained columns")]
    DimensionMismatch {
        contrast: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid contrast `{contrast}`: {source}")]
    InvalidContrast {
        contrast: String,
        #[source]
        source: ContrastError,
    },

    #[error("contrast `{contrast}` has all-zero weights")]
    NullContrast { contrast: String },

    #[error("duplicate contrast name `{0}`")]
    DuplicateContrast(String),

    #[error("no regressors left after removing constant columns")]
    EmptyDesign,

    #[error(transparent)]
    Missing(#[from] NaError),

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

impl VifError {
    /// Attach a contrast name to a builder error.
    pub(crate) fn from_contrast(contrast: &str, error: ContrastError) -> Self {
        match error {
            ContrastError::UnknownRegressor { name } => VifError::UnknownRegressor {
                contrast: contrast.to_string(),
                name,
            },
            source => VifError::InvalidContrast {
                contrast: contrast.to_string(),
                source,
            },
        }
    }
}
