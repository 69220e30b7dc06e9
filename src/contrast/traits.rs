//! Contrast vector builder interface.

use thiserror::Error;

/// Errors raised while turning a contrast expression into weights.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContrastError {
    #[error("unknown regressor `{name}`")]
    UnknownRegressor { name: String },

    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("non-linear term at position {position}: regressors can only be scaled by constants")]
    Nonlinear { position: usize },

    #[error("division by zero at position {position}")]
    DivisionByZero { position: usize },

    #[error("expression must be a linear combination of regressors without a constant term")]
    ConstantTerm,

    #[error("weight {index} is not finite")]
    NonFiniteWeight { index: usize },
}

/// Turns a contrast expression into a weight vector aligned with `columns`.
///
/// Implementations must return exactly one weight per column, in column
/// order. Closures with the matching signature implement this trait.
///
/// # Example
///
/// ```
/// use contrast_vif::contrast::{ContrastError, ContrastVectorBuilder};
///
/// // Every contrast weights all regressors equally
/// let uniform = |_: &str, columns: &[String]| -> Result<Vec<f64>, ContrastError> {
///     Ok(vec![1.0 / columns.len() as f64; columns.len()])
/// };
///
/// let columns = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(uniform.build("mean", &columns).unwrap(), vec![0.5, 0.5]);
/// ```
pub trait ContrastVectorBuilder: Send + Sync {
    /// Build the weight vector for `expression` over `columns`.
    fn build(&self, expression: &str, columns: &[String]) -> Result<Vec<f64>, ContrastError>;
}

impl<F> ContrastVectorBuilder for F
where
    F: Fn(&str, &[String]) -> Result<Vec<f64>, ContrastError> + Send + Sync,
{
    fn build(&self, expression: &str, columns: &[String]) -> Result<Vec<f64>, ContrastError> {
        self(expression, columns)
    }
}
