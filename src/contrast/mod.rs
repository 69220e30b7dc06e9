//! Contrast expressions and their weight vectors.
//!
//! The VIF engine only sees the [`ContrastVectorBuilder`] trait. The crate
//! ships [`LinearExpressionParser`] as the default builder; any other
//! implementation, including a plain closure, can be passed instead.

mod expression;
mod traits;

pub use expression::LinearExpressionParser;
pub use traits::{ContrastError, ContrastVectorBuilder};
