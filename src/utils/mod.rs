//! Shared helpers.

mod matrix;

pub use matrix::{center_and_scale, columns_to_matrix, retained_columns};
