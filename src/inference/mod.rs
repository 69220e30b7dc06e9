//! Contrast variance computations.

mod variance;

pub use variance::{
    compute_spd_inverse, cross_product, diagonal_quadratic_form, quadratic_form, SingularMatrix,
};
