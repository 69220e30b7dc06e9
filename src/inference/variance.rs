//! Cross-product inversion and contrast variance quadratic forms.

use faer::{Col, Mat};
use thiserror::Error;

/// The matrix is singular or too close to singular to invert.
#[derive(Debug, Error, PartialEq)]
#[error("matrix is singular or nearly singular (pivot {pivot})")]
pub struct SingularMatrix {
    /// Diagonal entry of R that failed the tolerance check.
    pub pivot: usize,
}

/// Compute X'X.
pub fn cross_product(x: &Mat<f64>) -> Mat<f64> {
    x.transpose() * x
}

/// Inverse of a symmetric positive definite matrix using QR decomposition.
///
/// A diagonal entry of R whose magnitude is not above `tolerance` times the
/// matching diagonal entry of the input (including NaN entries) is reported
/// as [`SingularMatrix`].
pub fn compute_spd_inverse(matrix: &Mat<f64>, tolerance: f64) -> Result<Mat<f64>, SingularMatrix> {
    let n = matrix.nrows();

    let qr: faer::linalg::solvers::Qr<f64> = matrix.qr();
    let q = qr.compute_Q();
    let r = qr.R();

    for j in 0..n {
        if !(r[(j, j)].abs() > tolerance * matrix[(j, j)].abs()) {
            return Err(SingularMatrix { pivot: j });
        }
    }

    // Solve R * X = Q' one column at a time
    let mut inv = Mat::zeros(n, n);
    let qt = q.transpose();

    for col in 0..n {
        for i in (0..n).rev() {
            let mut sum = qt[(i, col)];
            for k in (i + 1)..n {
                sum -= r[(i, k)] * inv[(k, col)];
            }
            inv[(i, col)] = sum / r[(i, i)];
        }
    }

    Ok(inv)
}

/// Compute c' M c.
pub fn quadratic_form(c: &[f64], m: &Mat<f64>) -> f64 {
    let p = c.len();
    let mut total = 0.0;
    for i in 0..p {
        let row: f64 = (0..p).map(|j| m[(i, j)] * c[j]).sum();
        total += c[i] * row;
    }
    total
}

/// Compute c' D c for a diagonal matrix D given by its diagonal.
pub fn diagonal_quadratic_form(c: &[f64], diag: &Col<f64>) -> f64 {
    c.iter().enumerate().map(|(i, &ci)| ci * ci * diag[i]).sum()
}
