//! Column utility functions.

use crate::core::DesignMatrix;
use faer::Mat;

/// Flag the columns that survive constant-column removal.
///
/// A column is kept when it has more than one distinct non-missing value or
/// when it contains any missing value, even if its observed values are all
/// equal.
pub fn retained_columns(design: &DesignMatrix) -> Vec<bool> {
    (0..design.n_columns())
        .map(|j| design.distinct_count(j) > 1 || design.has_missing(j))
        .collect()
}

/// Center column `j` and divide it by `divisor`. Missing entries stay missing.
pub fn center_and_scale(design: &DesignMatrix, j: usize, mean: f64, divisor: f64) -> Vec<f64> {
    let values = design.values();
    (0..design.n_samples())
        .map(|i| (values[(i, j)] - mean) / divisor)
        .collect()
}

/// Assemble equal-length columns into a matrix.
pub fn columns_to_matrix(columns: &[Vec<f64>], n_rows: usize) -> Mat<f64> {
    Mat::from_fn(n_rows, columns.len(), |i, j| columns[j][i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retained_columns() {
        let design = DesignMatrix::from_columns(vec![
            ("varying", vec![1.0, 2.0, 3.0]),
            ("constant", vec![1.0, 1.0, 1.0]),
            ("constant_with_na", vec![1.0, f64::NAN, 1.0]),
            ("all_na", vec![f64::NAN; 3]),
        ])
        .unwrap();

        assert_eq!(retained_columns(&design), vec![true, false, true, true]);
    }

    #[test]
    fn test_retained_columns_empty_rows() {
        let design = DesignMatrix::new(vec!["a", "b"], Mat::zeros(0, 2)).unwrap();
        assert_eq!(retained_columns(&design), vec![false, false]);
    }

    #[test]
    fn test_center_and_scale() {
        let design = DesignMatrix::from_columns(vec![("a", vec![1.0, f64::NAN, 5.0])]).unwrap();
        let scaled = center_and_scale(&design, 0, 3.0, 2.0);

        assert!((scaled[0] + 1.0).abs() < 1e-12);
        assert!(scaled[1].is_nan());
        assert!((scaled[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_columns_to_matrix() {
        let m = columns_to_matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]], 2);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m[(1, 0)], 2.0);
        assert_eq!(m[(0, 1)], 3.0);
    }
}
