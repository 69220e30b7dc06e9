//! Common test utilities and design generators.

#![allow(dead_code)]

use contrast_vif::core::DesignMatrix;

/// Two centered, orthogonal, equal-norm columns of length `n` (a multiple of 4).
fn orthogonal_basis(n: usize) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(n % 4, 0, "n must be a multiple of 4");
    let u = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let v = (0..n).map(|i| if i % 4 < 2 { 1.0 } else { -1.0 }).collect();
    (u, v)
}

/// Design with regressors `A` and `B` whose sample correlation is exactly `r`.
pub fn correlated_pair(n: usize, r: f64) -> DesignMatrix {
    let (u, v) = orthogonal_basis(n);
    let s = (1.0 - r * r).sqrt();
    let b = (0..n).map(|i| r * u[i] + s * v[i]).collect();
    DesignMatrix::from_columns(vec![("A", u), ("B", b)]).expect("valid design")
}

/// Design of `n_columns` mutually orthogonal +/-1 columns over 2^n_columns rows.
///
/// Column j is the sign of bit j of the row index.
pub fn orthogonal_design(n_columns: usize) -> DesignMatrix {
    let n = 1usize << n_columns;
    let columns = (0..n_columns).map(|j| {
        let values = (0..n)
            .map(|i| if (i >> j) & 1 == 0 { 1.0 } else { -1.0 })
            .collect();
        (format!("x{j}"), values)
    });
    DesignMatrix::from_columns(columns).expect("valid design")
}

/// Pseudo-random design with mild correlation between neighbouring columns.
pub fn generate_design(n_samples: usize, n_columns: usize, seed: u64) -> DesignMatrix {
    // Simple deterministic "random" for reproducibility
    let mut rng_state = seed;
    let mut next_rand = || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((rng_state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    };

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(n_columns);
    for j in 0..n_columns {
        let col: Vec<f64> = (0..n_samples)
            .map(|i| {
                let noise = next_rand();
                match j {
                    0 => noise,
                    _ => 0.6 * columns[j - 1][i] + noise,
                }
            })
            .collect();
        columns.push(col);
    }

    DesignMatrix::from_columns(
        columns
            .into_iter()
            .enumerate()
            .map(|(j, values)| (format!("x{j}"), values)),
    )
    .expect("valid design")
}

/// Copy of `design` with an extra column appended.
pub fn with_column(design: &DesignMatrix, name: &str, values: Vec<f64>) -> DesignMatrix {
    let mut columns: Vec<(String, Vec<f64>)> = design
        .column_names()
        .iter()
        .enumerate()
        .map(|(j, n)| (n.clone(), design.column(j)))
        .collect();
    columns.push((name.to_string(), values));
    DesignMatrix::from_columns(columns).expect("valid design")
}

/// Copy of `design` with column `name` multiplied by `factor`.
pub fn with_scaled_column(design: &DesignMatrix, name: &str, factor: f64) -> DesignMatrix {
    let columns: Vec<(String, Vec<f64>)> = design
        .column_names()
        .iter()
        .enumerate()
        .map(|(j, n)| {
            let mut values = design.column(j);
            if n == name {
                values.iter_mut().for_each(|v| *v *= factor);
            }
            (n.clone(), values)
        })
        .collect();
    DesignMatrix::from_columns(columns).expect("valid design")
}

/// Approximate equality check for floating point values.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
