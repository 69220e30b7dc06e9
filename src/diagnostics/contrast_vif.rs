//! Variance Inflation Factor (VIF) for linear contrasts.

use super::error::VifError;
use super::standardize::{standardize, StandardizedDesign};
use crate::contrast::{ContrastError, ContrastVectorBuilder, LinearExpressionParser};
use crate::core::{
    ContrastVif, ContrastVifs, DesignMatrix, NaAction, VifOptions, VifOptionsBuilder,
};
use crate::inference::{compute_spd_inverse, cross_product, diagonal_quadratic_form, quadratic_form};
use faer::{Col, Mat};
use std::collections::HashSet;

/// Variance of contrasts under the observed and the decorrelated design.
///
/// Holds `(X'X)⁻¹` and the inverse of its diagonal for a standardized design.
/// Both are computed once and shared by every contrast evaluated against the
/// model. For contrast weights `c`:
///
/// VIF = c'(X'X)⁻¹c / c'D⁻¹c
///
/// where D keeps only the diagonal of X'X, i.e. all between-regressor
/// correlations set to zero.
///
/// # Interpretation
/// - VIF = 1: the contrast is unaffected by correlation between regressors
/// - VIF > 1: correlation inflates the variance of the contrast estimate
/// - VIF < 1: correlation helps (e.g. a difference of negatively correlated
///   regressors)
#[derive(Debug, Clone)]
pub struct ContrastVarianceModel {
    columns: Vec<String>,
    xtx_inverse: Mat<f64>,
    diag_inverse: Col<f64>,
}

impl ContrastVarianceModel {
    /// Invert the cross-product matrix of a standardized design.
    ///
    /// # Errors
    ///
    /// - `VifError::DegenerateRegressor` if a diagonal entry of X'X is zero or
    ///   not finite (checked first)
    /// - `VifError::SingularDesign` if X'X is numerically singular within
    ///   `singular_tolerance`
    pub fn from_standardized(
        design: &StandardizedDesign,
        singular_tolerance: f64,
    ) -> Result<Self, VifError> {
        let columns = design.column_names().to_vec();
        let xtx = cross_product(design.matrix());
        let p = xtx.nrows();

        let mut diag_inverse = Col::zeros(p);
        for j in 0..p {
            let d = xtx[(j, j)];
            if !(d.is_finite() && d > 0.0) {
                return Err(VifError::DegenerateRegressor {
                    column: columns[j].clone(),
                });
            }
            diag_inverse[j] = 1.0 / d;
        }

        let xtx_inverse = compute_spd_inverse(&xtx, singular_tolerance).map_err(|e| {
            log::debug!("Cross-product factorization failed at {}", columns[e.pivot]);
            VifError::SingularDesign
        })?;

        Ok(Self {
            columns,
            xtx_inverse,
            diag_inverse,
        })
    }

    /// Column names contrast vectors must align with.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// `(X'X)⁻¹` of the standardized design.
    pub fn xtx_inverse(&self) -> &Mat<f64> {
        &self.xtx_inverse
    }

    /// VIF of a contrast given by its weight vector.
    pub fn evaluate(&self, name: &str, weights: &[f64]) -> Result<ContrastVif, VifError> {
        let p = self.columns.len();
        if weights.len() != p {
            return Err(VifError::DimensionMismatch {
                contrast: name.to_string(),
                expected: p,
                got: weights.len(),
            });
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(VifError::from_contrast(
                name,
                ContrastError::NonFiniteWeight { index },
            ));
        }

        let best_variance = diagonal_quadratic_form(weights, &self.diag_inverse);
        if best_variance == 0.0 {
            return Err(VifError::NullContrast {
                contrast: name.to_string(),
            });
        }
        let true_variance = quadratic_form(weights, &self.xtx_inverse);
        let vif = true_variance / best_variance;

        log::trace!(
            "Contrast {name}: true variance {true_variance:.6e}, best variance {best_variance:.6e}, VIF {vif:.4}"
        );
        if !vif.is_finite() {
            log::warn!("Contrast {name} has non-finite VIF {vif}");
        }

        Ok(ContrastVif {
            name: name.to_string(),
            vif,
            true_variance,
            best_variance,
        })
    }

    /// VIF of a contrast given by an expression, resolved with `builder`
    /// against the retained columns.
    pub fn evaluate_expression<B>(
        &self,
        name: &str,
        expression: &str,
        builder: &B,
    ) -> Result<ContrastVif, VifError>
    where
        B: ContrastVectorBuilder + ?Sized,
    {
        let weights = builder
            .build(expression, &self.columns)
            .map_err(|e| VifError::from_contrast(name, e))?;
        self.evaluate(name, &weights)
    }
}

/// Contrast VIF estimator.
///
/// # Example
///
/// ```
/// use contrast_vif::core::{DesignMatrix, NaAction};
/// use contrast_vif::diagnostics::ContrastVifEstimator;
///
/// let design = DesignMatrix::from_columns(vec![
///     ("intercept", vec![1.0; 6]),
///     ("go", vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]),
///     ("stop", vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0]),
/// ])
/// .unwrap();
///
/// let vifs = ContrastVifEstimator::builder()
///     .na_action(NaAction::Omit)
///     .build()
///     .estimate(&design, [("go_vs_stop", "go - stop")])
///     .unwrap();
///
/// assert!(vifs.get("go_vs_stop").unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContrastVifEstimator {
    options: VifOptions,
}

impl ContrastVifEstimator {
    /// Create a new estimator with the given options.
    pub fn new(options: VifOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the estimator.
    pub fn builder() -> ContrastVifEstimatorBuilder {
        ContrastVifEstimatorBuilder::default()
    }

    pub fn options(&self) -> &VifOptions {
        &self.options
    }

    /// Estimate contrast VIFs, parsing expressions with
    /// [`LinearExpressionParser`].
    pub fn estimate<I, K, V>(&self, design: &DesignMatrix, contrasts: I) -> Result<ContrastVifs, VifError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.estimate_with(design, contrasts, &LinearExpressionParser)
    }

    /// Estimate contrast VIFs with a caller-supplied contrast builder.
    ///
    /// Contrasts are `(name, expression)` pairs; the result keeps their
    /// order. The call either succeeds for every contrast or fails as a unit.
    pub fn estimate_with<I, K, V, B>(
        &self,
        design: &DesignMatrix,
        contrasts: I,
        builder: &B,
    ) -> Result<ContrastVifs, VifError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        B: ContrastVectorBuilder + ?Sized,
    {
        self.options.validate()?;
        let contrasts = collect_contrasts(contrasts)?;

        let standardized = standardize(design, self.options.na_action)?;
        let model =
            ContrastVarianceModel::from_standardized(&standardized, self.options.singular_tolerance)?;

        log::debug!(
            "Evaluating {} contrast(s) over {} regressor(s)",
            contrasts.len(),
            model.column_names().len()
        );
        let entries = evaluate_all(&model, &contrasts, builder)?;

        Ok(ContrastVifs::new(
            entries,
            standardized.column_names().to_vec(),
            standardized.dropped_columns().to_vec(),
        ))
    }
}

fn collect_contrasts<I, K, V>(contrasts: I) -> Result<Vec<(String, String)>, VifError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut seen = HashSet::new();
    let mut collected = Vec::new();
    for (name, expression) in contrasts {
        let name = name.into();
        if !seen.insert(name.clone()) {
            return Err(VifError::DuplicateContrast(name));
        }
        collected.push((name, expression.into()));
    }
    Ok(collected)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<B>(
    model: &ContrastVarianceModel,
    contrasts: &[(String, String)],
    builder: &B,
) -> Result<Vec<ContrastVif>, VifError>
where
    B: ContrastVectorBuilder + ?Sized,
{
    contrasts
        .iter()
        .map(|(name, expression)| model.evaluate_expression(name, expression, builder))
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_all<B>(
    model: &ContrastVarianceModel,
    contrasts: &[(String, String)],
    builder: &B,
) -> Result<Vec<ContrastVif>, VifError>
where
    B: ContrastVectorBuilder + ?Sized,
{
    use rayon::prelude::*;

    contrasts
        .par_iter()
        .map(|(name, expression)| model.evaluate_expression(name, expression, builder))
        .collect()
}

/// Builder for `ContrastVifEstimator`.
#[derive(Debug, Clone, Default)]
pub struct ContrastVifEstimatorBuilder {
    builder: VifOptionsBuilder,
}

impl ContrastVifEstimatorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-value policy.
    pub fn na_action(mut self, action: NaAction) -> Self {
        self.builder = self.builder.na_action(action);
        self
    }

    /// Set the singularity tolerance for the cross-product factorization.
    pub fn singular_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.singular_tolerance(tol);
        self
    }

    /// Build the estimator. Options are validated when estimating.
    pub fn build(self) -> ContrastVifEstimator {
        ContrastVifEstimator::new(self.builder.build_unchecked())
    }
}
