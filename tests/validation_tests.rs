//! Reference-value validation.
//!
//! Expected values were computed independently in double precision by
//! standardizing the design (sample standard deviation, `n - 1`), inverting
//! X'X with Gauss-Jordan elimination and evaluating both quadratic forms.

use approx::assert_relative_eq;
use contrast_vif::core::DesignMatrix;
use contrast_vif::estimate_contrast_vifs;

const TOL: f64 = 1e-9;

const EXPECTED_CUE_VS_TARGET: f64 = 1.1049470722657102;
const EXPECTED_CUE_PLUS_TARGET: f64 = 2.060402177613303;
const EXPECTED_RT: f64 = 1.775286336505888;
const EXPECTED_MIX: f64 = 2.634960576118257;

fn cue_target_design() -> DesignMatrix {
    DesignMatrix::from_columns(vec![
        ("intercept", vec![1.0; 10]),
        ("cue", vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]),
        ("target", vec![0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0]),
        (
            "rt",
            vec![0.42, 0.0, 0.35, 0.61, 0.0, 0.58, 0.12, 0.49, 0.27, 0.0],
        ),
    ])
    .expect("valid design")
}

#[test]
fn test_reference_contrasts() {
    let vifs = estimate_contrast_vifs(
        &cue_target_design(),
        [
            ("cue_vs_target", "cue - target"),
            ("cue_plus_target", "cue + target"),
            ("rt", "rt"),
            ("mix", "0.5 * cue + 0.5 * target - rt"),
        ],
    )
    .expect("estimation should succeed");

    assert_eq!(vifs.retained_columns(), &["cue", "target", "rt"]);
    assert_relative_eq!(vifs.get("cue_vs_target").unwrap(), EXPECTED_CUE_VS_TARGET, max_relative = TOL);
    assert_relative_eq!(vifs.get("cue_plus_target").unwrap(), EXPECTED_CUE_PLUS_TARGET, max_relative = TOL);
    assert_relative_eq!(vifs.get("rt").unwrap(), EXPECTED_RT, max_relative = TOL);
    assert_relative_eq!(vifs.get("mix").unwrap(), EXPECTED_MIX, max_relative = TOL);
}

#[test]
fn test_reference_variance_components() {
    let vifs = estimate_contrast_vifs(&cue_target_design(), [("mix", "(cue + target) / 2 - rt")])
        .expect("estimation should succeed");
    let mix = vifs.entry("mix").expect("mix present");

    // Standardized columns have unit sum of squares, so D⁻¹ is the identity
    assert_relative_eq!(mix.best_variance, 1.5, max_relative = TOL);
    assert_relative_eq!(mix.true_variance, 3.9524408641773867, max_relative = TOL);
}
