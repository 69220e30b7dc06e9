//! Example: contrast VIFs for a small task design.
//!
//! The design has two overlapping task regressors, a response-time modulator
//! and an intercept. The intercept is constant and is dropped automatically.

use contrast_vif::prelude::*;

fn main() {
    println!("=== Test 1: Task design ===\n");
    task_design();

    println!("\n\n=== Test 2: Correlation sweep ===\n");
    correlation_sweep();

    println!("\n\n=== Test 3: Errors ===\n");
    error_cases();
}

fn design() -> DesignMatrix {
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

fn task_design() {
    let vifs = estimate_contrast_vifs(
        &design(),
        [
            ("cue_vs_target", "cue - target"),
            ("task_mean", "(cue + target) / 2"),
            ("rt", "rt"),
        ],
    )
    .expect("estimation should succeed");

    println!("Retained: {:?}", vifs.retained_columns());
    println!("Dropped:  {:?}", vifs.dropped_columns());
    for entry in &vifs {
        println!(
            "  {:<14} VIF = {:.4}  (true var {:.4}, best var {:.4})",
            entry.name, entry.vif, entry.true_variance, entry.best_variance
        );
    }
    println!("VIF > 2: {:?}", vifs.high_vif_contrasts(2.0));
}

fn correlation_sweep() {
    let u = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
    let v = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];

    for r in [0.0, 0.25, 0.5, 0.75, 0.9] {
        let s: f64 = 1.0 - r * r;
        let b: Vec<f64> = (0..8).map(|i| r * u[i] + s.sqrt() * v[i]).collect();
        let design =
            DesignMatrix::from_columns(vec![("A", u.to_vec()), ("B", b)]).expect("valid design");

        let vif = estimate_contrast_vifs(&design, [("diff", "A - B")])
            .expect("estimation should succeed")
            .get("diff")
            .expect("diff present");
        println!("r = {r:.2}: VIF(A - B) = {vif:.4}  (1 / (1 - r) = {:.4})", 1.0 / (1.0 - r));
    }
}

fn error_cases() {
    let design = design();

    match estimate_contrast_vifs(&design, [("bad", "cue - intercept")]) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Referencing a dropped column: {e}"),
    }

    match estimate_contrast_vifs(&design, [("bad", "cue * target")]) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Non-linear expression: {e}"),
    }

    let collinear = DesignMatrix::from_columns(vec![
        ("A", vec![1.0, 2.0, 3.0, 4.0]),
        ("B", vec![2.0, 4.0, 6.0, 8.0]),
    ])
    .expect("valid design");
    match estimate_contrast_vifs(&collinear, [("diff", "A - B")]) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Collinear regressors: {e}"),
    }
}
