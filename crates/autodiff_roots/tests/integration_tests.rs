//! Integration tests for root finding through the public API.
//!
//! Run with `RUST_LOG=autodiff_roots=debug` to see per-iteration events.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use autodiff_core::prelude::*;
use autodiff_roots::prelude::*;
use proptest::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn linear_system(v: &[Dual]) -> Result<Output, AdError> {
    // 2x + y = 0, x - 1 = 0
    Ok(Output::from(vec![2.0 * &v[0] + &v[1], &v[0] - 1.0]))
}

fn named(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

// ========================================
// Newton-Raphson
// ========================================

/// Test Newton on (x+2)(x-3) from x = 1 reaches the root at 3.
#[test]
fn test_newton_quadratic() {
    init_tracing();
    let f = differentiate(["x"], |v| Ok(((&v[0] + 2.0) * (&v[0] - 3.0)).into())).unwrap();

    let result = find_root(&f, RootMethod::NewtonRaphson, 1.0, &SolverConfig::default()).unwrap();
    assert_relative_eq!(result.root[0], 3.0, epsilon = 1e-8);
    assert_eq!(result.scalar().map(f64::round), Some(3.0));
}

/// Test Newton on x² + 1, which has no real root.
#[test]
fn test_newton_no_real_root() {
    init_tracing();
    let f = differentiate(["x"], |v| Ok((v[0].powi(2) + 1.0).into())).unwrap();

    let err = find_root(&f, RootMethod::NewtonRaphson, 1.0, &SolverConfig::new(1e-8, 500))
        .unwrap_err();
    assert!(err.is_non_convergence());
    assert!(!err.is_input_error());
}

/// Test Newton on a 2×2 linear system from a positional start.
#[test]
fn test_newton_linear_system() {
    init_tracing();
    let f = differentiate(["x", "y"], linear_system).unwrap();

    let result = find_root(
        &f,
        RootMethod::NewtonRaphson,
        vec![1.0, 2.0],
        &SolverConfig::default(),
    )
    .unwrap();
    assert_relative_eq!(result.root[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(result.root[1], -2.0, epsilon = 1e-10);
}

/// Test Newton through a function that uses a logarithm and power.
#[test]
fn test_newton_transcendental() {
    init_tracing();
    // x·ln(x) = 2
    let f = differentiate(["x"], |v| Ok((&v[0] * ln(&v[0])? - 2.0).into())).unwrap();

    let result = find_root(&f, RootMethod::NewtonRaphson, 2.0, &SolverConfig::default()).unwrap();
    let x = result.root[0];
    assert_relative_eq!(x * x.ln(), 2.0, epsilon = 1e-8);
}

// ========================================
// Bisection
// ========================================

/// Test bisection of x + y over [-1, 1]² lands on the origin.
#[test]
fn test_bisection_plane() {
    init_tracing();
    let f = differentiate(["x", "y"], |v| Ok((&v[0] + &v[1]).into())).unwrap();
    let interval = Interval::Bounds(vec![(-1.0, 1.0), (-1.0, 1.0)]);

    let result = find_root(&f, RootMethod::Bisection, interval, &SolverConfig::default()).unwrap();
    assert_eq!(result.root.to_vec(), vec![0.0, 0.0]);
}

/// Test bisection with a named interval and the alias "bisect".
#[test]
fn test_bisection_by_name() {
    init_tracing();
    let f = differentiate(["x"], |v| Ok((v[0].powi(3) - 8.0).into())).unwrap();
    let interval = Interval::Named {
        start: named(&[("x", 0.0)]),
        end: named(&[("x", 5.0)]),
    };

    let result = find_root_by_name(&f, "bisect", interval, &SolverConfig::default()).unwrap();
    assert_relative_eq!(result.root[0], 2.0, epsilon = 1e-8);
    assert_eq!(result.method, RootMethod::Bisection);
}

/// Test bisection reports missing sign changes before iterating.
#[test]
fn test_bisection_no_sign_change() {
    init_tracing();
    let f = differentiate(["x"], |v| Ok(exp(&v[0]).into())).unwrap();
    let err = find_root(
        &f,
        RootMethod::Bisection,
        Interval::Bounds(vec![(-1.0, 1.0)]),
        &SolverConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, SolverError::NoSignChange { components: vec![0] });
}

/// Test a root lying exactly on the interval boundary is returned.
#[test]
fn test_bisection_root_on_boundary() {
    init_tracing();
    let f = differentiate(["x"], |v| Ok((v[0].powi(2) - 4.0).into())).unwrap();
    let result = find_root(
        &f,
        RootMethod::Bisection,
        Interval::Bounds(vec![(0.0, 2.0)]),
        &SolverConfig::default(),
    )
    .unwrap();
    assert_eq!(result.scalar(), Some(2.0));
}

// ========================================
// Newton-Fourier
// ========================================

/// Test Newton-Fourier on the linear system from endpoints [1, 2] and [3, 4].
#[test]
fn test_newton_fourier_linear_system() {
    init_tracing();
    let f = differentiate(["x", "y"], linear_system).unwrap();
    let interval = Interval::from_endpoints(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();

    let result = find_root(&f, RootMethod::NewtonFourier, interval, &SolverConfig::default())
        .unwrap();
    assert_relative_eq!(result.root[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(result.root[1], -2.0, epsilon = 1e-10);
}

/// Test Newton-Fourier with named endpoints given out of order.
#[test]
fn test_newton_fourier_named() {
    init_tracing();
    let f = differentiate(["x", "y"], linear_system).unwrap();
    let interval = Interval::Named {
        start: named(&[("y", 2.0), ("x", 1.0)]),
        end: named(&[("y", 4.0), ("x", 3.0)]),
    };

    let result = find_root_by_name(&f, "n-f", interval, &SolverConfig::default()).unwrap();
    assert_relative_eq!(result.root[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(result.root[1], -2.0, epsilon = 1e-10);
}

// ========================================
// Input validation
// ========================================

/// Test each malformed request maps to its own error.
#[test]
fn test_input_errors() {
    let f = differentiate(["x", "y"], linear_system).unwrap();
    let config = SolverConfig::default();

    assert_eq!(
        find_root_by_name(&f, "golden-section", vec![1.0, 2.0], &config).unwrap_err(),
        SolverError::InvalidMethod("golden-section".to_string())
    );
    assert_eq!(
        find_root(
            &f,
            RootMethod::NewtonRaphson,
            Interval::Bounds(vec![(0.0, 1.0), (0.0, 1.0)]),
            &config
        )
        .unwrap_err(),
        SolverError::MissingStartValues
    );
    assert_eq!(
        find_root(&f, RootMethod::Bisection, vec![1.0, 2.0], &config).unwrap_err(),
        SolverError::MissingInterval
    );
    assert_eq!(
        find_root(
            &f,
            RootMethod::NewtonRaphson,
            StartValues::Named(named(&[("x", 1.0)])),
            &config
        )
        .unwrap_err(),
        SolverError::MissingKey("y".to_string())
    );
    assert_eq!(
        find_root(
            &f,
            RootMethod::NewtonRaphson,
            StartValues::Named(named(&[("x", 1.0), ("y", 1.0), ("z", 1.0)])),
            &config
        )
        .unwrap_err(),
        SolverError::TooManyKeys {
            expected: 2,
            got: 3
        }
    );
    assert_eq!(
        find_root(
            &f,
            RootMethod::NewtonFourier,
            Interval::Named {
                start: named(&[("x", 1.0), ("y", 2.0)]),
                end: named(&[("x", 3.0)]),
            },
            &config
        )
        .unwrap_err(),
        SolverError::IntervalKeyMismatch { start: 2, end: 1 }
    );
}

/// Test all three methods agree on a shared root.
#[test]
fn test_methods_agree() {
    init_tracing();
    let f = differentiate(["x"], |v| Ok((&v[0] * 2.0 - 1.0).into())).unwrap();
    let config = SolverConfig::default();

    let newton = find_root(&f, RootMethod::NewtonRaphson, 3.0, &config).unwrap();
    let bisect = find_root(
        &f,
        RootMethod::Bisection,
        Interval::Bounds(vec![(0.0, 3.0)]),
        &config,
    )
    .unwrap();
    let fourier = find_root(
        &f,
        RootMethod::NewtonFourier,
        Interval::Bounds(vec![(0.0, 3.0)]),
        &config,
    )
    .unwrap();

    for result in [&newton, &bisect, &fourier] {
        assert_relative_eq!(result.root[0], 0.5, epsilon = 1e-8);
    }
}

// ========================================
// Properties
// ========================================

proptest! {
    /// Newton finds the root of any non-degenerate linear function in one step.
    #[test]
    fn prop_newton_linear(a in 0.5f64..10.0, b in -10.0f64..10.0, x0 in -10.0f64..10.0) {
        let f = differentiate(["x"], move |v| Ok((&v[0] * a + b).into())).unwrap();
        let result = find_root(&f, RootMethod::NewtonRaphson, x0, &SolverConfig::default())
            .unwrap();
        prop_assert!((result.root[0] + b / a).abs() < 1e-8);
        prop_assert!(result.iterations <= 2);
    }

    /// Bisection on a bracketing interval always returns a point inside it.
    #[test]
    fn prop_bisection_stays_inside(root in -0.9f64..0.9) {
        let f = differentiate(["x"], move |v| Ok((&v[0] - root).into())).unwrap();
        let result = find_root(
            &f,
            RootMethod::Bisection,
            Interval::Bounds(vec![(-1.0, 1.0)]),
            &SolverConfig::default(),
        )
        .unwrap();
        prop_assert!(result.root[0] >= -1.0 && result.root[0] <= 1.0);
        prop_assert!((result.root[0] - root).abs() < 1e-8);
    }
}
