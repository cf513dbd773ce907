//! Tabulates values and derivatives of expression trees.
//!
//! Trees are built with `expr!`, evaluated with seeds `Dual(x, 1)`,
//! and the two error kinds are shown at the end.
//!
//! Run with: `RUST_LOG=autodiff=debug cargo run --example derivative_table`

use autodiff::{expr, Dual, Evaluator, Expr, Registry};
use tracing_subscriber::EnvFilter;

// tanh a = (1 - e^(-2a)) / (1 + e^(-2a))
fn tanh(a: Dual<f64>) -> Dual<f64> {
    let one = Dual::constant(1.0);
    let e = (-(a + a)).exp();
    (one - e) / (one + e)
}

fn table(evaluator: &Evaluator, f: &Expr, points: &[f64]) {
    println!("f(x) = {f}");
    println!("  {:>8}  {:>14}  {:>14}", "x", "f(x)", "f'(x)");
    for (x, result) in points.iter().zip(evaluator.evaluate_many(f, points)) {
        match result {
            Ok(y) => println!("  {x:>8.3}  {:>14.6}  {:>14.6}", y.value, y.derivative),
            Err(err) => println!("  {x:>8.3}  error: {err}"),
        }
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut registry = Registry::standard();
    registry.register("tanh", tanh);
    let evaluator = Evaluator::new(registry);

    let points = [0.0, 0.5, 1.0, 1.5, 2.0];

    println!("=== Expression trees, forward-mode ===\n");

    table(&evaluator, &expr!(|x| x.powi(2)), &points);
    table(&evaluator, &expr!(|x| exp(x).powi(3) + cos(x) * x + pow(10, 2)), &points);
    table(&evaluator, &expr!(|x| sin(x * x)), &points);
    table(&evaluator, &expr!(|x| tanh(2 * x - 1)), &points);

    // The seed's derivative picks value-only evaluation.
    let f = expr!(|x| exp(x) * cos(x));
    let y = evaluator.evaluate(&f, Dual::new(1.0, 0.0));
    println!("{f} at x = 1 with seed derivative 0: {y:?}\n");

    println!("=== Rejected trees ===\n");
    for f in [expr!(|x| pow(x, x)), expr!(|x| pow(x, 0.5)), expr!(|x| erf(x))] {
        match evaluator.derivative_at(&f, 1.0) {
            Ok(y) => println!("{f}: {y:?}"),
            Err(err) => println!("{f}: {err}"),
        }
    }
}
