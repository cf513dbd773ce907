//! Forward-mode evaluation of expression trees.
//!
//! [`Evaluator::evaluate`] binds a seed dual to the free variable and
//! folds the tree bottom-up, combining child duals with the matching
//! dual rule at every node. The seed's derivative chooses what comes
//! out: `1` for `d/dx`, `0` for the value alone.
//!
//! ```
//! use autodiff::{evaluate, Dual, Expr};
//!
//! // f(x) = x^2 at x = 2
//! let f = Expr::pow(Expr::variable(), Expr::constant(2.0));
//! let y = evaluate(&f, Dual::new(2.0, 1.0))?;
//!
//! assert_eq!(y.value, 4.0);
//! assert_eq!(y.derivative, 4.0);
//! # Ok::<(), autodiff::EvalError>(())
//! ```

use std::sync::OnceLock;

use dual_algebra::fix::try_fold_ref;
use dual_algebra::Dual;

use crate::error::{EvalError, Exponent, Result};
use crate::expr::{BinOp, Expr, ExprF};
use crate::registry::Registry;

/// Evaluate `expr` at `seed` with the standard registry.
pub fn evaluate(expr: &Expr, seed: Dual<f64>) -> Result<Dual<f64>> {
    static STANDARD: OnceLock<Evaluator> = OnceLock::new();
    STANDARD.get_or_init(Evaluator::standard).evaluate(expr, seed)
}

/// Evaluates trees against a fixed function registry.
///
/// An `Evaluator` holds no per-call state; one instance may serve
/// any number of threads at once.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    registry: Registry,
}

/// Per-node fold result: the node's dual, its literal value when the
/// node is a `Constant`, and whether the subtree is free of `Variable`.
#[derive(Clone, Copy)]
struct Evaluated {
    dual: Dual<f64>,
    literal: Option<f64>,
    constant: bool,
}

impl Evaluated {
    fn literal(c: f64) -> Self {
        Evaluated {
            dual: Dual::constant(c),
            literal: Some(c),
            constant: true,
        }
    }

    /// A variable-free subtree has derivative zero whatever its value.
    /// Overflowing constants (`exp(1000)`, `10^400`) would otherwise
    /// turn `0 · ∞` into a NaN derivative.
    fn computed(mut dual: Dual<f64>, constant: bool) -> Self {
        if constant {
            dual.derivative = 0.0;
        }
        Evaluated {
            dual,
            literal: None,
            constant,
        }
    }
}

impl Evaluator {
    /// An evaluator dispatching `Call` nodes through `registry`.
    pub fn new(registry: Registry) -> Self {
        Evaluator { registry }
    }

    /// An evaluator over [`Registry::standard`].
    pub fn standard() -> Self {
        Self::new(Registry::standard())
    }

    /// The function registry in use.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Evaluate `expr` with `seed` bound to the free variable.
    ///
    /// Every node is visited once, children before parents. The first
    /// failing node ends the walk; no partial result is returned.
    pub fn evaluate(&self, expr: &Expr, seed: Dual<f64>) -> Result<Dual<f64>> {
        try_fold_ref(expr.as_fix(), |layer| self.step(layer, seed))
            .map(|node| node.dual)
            .map_err(|error| {
                tracing::debug!(%error, tree = %expr, "evaluation failed");
                error
            })
    }

    /// `f(x)` without a derivative.
    pub fn value_at(&self, expr: &Expr, x: f64) -> Result<f64> {
        self.evaluate(expr, Dual::constant(x)).map(|y| y.value)
    }

    /// `f(x)` together with `f′(x)`.
    pub fn derivative_at(&self, expr: &Expr, x: f64) -> Result<Dual<f64>> {
        self.evaluate(expr, Dual::variable(x))
    }

    /// [`derivative_at`](Self::derivative_at) at every point, results in
    /// input order.
    ///
    /// With the `parallel` feature the points are spread across the
    /// rayon thread pool.
    pub fn evaluate_many(&self, expr: &Expr, points: &[f64]) -> Vec<Result<Dual<f64>>> {
        tracing::trace!(points = points.len(), nodes = expr.node_count(), "batch evaluation");

        #[cfg(feature = "parallel")]
        let results: Vec<_> = {
            use rayon::prelude::*;

            points
                .par_iter()
                .map(|&x| self.derivative_at(expr, x))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = points.iter().map(|&x| self.derivative_at(expr, x)).collect();

        results
    }

    fn step(&self, layer: ExprF<Evaluated>, seed: Dual<f64>) -> Result<Evaluated> {
        let (dual, constant) = match layer {
            ExprF::Constant(c) => return Ok(Evaluated::literal(c)),
            ExprF::Variable => (seed, false),
            ExprF::Binary(BinOp::Add, l, r) => (l.dual + r.dual, l.constant && r.constant),
            ExprF::Binary(BinOp::Mul, l, r) => (l.dual * r.dual, l.constant && r.constant),
            ExprF::Binary(BinOp::Pow, base, exponent) => {
                let k = integer_exponent(exponent.literal)?;
                (base.dual.powi(k), base.constant)
            }
            ExprF::Call(name, arg) => {
                let op = self
                    .registry
                    .resolve(&name)
                    .ok_or_else(|| EvalError::UnknownFunction {
                        name: name.to_string(),
                    })?;
                (op(arg.dual), arg.constant)
            }
        };
        Ok(Evaluated::computed(dual, constant))
    }
}

/// The power a `Pow` node raises its base to.
///
/// Only a literal whole number in `0..=i32::MAX` qualifies.
fn integer_exponent(literal: Option<f64>) -> Result<i32> {
    match literal {
        Some(c) if c >= 0.0 && c.fract() == 0.0 && c <= f64::from(i32::MAX) => Ok(c as i32),
        Some(c) => Err(EvalError::UnsupportedExponent {
            exponent: Exponent::Literal(c),
        }),
        None => Err(EvalError::UnsupportedExponent {
            exponent: Exponent::NonConstant,
        }),
    }
}
