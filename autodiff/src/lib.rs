#![deny(missing_docs)]
//! Forward-mode automatic differentiation of expression trees.
//!
//! **Part of the [autodiff workspace](../index.html)**
//!
//! A function of one real variable is given as an [`Expr`] tree.
//! Evaluating the tree at a seed [`Dual`] yields the function value and
//! its exact first derivative in one bottom-up pass:
//!
//! - [`expr`]: the tree (`Constant`, `Variable`, `Add`/`Mul`/`Pow`,
//!   named function calls)
//! - [`registry`]: the dual-level rules behind function calls
//!   (`exp`, `cos`, `sin`, `ln`, `sqrt`, plus any you register)
//! - [`eval`]: the evaluator
//! - [`build`]: variable-name resolution for run-time tree builders
//! - [`expr!`] *(feature = "macros")*: build a tree from closure syntax
//!
//! # Example
//!
//! ```
//! use autodiff::{evaluate, Dual, Expr};
//!
//! // f(x) = cos(x) * x
//! let f = Expr::mul(Expr::cos(Expr::variable()), Expr::variable());
//!
//! // f(0) = 0, f'(0) = cos 0 − 0·sin 0 = 1
//! let y = evaluate(&f, Dual::variable(0.0))?;
//! assert_eq!((y.value, y.derivative), (0.0, 1.0));
//! # Ok::<(), autodiff::EvalError>(())
//! ```
//!
//! With the `macros` feature the same tree can be written inline:
//!
//! ```
//! # #[cfg(feature = "macros")] {
//! use autodiff::{expr, Expr};
//!
//! let f: Expr = expr!(|x| cos(x) * x);
//! assert_eq!(f, Expr::mul(Expr::cos(Expr::variable()), Expr::variable()));
//! # }
//! ```
//!
//! ## Features
//!
//! - **`macros`** *(enabled by default)*: re-exports [`expr!`].
//! - **`parallel`**: [`Evaluator::evaluate_many`] runs on the rayon
//!   thread pool.
//!
//! ## Logging
//!
//! Registry changes and evaluation failures are reported through
//! `tracing` at `debug` level; install a subscriber to see them.

pub mod build;
pub mod error;
pub mod eval;
pub mod expr;
pub mod registry;

pub use build::Binder;
pub use dual_algebra::Dual;
pub use error::{BuildError, EvalError, Exponent, Result};
pub use eval::{evaluate, Evaluator};
pub use expr::{BinOp, Expr, ExprF};
pub use registry::{Registry, UnaryDualOp};

#[cfg(feature = "macros")]
pub use autodiff_macros::expr;
