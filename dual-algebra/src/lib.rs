#![deny(missing_docs)]
//! # dual-algebra — dual numbers and recursion schemes
//!
//! **Part of the [autodiff workspace](../index.html)**
//!
//! Two building blocks for forward-mode differentiation of expression
//! trees:
//!
//! - [`Dual`]: a value paired with its first derivative. Sums,
//!   products, integer powers and elementary functions propagate the
//!   derivative by the sum, product, power and chain rules.
//! - [`fix`]: [`Fix`](fix::Fix) builds recursive trees from a
//!   one-layer base functor, and the folds in that module walk them
//!   bottom-up, optionally by reference and optionally with early exit
//!   on error.
//!
//! ## Quick start
//!
//! ```rust
//! use dual_algebra::Dual;
//!
//! // f(x) = e^x · cos x at x = 0: f = 1, f' = e^x(cos x − sin x) = 1
//! let x = Dual::variable(0.0);
//! let f = x.exp() * x.cos();
//!
//! assert_eq!(f.value, 1.0);
//! assert_eq!(f.derivative, 1.0);
//! ```
//!
//! All operations are pure: a `Dual` is `Copy`, nothing is mutated in
//! place, and values may be shared freely across threads.

pub mod dual;
pub mod fix;

pub use dual::Dual;
