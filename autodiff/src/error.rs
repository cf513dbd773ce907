//! Error types for tree building and evaluation.

use std::fmt;

use thiserror::Error;

/// The exponent of a rejected `Pow` node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exponent {
    /// A literal that is negative, fractional, non-finite or above
    /// `i32::MAX`.
    Literal(f64),
    /// Any subtree other than a literal.
    NonConstant,
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exponent::Literal(c) => write!(f, "`{c}`"),
            Exponent::NonConstant => f.write_str("(non-constant subexpression)"),
        }
    }
}

/// Why evaluating a tree failed.
///
/// Evaluation is deterministic, so retrying with the same tree and
/// seed reproduces the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A `Pow` exponent is not a literal whole number in `0..=i32::MAX`.
    ///
    /// Whole numbers above `i32::MAX` (`3e10`) are rejected as well,
    /// since powers are taken with [`Dual::powi`](dual_algebra::Dual::powi).
    #[error("unsupported exponent {exponent}: expected a non-negative integer literal")]
    UnsupportedExponent {
        /// What the exponent child was.
        exponent: Exponent,
    },
    /// A `Call` names a function missing from the registry.
    #[error("unknown function `{name}`")]
    UnknownFunction {
        /// The unresolved name.
        name: String,
    },
}

/// Why a tree could not be built.
///
/// Only one free variable is supported; these are raised while
/// resolving variable names, before any tree reaches the evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A second distinct variable name appeared.
    #[error("multiple free variables: `{bound}` is already the free variable, found `{found}`")]
    MultipleFreeVariables {
        /// The name bound first.
        bound: String,
        /// The second name.
        found: String,
    },
    /// A name other than the declared free variable was referenced.
    #[error("unbound variable `{name}` (the free variable is `{bound}`)")]
    UnboundVariable {
        /// The unresolved name.
        name: String,
        /// The declared free variable.
        bound: String,
    },
}

/// Convenience alias for evaluation results.
pub type Result<T> = std::result::Result<T, EvalError>;
