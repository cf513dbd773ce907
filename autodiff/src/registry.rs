//! The elementary-function table consulted by `Call` nodes.
//!
//! Each entry maps a name to a dual-level rule that computes the
//! function value and carries the derivative through the chain rule.
//! A host can add its own functions:
//!
//! ```
//! use autodiff::{Dual, Registry};
//!
//! // tanh(a + a′·ε) = tanh a + (a′·(1 − tanh² a))·ε
//! fn tanh(a: Dual<f64>) -> Dual<f64> {
//!     let t = a.value.tanh();
//!     Dual::new(t, a.derivative * (1.0 - t * t))
//! }
//!
//! let mut registry = Registry::standard();
//! registry.register("tanh", tanh);
//! assert!(registry.resolve("tanh").is_some());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dual_algebra::Dual;

/// A unary function lifted to dual numbers.
pub type UnaryDualOp = fn(Dual<f64>) -> Dual<f64>;

/// Name → rule lookup for `Call` dispatch.
#[derive(Clone)]
pub struct Registry {
    ops: HashMap<Arc<str>, UnaryDualOp>,
}

impl Registry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Registry {
            ops: HashMap::new(),
        }
    }

    /// `exp`, `cos`, `sin`, `ln` and `sqrt`.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.insert("exp", Dual::<f64>::exp);
        registry.insert("cos", Dual::<f64>::cos);
        registry.insert("sin", Dual::<f64>::sin);
        registry.insert("ln", Dual::<f64>::ln);
        registry.insert("sqrt", Dual::<f64>::sqrt);
        registry
    }

    /// Add or replace `name`, returning the rule it displaced.
    pub fn register(&mut self, name: impl Into<Arc<str>>, op: UnaryDualOp) -> Option<UnaryDualOp> {
        let name = name.into();
        let displaced = self.insert(Arc::clone(&name), op);
        tracing::debug!(name = %name, replaced = displaced.is_some(), "registered elementary function");
        displaced
    }

    /// The rule registered as `name`.
    pub fn resolve(&self, name: &str) -> Option<UnaryDualOp> {
        self.ops.get(name).copied()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ops.keys().map(|k| &**k).collect();
        names.sort_unstable();
        names
    }

    fn insert(&mut self, name: impl Into<Arc<str>>, op: UnaryDualOp) -> Option<UnaryDualOp> {
        self.ops.insert(name.into(), op)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(a: Dual<f64>) -> Dual<f64> {
        a * a
    }

    #[test]
    fn standard_seeds_exp_and_cos() {
        let registry = Registry::standard();
        assert_eq!(registry.names(), vec!["cos", "exp", "ln", "sin", "sqrt"]);

        let exp = registry.resolve("exp").unwrap();
        assert_eq!(exp(Dual::variable(0.0)), Dual::new(1.0, 1.0));

        let cos = registry.resolve("cos").unwrap();
        assert_eq!(cos(Dual::variable(0.0)), Dual::variable(0.0).cos());
    }

    #[test]
    fn empty_resolves_nothing() {
        let registry = Registry::empty();
        assert!(registry.resolve("exp").is_none());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn register_adds_and_replaces() {
        let mut registry = Registry::empty();
        assert!(registry.register("sq", square).is_none());
        assert!(registry.contains("sq"));

        let displaced = registry.register("sq", Dual::<f64>::exp);
        assert!(displaced.is_some());
        let sq = registry.resolve("sq").unwrap();
        assert_eq!(sq(Dual::variable(0.0)), Dual::new(1.0, 1.0));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(Registry::standard().resolve("Exp").is_none());
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(Registry::default().names(), Registry::standard().names());
    }

    #[test]
    fn debug_lists_names() {
        let mut registry = Registry::empty();
        registry.register("exp", Dual::<f64>::exp);
        assert_eq!(format!("{registry:?}"), r#"{"exp"}"#);
    }

    #[test]
    fn rules_can_be_composed_from_dual_arithmetic() {
        // sinh a = (e^a - e^-a) / 2
        fn sinh(a: Dual<f64>) -> Dual<f64> {
            (a.exp() - (-a).exp()) / Dual::constant(2.0)
        }

        let mut registry = Registry::empty();
        registry.register("sinh", sinh);
        let rule = registry.resolve("sinh").unwrap();
        assert_eq!(rule(Dual::variable(0.0)), Dual::new(0.0, 1.0));
    }
}
