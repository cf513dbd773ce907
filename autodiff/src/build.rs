//! Name resolution for trees built at run time.
//!
//! Trees have exactly one free variable and [`Expr::variable`] takes no
//! name. A front end that reads named variables (a parser, a builder
//! fed by user input) resolves each name through a [`Binder`], which
//! rejects a second distinct variable before the tree is finished.
//!
//! ```
//! use autodiff::{Binder, BuildError, Expr};
//!
//! let mut names = Binder::new();
//! let t = names.var("t")?;
//! let f = Expr::mul(t, names.var("t")?);
//! assert_eq!(f.to_string(), "x * x");
//!
//! assert!(matches!(
//!     names.var("s"),
//!     Err(BuildError::MultipleFreeVariables { .. })
//! ));
//! # Ok::<(), BuildError>(())
//! ```

use crate::error::BuildError;
use crate::expr::Expr;

/// Resolves variable names to the single free variable.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    bound: Option<String>,
    declared: bool,
}

impl Binder {
    /// A binder that adopts the first name it resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder whose free variable is `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Binder {
            bound: Some(name.into()),
            declared: true,
        }
    }

    /// The free variable's name, once known.
    pub fn bound(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// Resolve `name` to the free variable.
    pub fn var(&mut self, name: &str) -> Result<Expr, BuildError> {
        match &self.bound {
            None => {
                self.bound = Some(name.to_string());
                Ok(Expr::variable())
            }
            Some(bound) if bound == name => Ok(Expr::variable()),
            Some(bound) if self.declared => Err(BuildError::UnboundVariable {
                name: name.to_string(),
                bound: bound.clone(),
            }),
            Some(bound) => Err(BuildError::MultipleFreeVariables {
                bound: bound.clone(),
                found: name.to_string(),
            }),
        }
    }
}
