//! Expression trees over a single free variable.
//!
//! An [`Expr`] is the fixed point of the base functor [`ExprF`]: each
//! node owns its children outright, so a tree is finite, acyclic and
//! never shares subtrees. Trees are immutable once built; evaluation
//! and the structural queries here only borrow them.
//!
//! ```
//! use autodiff::Expr;
//!
//! // exp(x)^3 + cos(x) * x + 10^2
//! let x = Expr::variable;
//! let f = Expr::add(
//!     Expr::add(
//!         Expr::pow(Expr::exp(x()), Expr::constant(3.0)),
//!         Expr::mul(Expr::cos(x()), x()),
//!     ),
//!     Expr::pow(Expr::constant(10.0), Expr::constant(2.0)),
//! );
//!
//! assert_eq!(f.to_string(), "exp(x)^3 + cos(x) * x + 10^2");
//! assert_eq!(f.node_count(), 13);
//! ```

use std::fmt;
use std::sync::Arc;

use dual_algebra::fix::{fold_ref, Fix, Functor, Project, Traverse, TypeApp};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// `l + r`
    Add,
    /// `l * r`
    Mul,
    /// `l ^ r`; `r` must be a non-negative integer literal.
    Pow,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => " + ",
            BinOp::Mul => " * ",
            BinOp::Pow => "^",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinOp::Add => 1,
            BinOp::Mul => 2,
            BinOp::Pow => 3,
        }
    }
}

/// One layer of an expression, with `X` in every child position.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprF<X> {
    /// A literal.
    Constant(f64),
    /// The free variable.
    Variable,
    /// A binary operator applied to two children.
    Binary(BinOp, X, X),
    /// A named unary elementary function applied to one child.
    Call(Arc<str>, X),
}

/// Type-level tag for [`ExprF`].
pub struct ExprTag;

impl TypeApp for ExprTag {
    type Applied<X> = ExprF<X>;
}

impl Functor for ExprTag {
    fn fmap<X, Y, G>(fx: ExprF<X>, mut g: G) -> ExprF<Y>
    where
        G: FnMut(X) -> Y,
    {
        match fx {
            ExprF::Constant(c) => ExprF::Constant(c),
            ExprF::Variable => ExprF::Variable,
            ExprF::Binary(op, l, r) => {
                let l = g(l);
                ExprF::Binary(op, l, g(r))
            }
            ExprF::Call(name, arg) => ExprF::Call(name, g(arg)),
        }
    }
}

impl Project for ExprTag {
    fn project<X>(fx: &ExprF<X>) -> ExprF<&X> {
        match fx {
            ExprF::Constant(c) => ExprF::Constant(*c),
            ExprF::Variable => ExprF::Variable,
            ExprF::Binary(op, l, r) => ExprF::Binary(*op, l, r),
            ExprF::Call(name, arg) => ExprF::Call(Arc::clone(name), arg),
        }
    }
}

impl Traverse for ExprTag {
    fn traverse<X, Y, E, G>(fx: ExprF<X>, mut g: G) -> Result<ExprF<Y>, E>
    where
        G: FnMut(X) -> Result<Y, E>,
    {
        Ok(match fx {
            ExprF::Constant(c) => ExprF::Constant(c),
            ExprF::Variable => ExprF::Variable,
            ExprF::Binary(op, l, r) => {
                let l = g(l)?;
                ExprF::Binary(op, l, g(r)?)
            }
            ExprF::Call(name, arg) => ExprF::Call(name, g(arg)?),
        })
    }
}

/// An immutable expression tree in one free variable.
pub struct Expr(Fix<ExprTag>);

impl Expr {
    /// A literal.
    pub fn constant(c: f64) -> Self {
        Expr(Fix::new(ExprF::Constant(c)))
    }

    /// The free variable.
    pub fn variable() -> Self {
        Expr(Fix::new(ExprF::Variable))
    }

    /// `l + r`
    pub fn add(l: Expr, r: Expr) -> Self {
        Self::binary(BinOp::Add, l, r)
    }

    /// `l * r`
    pub fn mul(l: Expr, r: Expr) -> Self {
        Self::binary(BinOp::Mul, l, r)
    }

    /// `base ^ exponent`.
    ///
    /// Any tree is accepted here; evaluation rejects an exponent that
    /// is not a non-negative integer literal.
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::binary(BinOp::Pow, base, exponent)
    }

    /// `l op r`
    pub fn binary(op: BinOp, l: Expr, r: Expr) -> Self {
        Expr(Fix::new(ExprF::Binary(op, l.0, r.0)))
    }

    /// Apply the elementary function registered as `name`.
    ///
    /// Names are resolved at evaluation time.
    pub fn call(name: impl Into<Arc<str>>, arg: Expr) -> Self {
        Expr(Fix::new(ExprF::Call(name.into(), arg.0)))
    }

    /// `exp(arg)`
    pub fn exp(arg: Expr) -> Self {
        Self::call("exp", arg)
    }

    /// `cos(arg)`
    pub fn cos(arg: Expr) -> Self {
        Self::call("cos", arg)
    }

    /// The literal value, if the root is a `Constant` node.
    pub fn as_constant(&self) -> Option<f64> {
        match self.0.as_out() {
            ExprF::Constant(c) => Some(*c),
            _ => None,
        }
    }

    /// Fold the tree bottom-up with `alg`, children before parents,
    /// left child before right.
    ///
    /// ```
    /// use autodiff::{Expr, ExprF};
    ///
    /// let f = Expr::mul(Expr::cos(Expr::variable()), Expr::variable());
    /// let calls = f.fold(|layer: ExprF<usize>| match layer {
    ///     ExprF::Constant(_) | ExprF::Variable => 0,
    ///     ExprF::Binary(_, l, r) => l + r,
    ///     ExprF::Call(_, arg) => arg + 1,
    /// });
    /// assert_eq!(calls, 1);
    /// ```
    pub fn fold<A>(&self, alg: impl FnMut(ExprF<A>) -> A) -> A {
        fold_ref(&self.0, alg)
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.fold(|layer: ExprF<usize>| match layer {
            ExprF::Constant(_) | ExprF::Variable => 1,
            ExprF::Binary(_, l, r) => 1 + l + r,
            ExprF::Call(_, arg) => 1 + arg,
        })
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        self.fold(|layer: ExprF<usize>| match layer {
            ExprF::Constant(_) | ExprF::Variable => 1,
            ExprF::Binary(_, l, r) => 1 + l.max(r),
            ExprF::Call(_, arg) => 1 + arg,
        })
    }

    /// Whether any node refers to the free variable.
    ///
    /// A tree without one evaluates to a zero derivative for every seed.
    pub fn has_variable(&self) -> bool {
        self.fold(|layer: ExprF<bool>| match layer {
            ExprF::Constant(_) => false,
            ExprF::Variable => true,
            ExprF::Binary(_, l, r) => l || r,
            ExprF::Call(_, arg) => arg,
        })
    }

    pub(crate) fn as_fix(&self) -> &Fix<ExprTag> {
        &self.0
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        Expr(fold_ref(&self.0, Fix::<ExprTag>::new))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: &Fix<ExprTag>, b: &Fix<ExprTag>) -> bool {
            match (a.as_out(), b.as_out()) {
                (ExprF::Constant(a), ExprF::Constant(b)) => a == b,
                (ExprF::Variable, ExprF::Variable) => true,
                (ExprF::Binary(op1, l1, r1), ExprF::Binary(op2, l2, r2)) => {
                    op1 == op2 && same(l1, l2) && same(r1, r2)
                }
                (ExprF::Call(f, a), ExprF::Call(g, b)) => f == g && same(a, b),
                _ => false,
            }
        }

        same(&self.0, &other.0)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&format_args!("{self}")).finish()
    }
}

/// Infix rendering; the free variable prints as `x`.
///
/// Parentheses appear only where precedence or the right-associativity
/// of `^` needs them.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tightest binding for atoms and calls.
        const ATOM: u8 = 4;

        let (text, _) = self.fold(|layer: ExprF<(String, u8)>| match layer {
            ExprF::Constant(c) if c < 0.0 => (format!("({c})"), ATOM),
            ExprF::Constant(c) => (c.to_string(), ATOM),
            ExprF::Variable => ("x".to_string(), ATOM),
            ExprF::Call(name, (arg, _)) => (format!("{name}({arg})"), ATOM),
            ExprF::Binary(op, (l, lp), (r, rp)) => {
                let p = op.precedence();
                // `^` groups to the right, `+` and `*` to the left.
                let (l_min, r_min) = match op {
                    BinOp::Pow => (p + 1, p),
                    BinOp::Add | BinOp::Mul => (p, p + 1),
                };
                let l = if lp < l_min { format!("({l})") } else { l };
                let r = if rp < r_min { format!("({r})") } else { r };
                (format!("{l}{}{r}", op.symbol()), p)
            }
        });
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::variable()
    }

    fn c(v: f64) -> Expr {
        Expr::constant(v)
    }

    #[test]
    fn display_respects_precedence() {
        // (x + 1) * x
        let e = Expr::mul(Expr::add(x(), c(1.0)), x());
        assert_eq!(e.to_string(), "(x + 1) * x");

        // x + 1 * x
        let e = Expr::add(x(), Expr::mul(c(1.0), x()));
        assert_eq!(e.to_string(), "x + 1 * x");
    }

    #[test]
    fn display_pow_groups_right() {
        let left = Expr::pow(Expr::pow(x(), c(2.0)), c(3.0));
        let right = Expr::pow(x(), Expr::pow(c(2.0), c(3.0)));
        assert_eq!(left.to_string(), "(x^2)^3");
        assert_eq!(right.to_string(), "x^2^3");
    }

    #[test]
    fn display_negative_literal() {
        let e = Expr::mul(c(-1.0), Expr::call("sin", x()));
        assert_eq!(e.to_string(), "(-1) * sin(x)");
    }

    #[test]
    fn structural_queries() {
        let e = Expr::add(Expr::exp(x()), Expr::pow(c(10.0), c(2.0)));
        assert_eq!(e.node_count(), 6);
        assert_eq!(e.depth(), 3);
        assert!(e.has_variable());
        assert!(!Expr::pow(c(10.0), c(2.0)).has_variable());
    }

    #[test]
    fn clone_is_deep_and_equal() {
        let e = Expr::mul(Expr::cos(x()), x());
        let copy = e.clone();
        drop(e);
        assert_eq!(copy, Expr::mul(Expr::cos(x()), x()));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Expr::add(x(), c(1.0)), Expr::add(x(), c(1.0)));
        assert_ne!(Expr::add(x(), c(1.0)), Expr::add(c(1.0), x()));
        assert_ne!(Expr::exp(x()), Expr::cos(x()));
        assert_ne!(Expr::add(x(), x()), Expr::mul(x(), x()));
    }

    #[test]
    fn as_constant_only_matches_literal_roots() {
        assert_eq!(c(3.0).as_constant(), Some(3.0));
        assert_eq!(x().as_constant(), None);
        assert_eq!(Expr::pow(c(10.0), c(2.0)).as_constant(), None);
    }

    #[test]
    fn debug_shows_infix() {
        assert_eq!(format!("{:?}", Expr::exp(x())), "Expr(exp(x))");
    }

    #[test]
    fn trees_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expr>();
    }
}
