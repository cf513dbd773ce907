//! Fixed-point types and folds over recursive trees.
//!
//! A recursive tree is described by a *base functor*: one layer of the
//! tree with a hole `X` wherever a child goes. [`Fix`] ties the knot
//! and the fold functions walk the result bottom-up:
//!
//! - [`TypeApp`]: higher-kinded type encoding
//! - [`Functor`]: map over the holes of one layer
//! - [`Project`]: borrow the holes of one layer
//! - [`Traverse`]: map over the holes with a fallible function
//! - [`Fix`]: least fixed point (μF)
//! - [`fold`], [`fold_ref`], [`try_fold_ref`]: catamorphisms
//!
//! # Example
//!
//! ```rust
//! use dual_algebra::fix::{fold_ref, Fix, Functor, Project, TypeApp};
//!
//! // Sum = Lit(i32) | Add(X, X)
//! enum SumF<X> {
//!     Lit(i32),
//!     Add(X, X),
//! }
//!
//! struct SumTag;
//!
//! impl TypeApp for SumTag {
//!     type Applied<X> = SumF<X>;
//! }
//!
//! impl Functor for SumTag {
//!     fn fmap<X, Y, G>(fx: SumF<X>, mut g: G) -> SumF<Y>
//!     where
//!         G: FnMut(X) -> Y,
//!     {
//!         match fx {
//!             SumF::Lit(n) => SumF::Lit(n),
//!             SumF::Add(l, r) => SumF::Add(g(l), g(r)),
//!         }
//!     }
//! }
//!
//! impl Project for SumTag {
//!     fn project<X>(fx: &SumF<X>) -> SumF<&X> {
//!         match fx {
//!             SumF::Lit(n) => SumF::Lit(*n),
//!             SumF::Add(l, r) => SumF::Add(l, r),
//!         }
//!     }
//! }
//!
//! let tree: Fix<SumTag> = Fix::new(SumF::Add(
//!     Fix::new(SumF::Lit(1)),
//!     Fix::new(SumF::Add(Fix::new(SumF::Lit(2)), Fix::new(SumF::Lit(3)))),
//! ));
//!
//! // The tree is only borrowed, so it can be folded again.
//! let total = fold_ref(&tree, |layer: SumF<i32>| match layer {
//!     SumF::Lit(n) => n,
//!     SumF::Add(l, r) => l + r,
//! });
//! let leaves = fold_ref(&tree, |layer: SumF<usize>| match layer {
//!     SumF::Lit(_) => 1,
//!     SumF::Add(l, r) => l + r,
//! });
//! assert_eq!((total, leaves), (6, 3));
//! ```

/// A **type constructor** encoding via associated types.
///
/// Rust has no higher-kinded types, so `F : Type → Type` is written as
/// a marker type `F` with an associated `Applied<X>` standing for
/// `F(X)`.
pub trait TypeApp {
    /// The result of applying this type constructor to `X`.
    type Applied<X>;
}

/// A **functor** over the holes of one layer.
///
/// Laws (not enforced by type system):
///
/// - **Identity**: `fmap id = id`
/// - **Composition**: `fmap g ∘ fmap f = fmap (g ∘ f)`
pub trait Functor: TypeApp {
    /// Map a function over the holes.
    fn fmap<X, Y, G>(fx: Self::Applied<X>, g: G) -> Self::Applied<Y>
    where
        G: FnMut(X) -> Y;
}

/// Borrow the holes of a layer: `&F(X) → F(&X)`.
///
/// Non-hole payload is copied or cheaply cloned into the projected
/// layer.
pub trait Project: TypeApp {
    /// View a borrowed layer as a layer of borrows.
    fn project<X>(fx: &Self::Applied<X>) -> Self::Applied<&X>;
}

/// A functor whose holes can be visited with a fallible function.
///
/// Holes are visited left to right and the first `Err` is returned
/// without visiting the remaining holes.
pub trait Traverse: Functor {
    /// Map a fallible function over the holes.
    fn traverse<X, Y, E, G>(fx: Self::Applied<X>, g: G) -> Result<Self::Applied<Y>, E>
    where
        G: FnMut(X) -> Result<Y, E>;
}

/// The **least fixed point** (μF) of a functor F.
///
/// `Fix<F> ≅ F(Fix<F>)`, witnessed by [`Fix::new`] and [`Fix::out`].
/// Each node exclusively owns its children, so a `Fix` is always a
/// finite tree: no sharing and no cycles.
///
/// `Fix<F>` is `Send`/`Sync` exactly when `F::Applied<Fix<F>>` is.
#[repr(transparent)]
pub struct Fix<F: TypeApp>(Box<F::Applied<Fix<F>>>);

impl<F: TypeApp> Fix<F> {
    /// Wrap one layer: `F(Fix F) → Fix F`.
    #[inline]
    pub fn new(node: F::Applied<Fix<F>>) -> Self {
        Fix(Box::new(node))
    }

    /// Unwrap one layer, consuming the `Fix`.
    #[inline]
    pub fn out(self) -> F::Applied<Fix<F>> {
        *self.0
    }

    /// Borrow one layer.
    #[inline]
    pub fn as_out(&self) -> &F::Applied<Fix<F>> {
        &self.0
    }
}

/// A **catamorphism** consuming the tree.
///
/// Applies `alg` to every layer from the leaves up. Recursion depth is
/// the depth of the tree.
pub fn fold<F, A>(t: Fix<F>, alg: impl FnMut(F::Applied<A>) -> A) -> A
where
    F: Functor,
{
    fn go<F, A>(t: Fix<F>, alg: &mut impl FnMut(F::Applied<A>) -> A) -> A
    where
        F: Functor,
    {
        let node = t.out();
        let mapped = F::fmap(node, |child| go::<F, A>(child, alg));
        alg(mapped)
    }

    let mut alg = alg;
    go::<F, A>(t, &mut alg)
}

/// A catamorphism over a borrowed tree.
///
/// Same post-order walk as [`fold`], but the tree is left intact and
/// may be folded again.
pub fn fold_ref<F, A>(t: &Fix<F>, alg: impl FnMut(F::Applied<A>) -> A) -> A
where
    F: Functor + Project,
{
    fn go<F, A>(t: &Fix<F>, alg: &mut impl FnMut(F::Applied<A>) -> A) -> A
    where
        F: Functor + Project,
    {
        let layer = F::project(t.as_out());
        let mapped = F::fmap(layer, |child| go::<F, A>(child, alg));
        alg(mapped)
    }

    let mut alg = alg;
    go::<F, A>(t, &mut alg)
}

/// A fallible catamorphism over a borrowed tree.
///
/// Children are folded left to right before their parent. The first
/// error, whether from a child or from `alg` itself, ends the walk and
/// is returned as is.
pub fn try_fold_ref<F, A, E>(
    t: &Fix<F>,
    alg: impl FnMut(F::Applied<A>) -> Result<A, E>,
) -> Result<A, E>
where
    F: Traverse + Project,
{
    fn go<F, A, E>(
        t: &Fix<F>,
        alg: &mut impl FnMut(F::Applied<A>) -> Result<A, E>,
    ) -> Result<A, E>
    where
        F: Traverse + Project,
    {
        let layer = F::project(t.as_out());
        let mapped = F::traverse(layer, |child| go::<F, A, E>(child, alg))?;
        alg(mapped)
    }

    let mut alg = alg;
    go::<F, A, E>(t, &mut alg)
}
