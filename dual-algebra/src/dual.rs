//! Dual numbers: a value paired with its first derivative.
//!
//! A dual number `a + a′·ε` (with `ε² = 0`) is a first-order Taylor
//! expansion of a function at a point. Every rule below produces a new
//! dual from its operands, so composing rules composes derivatives:
//!
//! - `(a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε`
//! - `(a + a′·ε) * (b + b′·ε) = ab + (a′b + ab′)·ε`
//! - `(a + a′·ε)^k = a^k + (k·a^(k-1)·a′)·ε`
//! - `exp(a + a′·ε) = e^a + (a′·e^a)·ε`
//! - `cos(a + a′·ε) = cos a + (-a′·sin a)·ε`
//!
//! # Example
//!
//! ```
//! use dual_algebra::Dual;
//!
//! // f(x) = x² + 2x at x = 3
//! let x = Dual::variable(3.0);
//! let f = x * x + Dual::constant(2.0) * x;
//!
//! assert_eq!(f.value, 15.0);
//! assert_eq!(f.derivative, 8.0);
//! ```

use num_traits::{Float, NumCast, One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A value together with its derivative with respect to one tracked
/// variable.
///
/// `Dual` is `Copy` and every operation returns a fresh value; operands
/// are never mutated.
///
/// # Seeding
///
/// The derivative component of the seed selects what is computed:
///
/// ```
/// use dual_algebra::Dual;
///
/// let f = |x: Dual<f64>| x * x * x;
///
/// // derivative = 1 asks for d/dx
/// let d = f(Dual::new(2.0, 1.0));
/// assert_eq!((d.value, d.derivative), (8.0, 12.0));
///
/// // derivative = 0 asks for the value only
/// let v = f(Dual::new(2.0, 0.0));
/// assert_eq!((v.value, v.derivative), (8.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<T> {
    /// The function value.
    pub value: T,
    /// The derivative with respect to the tracked variable.
    pub derivative: T,
}

impl<T> Dual<T> {
    /// Create a dual from an explicit value and derivative.
    pub fn new(value: T, derivative: T) -> Self {
        Dual { value, derivative }
    }

    /// A literal: derivative 0.
    ///
    /// ```
    /// use dual_algebra::Dual;
    ///
    /// let c = Dual::constant(5.0);
    /// assert_eq!(c.derivative, 0.0);
    /// ```
    pub fn constant(value: T) -> Self
    where
        T: Zero,
    {
        Dual {
            value,
            derivative: T::zero(),
        }
    }

    /// The tracked variable itself: derivative 1 (`dx/dx`).
    pub fn variable(value: T) -> Self
    where
        T: One,
    {
        Dual {
            value,
            derivative: T::one(),
        }
    }

    /// Non-negative integer power.
    ///
    /// For `f = a + a′·ε` computes `f^k = a^k + (k·a^(k-1)·a′)·ε`.
    ///
    /// `k = 0` yields `Dual(1, 0)` for every operand. The derivative
    /// term `0·a^(-1)` is taken to be zero, so `a = 0` does not
    /// produce a NaN. Negative `k` is outside the supported domain;
    /// the formula is still applied, with `k - 1` saturating at
    /// `i32::MIN`.
    ///
    /// ```
    /// use dual_algebra::Dual;
    ///
    /// let x = Dual::variable(2.0);
    /// let y = x.powi(3);
    /// assert_eq!(y.value, 8.0);
    /// assert_eq!(y.derivative, 12.0);
    ///
    /// let zero = Dual::variable(0.0).powi(0);
    /// assert_eq!(zero, Dual::new(1.0, 0.0));
    /// ```
    pub fn powi(self, k: i32) -> Self
    where
        T: Float,
    {
        if k == 0 {
            return Dual {
                value: T::one(),
                derivative: T::zero(),
            };
        }
        let coefficient = <T as NumCast>::from(k).unwrap_or_else(T::nan);
        Dual {
            value: self.value.powi(k),
            derivative: coefficient * self.value.powi(k.saturating_sub(1)) * self.derivative,
        }
    }

    /// Reciprocal: `1/(b + b′·ε) = (1/b) + (-b′/b²)·ε`.
    pub fn recip(self) -> Self
    where
        T: One + Div<Output = T> + Mul<Output = T> + Neg<Output = T> + Clone,
    {
        let b = self.value.clone();
        let b_squared = b.clone() * b.clone();

        Dual {
            value: T::one() / b,
            derivative: -(self.derivative / b_squared),
        }
    }

    /// Exponential: `exp(a + a′·ε) = e^a + (a′·e^a)·ε`.
    ///
    /// ```
    /// use dual_algebra::Dual;
    ///
    /// let f = Dual::variable(0.0).exp();
    /// assert_eq!(f.value, 1.0);
    /// assert_eq!(f.derivative, 1.0);
    /// ```
    pub fn exp(self) -> Self
    where
        T: Float,
    {
        let e = self.value.exp();
        Dual {
            value: e,
            derivative: self.derivative * e,
        }
    }

    /// Cosine: `cos(a + a′·ε) = cos a + (-a′·sin a)·ε`.
    ///
    /// ```
    /// use dual_algebra::Dual;
    ///
    /// let f = Dual::variable(0.0).cos();
    /// assert_eq!(f.value, 1.0);
    /// assert_eq!(f.derivative, 0.0);
    /// ```
    pub fn cos(self) -> Self
    where
        T: Float,
    {
        Dual {
            value: self.value.cos(),
            derivative: -self.derivative * self.value.sin(),
        }
    }

    /// Sine: `sin(a + a′·ε) = sin a + (a′·cos a)·ε`.
    pub fn sin(self) -> Self
    where
        T: Float,
    {
        Dual {
            value: self.value.sin(),
            derivative: self.derivative * self.value.cos(),
        }
    }

    /// Natural logarithm: `ln(a + a′·ε) = ln a + (a′/a)·ε`.
    pub fn ln(self) -> Self
    where
        T: Float,
    {
        Dual {
            value: self.value.ln(),
            derivative: self.derivative / self.value,
        }
    }

    /// Square root: `√(a + a′·ε) = √a + (a′/(2√a))·ε`.
    pub fn sqrt(self) -> Self
    where
        T: Float,
    {
        let root = self.value.sqrt();
        Dual {
            value: root,
            derivative: self.derivative / (root + root),
        }
    }
}

/// Sum rule: (a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε
impl<T: Add<Output = T>> Add for Dual<T> {
    type Output = Dual<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Dual {
            value: self.value + rhs.value,
            derivative: self.derivative + rhs.derivative,
        }
    }
}

/// Difference as the sum with the negation: `f - g = f + (-g)`.
#[allow(clippy::suspicious_arithmetic_impl)]
impl<T: Add<Output = T> + Neg<Output = T>> Sub for Dual<T> {
    type Output = Dual<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Product rule: (a + a′·ε) * (b + b′·ε) = ab + (a′b + ab′)·ε
impl<T: Mul<Output = T> + Add<Output = T> + Clone> Mul for Dual<T> {
    type Output = Dual<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        Dual {
            value: self.value.clone() * rhs.value.clone(),
            derivative: self.derivative * rhs.value + self.value * rhs.derivative,
        }
    }
}

/// Quotient via the reciprocal: `f / g = f * (1/g)`.
#[allow(clippy::suspicious_arithmetic_impl)]
impl<T> Div for Dual<T>
where
    T: One + Div<Output = T> + Mul<Output = T> + Add<Output = T> + Neg<Output = T> + Clone,
{
    type Output = Dual<T>;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

impl<T: Neg<Output = T>> Neg for Dual<T> {
    type Output = Dual<T>;

    fn neg(self) -> Self::Output {
        Dual {
            value: -self.value,
            derivative: -self.derivative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn constant_has_zero_derivative() {
        let c = Dual::constant(5.0);
        assert_eq!(c.value, 5.0);
        assert_eq!(c.derivative, 0.0);
    }

    #[test]
    fn variable_has_unit_derivative() {
        let x = Dual::variable(3.0);
        assert_eq!(x.value, 3.0);
        assert_eq!(x.derivative, 1.0);
    }

    #[test]
    fn addition_sums_both_parts() {
        let y = Dual::variable(3.0) + Dual::constant(5.0);

        assert_eq!(y.value, 8.0);
        assert_eq!(y.derivative, 1.0);
    }

    #[test]
    fn multiplication_implements_product_rule() {
        // x * x at x = 3
        let x = Dual::variable(3.0);
        let y = x * x;

        assert_eq!(y.value, 9.0);
        assert_eq!(y.derivative, 6.0);
    }

    #[test]
    fn powi_matches_repeated_multiplication() {
        let x = Dual::new(1.5, 1.0);
        let by_power = x.powi(4);
        let by_product = x * x * x * x;

        assert_relative_eq!(by_power.value, by_product.value, epsilon = 1e-12);
        assert_relative_eq!(by_power.derivative, by_product.derivative, epsilon = 1e-12);
    }

    #[test]
    fn powi_at_i32_min_does_not_overflow() {
        let y = Dual::new(1.0, 1.0).powi(i32::MIN);
        assert_eq!(y, Dual::new(1.0, <f64 as From<i32>>::from(i32::MIN)));
    }

    #[test]
    fn powi_one_is_identity() {
        let x = Dual::new(-2.5, 0.75);
        assert_eq!(x.powi(1), x);
    }

    #[test]
    fn powi_zero_at_origin_has_no_singularity() {
        let y = Dual::variable(0.0).powi(0);
        assert_eq!(y, Dual::new(1.0, 0.0));
        assert!(!y.derivative.is_nan());
    }

    #[test]
    fn powi_two_at_origin() {
        // d/dx x² at 0 is 0
        let y = Dual::variable(0.0).powi(2);
        assert_eq!(y, Dual::new(0.0, 0.0));
    }

    #[test]
    fn quotient_rule_emerges_from_recip() {
        // (x+1)/(x+2) at x = 3, f' = 1/(x+2)² = 0.04
        let x = Dual::variable(3.0);
        let y = (x + Dual::constant(1.0)) / (x + Dual::constant(2.0));

        assert_eq!(y.value, 0.8);
        assert_relative_eq!(y.derivative, 0.04_f64, epsilon = 1e-10);
    }

    #[test]
    fn negation_and_subtraction() {
        let x = Dual::variable(5.0);
        assert_eq!(-x, Dual::new(-5.0, -1.0));
        assert_eq!(x - Dual::constant(2.0), Dual::new(3.0, 1.0));
    }

    #[test]
    fn exp_at_zero() {
        let f = Dual::variable(0.0).exp();
        assert_eq!(f.value, 1.0);
        assert_eq!(f.derivative, 1.0);
    }

    #[test]
    fn cos_at_half_pi() {
        // d/dx cos x at π/2 is -1
        let f = Dual::variable(std::f64::consts::FRAC_PI_2).cos();
        assert_relative_eq!(f.value, 0.0, epsilon = 1e-12);
        assert_relative_eq!(f.derivative, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn sin_ln_sqrt() {
        assert_eq!(Dual::variable(0.0).sin(), Dual::new(0.0, 1.0));
        assert_eq!(Dual::variable(1.0).ln(), Dual::new(0.0, 1.0));
        assert_eq!(Dual::variable(4.0).sqrt(), Dual::new(2.0, 0.25));
    }

    #[test]
    fn exp_cubed_chain_rule() {
        // (e^x)^3 at x = 2: value e^6, derivative 3e^6
        let f = Dual::variable(2.0).exp().powi(3);
        let e6 = 6.0_f64.exp();

        assert_relative_eq!(f.value, e6, max_relative = 1e-12);
        assert_relative_eq!(f.derivative, 3.0 * e6, max_relative = 1e-12);
    }

    #[test]
    fn works_over_f32() {
        let y = Dual::<f32>::variable(2.0).powi(2);
        assert_eq!(y, Dual::new(4.0_f32, 4.0_f32));
    }

    fn dual() -> impl Strategy<Value = Dual<f64>> {
        (-1e3f64..1e3, -1e3f64..1e3).prop_map(|(v, d)| Dual::new(v, d))
    }

    proptest! {
        #[test]
        fn add_is_componentwise(a in dual(), b in dual()) {
            let s = a + b;
            prop_assert_eq!(s.value, a.value + b.value);
            prop_assert_eq!(s.derivative, a.derivative + b.derivative);
        }

        #[test]
        fn mul_follows_product_rule(a in dual(), b in dual()) {
            let p = a * b;
            prop_assert_eq!(p.value, a.value * b.value);
            prop_assert_eq!(p.derivative, a.derivative * b.value + a.value * b.derivative);
        }

        #[test]
        fn powi_zero_is_one(a in dual()) {
            prop_assert_eq!(a.powi(0), Dual::new(1.0, 0.0));
        }

        #[test]
        fn exp_derivative_scales_value(a in (-50f64..50.0, -1e3f64..1e3)) {
            let a = Dual::new(a.0, a.1);
            let e = a.exp();
            prop_assert_eq!(e.derivative, a.derivative * e.value);
        }

        #[test]
        fn cos_derivative_is_negated_sine(a in dual()) {
            let c = a.cos();
            prop_assert_eq!(c.derivative, -a.derivative * a.value.sin());
        }
    }
}
