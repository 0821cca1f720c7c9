//! Exact and approximate numbers.
//!
//! Literals and everything computed from them with `+`, `-`, `*`, `/` and integer powers stay
//! exact [`Rational`]s. Anything that can only be approximated (constants that have been
//! materialized, roots, trigonometric functions) is a [`Float`] with [`PRECISION`] bits. Once a
//! real value is involved in an operation, the result is real.
//!
//! A division by zero does not panic. It produces a real NaN, which then propagates through
//! every operation it takes part in.
//!
//! [`PRECISION`]: crate::primitive::PRECISION

use crate::primitive::{float, int, rational};
use rug::{float::Special, ops::Pow, Float, Integer, Rational};
use std::{cmp::Ordering, fmt};

/// Integer exponents larger than this in magnitude are computed as real values, to keep exact
/// results from growing without bound.
const MAX_EXACT_EXPONENT: i32 = 1 << 12;

/// An exact rational or an approximate real number.
#[derive(Debug, Clone)]
pub enum Number {
    /// An exact rational number, such as `2`, `-3`, or `5/4`.
    Rational(Rational),

    /// A real number, such as the value of `π`, or NaN.
    Real(Float),
}

impl Number {
    /// The number zero.
    pub fn zero() -> Self {
        Self::Rational(Rational::new())
    }

    /// The number one.
    pub fn one() -> Self {
        Self::from(1)
    }

    /// The not-a-number sentinel.
    pub fn nan() -> Self {
        Self::Real(float(Special::Nan))
    }

    /// Parses a numeric literal, such as `12`, `0.25`, `.5`, or `3.`. Decimal literals are read
    /// exactly, so `0.25` is the rational `1/4`. A leading `-` is accepted.
    pub fn parse_literal(s: &str) -> Option<Self> {
        if let Some(rest) = s.strip_prefix('-') {
            return Self::parse_literal(rest).map(|n| n.neg());
        }

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !is_digits(whole) || !is_digits(fraction) {
            return None;
        }

        let digits = format!("{}{}", whole, fraction);
        if digits.is_empty() {
            return None;
        }

        let numer = Integer::from_str_radix(&digits, 10).ok()?;
        let denom = int(10).pow(fraction.len() as u32);
        Some(Self::Rational(rational((numer, denom))))
    }

    /// Returns true if this number is NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Real(f) if f.is_nan())
    }

    /// Returns true if this number is exactly zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0() == Ordering::Equal,
            Self::Real(f) => f.is_zero(),
        }
    }

    /// Returns true if this number is exactly one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Rational(r) => *r == 1,
            Self::Real(f) => *f == 1,
        }
    }

    /// Returns true if this number is less than zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0() == Ordering::Less,
            Self::Real(f) => *f < 0,
        }
    }

    /// Returns true if this number is an exact integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Rational(r) if *r.denom() == 1)
    }

    /// Returns true if this number is exact.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Rational(_))
    }

    /// Returns the value of this number as a [`Float`].
    pub fn to_float(&self) -> Float {
        match self {
            Self::Rational(r) => float(r),
            Self::Real(f) => f.clone(),
        }
    }

    /// Returns the closest [`f64`] to this number.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Rational(r) => r.to_f64(),
            Self::Real(f) => f.to_f64(),
        }
    }

    /// Returns the integer value of this number, if it is an exact integer that fits in an
    /// [`i32`].
    pub fn to_i32(&self) -> Option<i32> {
        match self {
            Self::Rational(r) if *r.denom() == 1 => r.numer().to_i32(),
            _ => None,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(rational(a + b)),
            _ => Self::Real(self.to_float() + other.to_float()),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(rational(a * b)),
            _ => Self::Real(self.to_float() * other.to_float()),
        }
    }

    /// Divides this number by another. Dividing by zero results in NaN.
    pub fn div(&self, other: &Self) -> Self {
        if other.is_zero() {
            return Self::nan();
        }

        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(rational(a / b)),
            _ => Self::Real(self.to_float() / other.to_float()),
        }
    }

    pub fn neg(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(-r.clone()),
            Self::Real(f) => Self::Real(-f.clone()),
        }
    }

    pub fn abs(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(r.clone().abs()),
            Self::Real(f) => Self::Real(f.clone().abs()),
        }
    }

    /// Raises this number to the given power, if the result can be represented exactly. This is
    /// the case when the base is rational and the exponent is a small integer.
    ///
    /// Zero raised to a negative power is a division by zero, and results in NaN.
    pub fn pow_exact(&self, exponent: &Self) -> Option<Self> {
        let Self::Rational(base) = self else {
            return None;
        };
        let n = exponent.to_i32()?;
        if n.abs() > MAX_EXACT_EXPONENT {
            return None;
        }
        if n < 0 && base.cmp0() == Ordering::Equal {
            return Some(Self::nan());
        }

        Some(Self::Rational(base.clone().pow(n)))
    }

    /// Raises this number to the given power. The result is exact when possible, and real
    /// otherwise. Powers without a real result, such as `(-1)^(1/2)`, are NaN.
    pub fn pow(&self, exponent: &Self) -> Self {
        if let Some(exact) = self.pow_exact(exponent) {
            return exact;
        }

        if let (Self::Rational(base), Some(root)) = (self, exponent.exact_root()) {
            if let Some(exact) = rational_root(base, root) {
                return exact;
            }
        }

        Self::Real(self.to_float().pow(exponent.to_float()))
    }

    /// If this number is `1/n` for a small positive integer `n`, returns `n`.
    fn exact_root(&self) -> Option<u32> {
        match self {
            Self::Rational(r) if *r.numer() == 1 => r.denom().to_u32().filter(|n| *n > 1),
            _ => None,
        }
    }

    /// Returns the larger of two numbers. NaN wins over everything.
    pub fn max(&self, other: &Self) -> Self {
        match self.partial_cmp(other) {
            Some(Ordering::Less) => other.clone(),
            Some(_) => self.clone(),
            None => Self::nan(),
        }
    }

    /// Returns the smaller of two numbers. NaN wins over everything.
    pub fn min(&self, other: &Self) -> Self {
        match self.partial_cmp(other) {
            Some(Ordering::Greater) => other.clone(),
            Some(_) => self.clone(),
            None => Self::nan(),
        }
    }
}

/// Returns the exact `n`-th root of a rational, if both its numerator and denominator are perfect
/// powers.
fn rational_root(value: &Rational, n: u32) -> Option<Number> {
    if value.cmp0() == Ordering::Less && n % 2 == 0 {
        return None;
    }

    let exact_root = |i: &Integer| {
        let root = i.clone().root(n);
        if root.clone().pow(n) == *i {
            Some(root)
        } else {
            None
        }
    };

    let numer = exact_root(value.numer())?;
    let denom = exact_root(value.denom())?;
    Some(Number::Rational(rational((numer, denom))))
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::Rational(rational(n))
    }
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<Float> for Number {
    fn from(f: Float) -> Self {
        Self::Real(f)
    }
}

/// Numbers compare by value, regardless of whether they are exact. NaN is not equal to anything,
/// including itself.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Rational(r), Self::Real(f)) | (Self::Real(f), Self::Rational(r)) => *f == *r,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => a.partial_cmp(b),
            (Self::Real(a), Self::Real(b)) => a.partial_cmp(b),
            (Self::Real(f), Self::Rational(r)) => f.partial_cmp(r),
            (Self::Rational(r), Self::Real(f)) => f.partial_cmp(r).map(Ordering::reverse),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) if *r.denom() == 1 => write!(f, "{}", r.numer()),
            Self::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Self::Real(x) if x.is_nan() => write!(f, "NaN"),
            Self::Real(x) => write!(f, "{}", x.to_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn n(s: &str) -> Number {
        Number::parse_literal(s).unwrap()
    }

    #[test]
    fn literals_are_exact() {
        assert_eq!(n("0.25"), Number::from(rational((1, 4))));
        assert_eq!(n(".5").to_string(), "1/2");
        assert_eq!(n("3.").to_string(), "3");
        assert_eq!(n("-1").to_string(), "-1");
        assert_eq!(n("12.50").to_string(), "25/2");
        assert!(n("0.1").is_exact());
    }

    #[test]
    fn malformed_literals() {
        assert!(Number::parse_literal("").is_none());
        assert!(Number::parse_literal(".").is_none());
        assert!(Number::parse_literal("1.2.3").is_none());
        assert!(Number::parse_literal("1e5").is_none());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(n("4").div(&n("6")).to_string(), "2/3");
        assert_eq!(n("0.1").add(&n("0.2")), n("0.3"));
        assert_eq!(n("2").sub(&n("5")), n("-3"));
        assert_eq!(n("1.5").mul(&n("4")), n("6"));
    }

    #[test]
    fn division_by_zero_is_nan() {
        let nan = n("1").div(&Number::zero());
        assert!(nan.is_nan());
        assert!(nan.add(&n("1")).is_nan());
        assert_ne!(nan.clone(), nan);
        assert_eq!(nan.to_string(), "NaN");
    }

    #[test]
    fn powers() {
        assert_eq!(n("2").pow(&n("10")), n("1024"));
        assert_eq!(n("2").pow(&n("-2")), n("0.25"));
        assert_eq!(n("9").pow(&n(".5")), n("3"));
        assert_eq!(n("8").pow(&Number::from(rational((1, 3)))), n("2"));
        assert!(n("0").pow(&n("-1")).is_nan());
        assert!(n("-4").pow(&n(".5")).is_nan());
        assert_float_absolute_eq!(n("2").pow(&n(".5")).to_f64(), std::f64::consts::SQRT_2, 1e-12);
    }

    #[test]
    fn mixed_comparison() {
        let half = Number::Real(float(0.5));
        assert_eq!(half, n(".5"));
        assert!(n("1") > half);
        assert_eq!(n("3").max(&half), n("3"));
        assert_eq!(n("3").min(&half), half);
    }
}
