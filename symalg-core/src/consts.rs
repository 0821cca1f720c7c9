//! Numeric values of the named constants. Each is computed once, at [`PRECISION`] bits.
//!
//! [`PRECISION`]: crate::primitive::PRECISION

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());
