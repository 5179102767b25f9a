//! Real-valued arithmetic and trigonometry.
//!
//! Only the operations that are undefined somewhere validate their input;
//! everything else follows IEEE-754 and lets non-finite values through.

use serde::Serialize;

use crate::error::{CalcError, Result};

/// Number of decimal digits kept by [`round`].
pub const ROUND_DECIMALS: i32 = 2;

/// Sine, cosine and tangent of one angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trig {
    pub sin: f64,
    pub cos: f64,
    pub tan: f64,
}

/// Sum of `a` and `b`.
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// `a` minus `b`.
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Product of `a` and `b`.
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// `a` divided by `b`; fails when `b` is zero.
pub fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::division_by_zero("Division by zero is not allowed!"));
    }
    Ok(a / b)
}

/// Floored remainder: the result takes the sign of the divisor.
pub fn modulus(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::division_by_zero("Modulus by zero is not allowed!"));
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

/// `base` raised to `exponent`.
pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// Square root; negative input has no real root.
pub fn square_root(x: f64) -> Result<f64> {
    if x < 0.0 {
        return Err(CalcError::domain(
            "Square root of negative number is not real!",
        ));
    }
    Ok(x.sqrt())
}

/// Natural logarithm.
pub fn logarithm(x: f64) -> Result<f64> {
    if x <= 0.0 {
        return Err(CalcError::domain(
            "Logarithm is only defined for positive numbers!",
        ));
    }
    Ok(x.ln())
}

/// Absolute value.
pub fn absolute(x: f64) -> f64 {
    x.abs()
}

/// Round to [`ROUND_DECIMALS`] digits, ties to even.
pub fn round(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10f64.powi(ROUND_DECIMALS);
    let scaled = x * scale;
    // Scaling can overflow for huge inputs, which are already whole at this precision.
    if !scaled.is_finite() {
        return x;
    }
    scaled.round_ties_even() / scale
}

/// `value` as a percentage of `total`.
pub fn percentage(value: f64, total: f64) -> Result<f64> {
    if total == 0.0 {
        return Err(CalcError::division_by_zero(
            "Total cannot be zero for percentage calculation!",
        ));
    }
    Ok((value / total) * 100.0)
}

/// Trigonometric functions of an angle in radians.
pub fn trig_functions(angle: f64) -> Trig {
    Trig {
        sin: angle.sin(),
        cos: angle.cos(),
        tan: angle.tan(),
    }
}

/// Whether `x` is positive or negative infinity.
pub fn is_infinity(x: f64) -> bool {
    x.is_infinite()
}
