//! Integer operations: factorial, greatest common divisor, least common multiple.

use dashu::integer::UBig;

use crate::error::{CalcError, Result};

/// Largest accepted factorial argument.
pub const MAX_FACTORIAL: u32 = 1000;

/// Factorial of a non-negative whole number no larger than [`MAX_FACTORIAL`].
///
/// The argument arrives as `f64` from the input boundary, so fractional and
/// non-finite values are rejected here rather than truncated.
pub fn factorial(n: f64) -> Result<UBig> {
    if n < 0.0 {
        return Err(CalcError::domain(
            "Factorial is not defined for negative numbers!",
        ));
    }
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(CalcError::domain("Factorial requires an integer!"));
    }
    if n > f64::from(MAX_FACTORIAL) {
        return Err(CalcError::domain(
            "Number too large for factorial calculation!",
        ));
    }

    let n = n as u32;
    Ok((2..=n).fold(UBig::ONE, |acc, k| acc * UBig::from(k)))
}

/// Greatest common divisor of the integer parts of `a` and `b`.
///
/// `gcd(0, 0)` is `0`; the result is never negative.
pub fn gcd(a: f64, b: f64) -> Result<UBig> {
    let a = truncate(a, "GCD")?;
    let b = truncate(b, "GCD")?;
    Ok(gcd_ubig(a, b))
}

/// Least common multiple of the integer parts of `a` and `b`.
///
/// Zero if either input is zero.
pub fn lcm(a: f64, b: f64) -> Result<UBig> {
    let a = truncate(a, "LCM")?;
    let b = truncate(b, "LCM")?;
    if a == UBig::ZERO || b == UBig::ZERO {
        return Ok(UBig::ZERO);
    }
    let g = gcd_ubig(a.clone(), b.clone());
    Ok(a / g * b)
}

fn gcd_ubig(mut a: UBig, mut b: UBig) -> UBig {
    while b != UBig::ZERO {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Magnitude of `x` with the fractional part dropped, toward zero.
///
/// Every finite `f64` is a dyadic rational, so its integer part converts
/// exactly: the 53-bit significand shifted by the binary exponent.
fn truncate(x: f64, op: &str) -> Result<UBig> {
    if !x.is_finite() {
        return Err(CalcError::domain(format!(
            "{} requires integer numbers!",
            op
        )));
    }
    let t = x.trunc().abs();
    if t == 0.0 {
        return Ok(UBig::ZERO);
    }

    let bits = t.to_bits();
    // t >= 1, so the value is normal and the implicit leading bit is set.
    let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let significand = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    if exponent >= 0 {
        Ok(UBig::from(significand) << exponent as usize)
    } else {
        Ok(UBig::from(significand >> (-exponent) as u32))
    }
}
