//! CSS Values & Units Level 4 — §10.4 Exponential functions (`pow()`).
//! Spec: <https://www.w3.org/TR/css-values-4/#exponent-funcs>
//!
//! Used by scale sizes (`base * ratio^scale`). Unlike the CSS `pow()` function, a
//! result with no real value is reported as an error instead of producing `NaN`.

use crate::ValueError;

/// Exponent applied by [`pow_default`].
pub const DEFAULT_EXPONENT: f64 = 2.0;

const OPERATION: &str = "pow";

/// Square `base`.
///
/// # Errors
/// Returns `ValueError::Domain` when `base` is not finite or the square overflows.
#[inline]
pub fn pow_default(base: f64) -> Result<f64, ValueError> {
    pow(base, DEFAULT_EXPONENT)
}

/// Raise `base` to `exponent`.
///
/// - A zero exponent yields `1` for every base, zero included.
/// - Positive integer exponents multiply exactly (exponentiation by squaring).
/// - Negative exponents are the reciprocal of the positive power.
/// - Fractional exponents use `exp(exponent * ln(base))` and need `base > 0`.
///
/// # Errors
/// Returns `ValueError::Domain` when an input is not finite, when zero is raised to a
/// negative exponent, when a non-positive base meets a fractional exponent, or when the
/// result overflows.
pub fn pow(base: f64, exponent: f64) -> Result<f64, ValueError> {
    if !base.is_finite() || !exponent.is_finite() {
        return Err(ValueError::domain(
            OPERATION,
            format!("`{base}` raised to `{exponent}` is not a finite number"),
        ));
    }
    if exponent == 0.0 {
        return Ok(1.0);
    }
    if exponent < 0.0 {
        if base == 0.0 {
            return Err(ValueError::domain(
                OPERATION,
                format!("`0` cannot be raised to the negative exponent `{exponent}`"),
            ));
        }
        return pow(base, -exponent).map(|positive| 1.0 / positive);
    }

    let result = if exponent.fract() == 0.0 {
        integer_pow(base, exponent)
    } else {
        if base <= 0.0 {
            return Err(ValueError::domain(
                OPERATION,
                format!("`{base}` has no real result for the fractional exponent `{exponent}`"),
            ));
        }
        (exponent * base.ln()).exp()
    };

    if result.is_finite() {
        log::trace!("pow({base}, {exponent}) = {result}");
        Ok(result)
    } else {
        Err(ValueError::domain(
            OPERATION,
            format!("`{base}` raised to `{exponent}` overflows"),
        ))
    }
}

/// Exponentiation by squaring for a non-negative integral exponent.
fn integer_pow(base: f64, exponent: f64) -> f64 {
    let mut remaining = exponent as u64;
    let mut factor = base;
    let mut result = 1.0;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= factor;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor *= factor;
        }
    }
    result
}
