//! CSS Values & Units Level 3 — §5 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>
//!
//! A percentage is always relative to a reference length; here that reference is the
//! caller-supplied conversion context expressed in pixels.

use crate::ValueError;

/// Resolve `percent` (`200` for `200%`) against `context_px`.
#[inline]
pub fn percentage_to_px(percent: f64, context_px: f64) -> f64 {
    percent / 100.0 * context_px
}

/// Express `px` as a percentage of `context_px`.
///
/// # Errors
/// Returns `ValueError::Domain` when `context_px` is zero.
#[inline]
pub fn px_to_percentage(px: f64, context_px: f64) -> Result<f64, ValueError> {
    if context_px == 0.0 {
        return Err(ValueError::domain(
            "px_to_percentage",
            format!("`{px}px` cannot be expressed as a percentage of a zero context"),
        ));
    }
    Ok(px / context_px * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    /// # Panics
    /// Panics if percentages do not scale with their context.
    fn resolves_against_context() {
        assert!((percentage_to_px(200.0, 10.0) - 20.0).abs() < 1e-9);
        assert!(px_to_percentage(16.0, 160.0).is_ok_and(|percent| (percent - 10.0).abs() < 1e-9));
        assert_eq!(
            px_to_percentage(16.0, 0.0).map_err(|err| err.kind()),
            Err(ErrorKind::Domain)
        );
    }
}
