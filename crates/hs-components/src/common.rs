//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hs_core::numeric::ensure_finite;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative(0.0, "cost").is_ok());
        assert!(matches!(
            check_non_negative(-1.0, "cost"),
            Err(ComponentError::InvalidArg { what: "cost" })
        ));
        assert!(matches!(
            check_non_negative(f64::NAN, "cost"),
            Err(ComponentError::NonPhysical { .. })
        ));
    }
}
