use crate::{HsError, HsResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> HsResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HsError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> HsResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HsError::NotPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.5, "d").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "d"),
            Err(HsError::NotPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(-1.0, "d"),
            Err(HsError::NotPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::INFINITY, "d"),
            Err(HsError::NonFinite { .. })
        ));
    }
}
