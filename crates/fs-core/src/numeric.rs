use crate::{FsError, FsResult};

/// Floating point type used for diagram coordinates and sizes.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> FsResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FsError::NonFinite { what, value: v })
    }
}

/// Like [`ensure_finite`], additionally rejecting negative values.
pub fn ensure_non_negative(v: Real, what: &'static str) -> FsResult<Real> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(FsError::InvalidArg {
            what: format!("{what} must be non-negative (got {v})"),
        });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert!(ensure_non_negative(-1.0, "width").is_err());
        assert_eq!(ensure_non_negative(0.0, "width").unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn finite_values_pass_through(v in -1.0e12_f64..1.0e12) {
            prop_assert_eq!(ensure_finite(v, "v").unwrap(), v);
        }
    }
}
