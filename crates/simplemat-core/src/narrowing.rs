//! Conversion of boundary scalars to the native element width.
//!
//! The public API speaks `f64`. Every backend method that accepts a scalar
//! routes it through [`to_native`] exactly once on entry, so the narrowing
//! policy is applied in one auditable place instead of at every kernel.
//!
//! For `f32` backends narrowing is lossy: the value is rounded to the
//! nearest representable `f32`. For `f64` backends it is the identity.

use crate::{
    config::NarrowingPolicy,
    error::{MatrixError, Result},
    types::Element,
};
use num_traits::Float;

/// Narrow a wide scalar to the native element type under `policy`.
///
/// Overflow means a *finite* input whose rounded value is infinite. NaN and
/// infinite inputs are not overflow and pass through unchanged.
pub fn to_native<T: Element>(value: f64, policy: NarrowingPolicy) -> Result<T> {
    let native = T::from_wide(value);
    if !value.is_finite() || Float::is_finite(native) {
        return Ok(native);
    }

    match policy {
        NarrowingPolicy::Ieee => Ok(native),
        NarrowingPolicy::Warn => {
            log::warn!(
                "scalar {} overflows {} and was narrowed to {}",
                value,
                T::NAME,
                native
            );
            Ok(native)
        }
        NarrowingPolicy::Saturate => {
            let clamped = if value.is_sign_negative() { -T::MAX } else { T::MAX };
            log::warn!(
                "scalar {} overflows {} and was clamped to {}",
                value,
                T::NAME,
                clamped
            );
            Ok(clamped)
        }
        NarrowingPolicy::Strict => Err(MatrixError::NarrowingOverflow {
            value,
            target: T::NAME,
        }),
    }
}

/// Narrow a sequence of wide scalars, failing on the first rejected value.
///
/// Nothing is returned unless every value converts, so callers can validate
/// a whole write before touching their output.
pub fn to_native_all<T: Element>(values: &[f64], policy: NarrowingPolicy) -> Result<Vec<T>> {
    values.iter().map(|&v| to_native(v, policy)).collect()
}

/// Widen a native scalar back to `f64` for the API boundary.
#[inline]
pub fn to_wide<T: Element>(value: T) -> f64 {
    value.to_wide()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_nearest_f32() {
        let beta = 1.000_000_119_209_289_6_f64 + 1e-12;
        let narrowed: f32 = to_native(beta, NarrowingPolicy::Ieee).unwrap();
        assert_eq!(narrowed, beta as f32);
        assert_ne!(f64::from(narrowed), beta);
    }

    #[test]
    fn test_identity_for_f64() {
        for policy in [
            NarrowingPolicy::Ieee,
            NarrowingPolicy::Warn,
            NarrowingPolicy::Saturate,
            NarrowingPolicy::Strict,
        ] {
            let v: f64 = to_native(1e300, policy).unwrap();
            assert_eq!(v, 1e300);
        }
    }

    #[test]
    fn test_overflow_policies() {
        let ieee: f32 = to_native(1e40, NarrowingPolicy::Ieee).unwrap();
        assert_eq!(ieee, f32::INFINITY);

        let warned: f32 = to_native(-1e40, NarrowingPolicy::Warn).unwrap();
        assert_eq!(warned, f32::NEG_INFINITY);

        let saturated: f32 = to_native(1e40, NarrowingPolicy::Saturate).unwrap();
        assert_eq!(saturated, f32::MAX);
        let saturated: f32 = to_native(-1e40, NarrowingPolicy::Saturate).unwrap();
        assert_eq!(saturated, -f32::MAX);

        let err = to_native::<f32>(1e40, NarrowingPolicy::Strict).unwrap_err();
        assert!(matches!(err, MatrixError::NarrowingOverflow { .. }));
        assert!(!err.is_shape_error());
    }

    #[test]
    fn test_non_finite_inputs_pass_through() {
        for policy in [NarrowingPolicy::Saturate, NarrowingPolicy::Strict] {
            let inf: f32 = to_native(f64::INFINITY, policy).unwrap();
            assert_eq!(inf, f32::INFINITY);
            let nan: f32 = to_native(f64::NAN, policy).unwrap();
            assert!(nan.is_nan());
        }
    }

    #[test]
    fn test_underflow_is_not_an_error() {
        let tiny: f32 = to_native(1e-60, NarrowingPolicy::Strict).unwrap();
        assert_eq!(tiny, 0.0);
    }

    #[test]
    fn test_to_native_all() {
        let values: Vec<f32> = to_native_all(&[1.0, 2.5, -3.0], NarrowingPolicy::Strict).unwrap();
        assert_eq!(values, vec![1.0, 2.5, -3.0]);
        assert!(to_native_all::<f32>(&[1.0, 1e39], NarrowingPolicy::Strict).is_err());
        assert_eq!(to_wide(0.25_f32), 0.25);
    }
}
