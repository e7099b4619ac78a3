//! Pieces shared by the vector and quaternion packers.
//!
//! Once the largest-magnitude component of a unit vector is dropped, every
//! other component lies in `[-1/sqrt(2), 1/sqrt(2)]`. Kept components are
//! widened to `[-1, 1]` before snorm encoding and narrowed back after decoding.

use std::f64::consts::FRAC_1_SQRT_2;

use fpq_core::FpqError;
use fpq_math::{accel, insert_component, remap, FloatElement};

/// `-1.0` when the dropped component is negative, else `1.0`.
#[inline]
pub(crate) fn canonical_sign<F: FloatElement>(dropped: F) -> f64 {
    if dropped.to_f64() < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[inline]
pub(crate) fn widen<F: FloatElement>(component: F) -> Result<F, FpqError> {
    Ok(remap(component, -FRAC_1_SQRT_2, FRAC_1_SQRT_2, -1.0, 1.0)?)
}

#[inline]
pub(crate) fn narrow<F: FloatElement>(component: F) -> Result<F, FpqError> {
    Ok(remap(component, -1.0, 1.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2)?)
}

/// Rebuilds the dropped component as `sqrt(1 - sum(rest^2))` and puts it back at `index`.
///
/// If quantization pushed the kept components outside the unit sphere they
/// are rescaled onto it and the dropped component becomes zero.
pub(crate) fn complete_unit<F: FloatElement, const M: usize, const N: usize>(
    rest: &[F; M],
    index: usize,
) -> Result<[F; N], FpqError> {
    let magnitude = accel::norm(rest).to_f64();
    let (rest, dropped) = if magnitude > 1.0 {
        (rest.map(|c| F::from_f64(c.to_f64() / magnitude)), F::from_f64(0.0))
    } else {
        (*rest, accel::solve_missing_component(rest))
    };
    Ok(insert_component(&rest, index, dropped)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_narrow_bounds() {
        assert!((widen(FRAC_1_SQRT_2).unwrap() - 1.0).abs() < 1e-15);
        assert!((widen(-FRAC_1_SQRT_2).unwrap() + 1.0).abs() < 1e-15);
        assert!((narrow(1.0f64).unwrap() - FRAC_1_SQRT_2).abs() < 1e-15);
        assert_eq!(narrow(0.0f32).unwrap(), 0.0);
    }

    #[test]
    fn test_canonical_sign() {
        assert_eq!(canonical_sign(-0.5f32), -1.0);
        assert_eq!(canonical_sign(0.0f64), 1.0);
        assert_eq!(canonical_sign(2.0f64), 1.0);
    }

    #[test]
    fn test_complete_unit_rebuilds_dropped() {
        let full: [f64; 3] = complete_unit(&[0.6, 0.0], 1).unwrap();
        assert_eq!(full[0], 0.6);
        assert!((full[1] - 0.8).abs() < 1e-12);
        assert_eq!(full[2], 0.0);
    }

    #[test]
    fn test_complete_unit_rescales_overshoot() {
        let full: [f64; 4] = complete_unit(&[0.75, 0.75, 0.75], 0).unwrap();
        assert_eq!(full[0], 0.0);
        let sum: f64 = full.iter().map(|c| c * c).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
