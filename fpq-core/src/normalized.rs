//! Normalized-integer encodings.
//!
//! | Encoding  | Range    | maxInt              | Layout                              |
//! |-----------|----------|---------------------|-------------------------------------|
//! | std unorm | [0, 1]   | 2^nbits - 1         | `rint(x * maxInt)`                  |
//! | std snorm | [-1, 1]  | 2^(nbits-1) - 1     | unorm(\|x\|) << 1 \| sign            |
//! | ogl / d3d | [-1, 1]  | 2^(nbits-1) - 1     | two's complement, low `nbits` bits  |
//!
//! `nbits` may not exceed what the source float can represent exactly:
//! `1 + M_f` for unorm, `2 + M_f` for snorm (one extra bit carries the sign).
//! Inputs outside the nominal range are clamped before scaling.

use fpq_math::{accel, low_bits_mask, DType, DTypeKind, FloatElement, UIntElement};

use crate::convention::SignConvention;
use crate::error::FpqError;

/// Whether an `nbits` unorm code fits the precision of `dtype_f`.
pub fn can_express_unorm(nbits: u32, dtype_f: DType) -> Result<bool, FpqError> {
    FpqError::check_kind(dtype_f, DTypeKind::Float)?;
    Ok(dtype_f.mantissa_bits().is_some_and(|m| nbits <= 1 + m))
}

/// Whether an `nbits` snorm code fits the precision of `dtype_f`.
pub fn can_express_snorm(nbits: u32, dtype_f: DType) -> Result<bool, FpqError> {
    FpqError::check_kind(dtype_f, DTypeKind::Float)?;
    Ok(dtype_f.mantissa_bits().is_some_and(|m| nbits <= 2 + m))
}

fn check_unorm<F: FloatElement, U: UIntElement>(nbits: u32) -> Result<(), FpqError> {
    FpqError::check_bit_width(nbits, 1, U::BITS.min(1 + F::MANTISSA_BITS))
}

fn check_snorm<F: FloatElement, U: UIntElement>(nbits: u32) -> Result<(), FpqError> {
    FpqError::check_bit_width(nbits, 2, U::BITS.min(2 + F::MANTISSA_BITS))
}

#[inline]
fn unorm_max(nbits: u32) -> f64 {
    low_bits_mask(nbits) as f64
}

#[inline]
fn snorm_max(nbits: u32) -> f64 {
    low_bits_mask(nbits - 1) as f64
}

fn unorm_encode_raw<F: FloatElement>(x: F, nbits: u32) -> u64 {
    let max_int = unorm_max(nbits);
    let clamped = x.to_f64().clamp(0.0, 1.0);
    let scaled = accel::rint(F::from_f64(clamped * max_int));
    scaled.to_f64() as u64
}

fn unorm_decode_raw<F: FloatElement>(code: u64, nbits: u32) -> F {
    let field = code & low_bits_mask(nbits);
    F::from_f64(field as f64 / unorm_max(nbits))
}

fn twos_encode_raw<F: FloatElement>(x: F, nbits: u32) -> u64 {
    let max_int = snorm_max(nbits);
    let clamped = x.to_f64().clamp(-1.0, 1.0);
    let scaled = accel::rint(F::from_f64(clamped * max_int)).to_f64() as i64;
    // negative values wrap into two's-complement form inside the field
    (scaled as u64) & low_bits_mask(nbits)
}

fn twos_decode_raw<F: FloatElement>(code: u64, nbits: u32) -> F {
    let mask = low_bits_mask(nbits);
    let field = code & mask;
    let sign_bit = 1u64 << (nbits - 1);
    let value = if field & sign_bit != 0 {
        (field | !mask) as i64
    } else {
        field as i64
    };
    // -(maxInt + 1) / maxInt would undershoot -1
    F::from_f64((value as f64 / snorm_max(nbits)).max(-1.0))
}

/// Encodes `x` in `[0, 1]` as an `nbits` unorm code. `None` uses the full width of `U`.
pub fn encode_fp_to_std_unorm<F: FloatElement, U: UIntElement>(
    x: F,
    nbits: Option<u32>,
) -> Result<U, FpqError> {
    let nbits = nbits.unwrap_or(U::BITS);
    check_unorm::<F, U>(nbits)?;
    Ok(U::from_u64_truncating(unorm_encode_raw(x, nbits)))
}

pub fn decode_std_unorm_to_fp<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: Option<u32>,
) -> Result<F, FpqError> {
    let nbits = nbits.unwrap_or(U::BITS);
    check_unorm::<F, U>(nbits)?;
    Ok(unorm_decode_raw(code.to_u64(), nbits))
}

/// Std snorm: unorm magnitude in the upper `nbits - 1` bits, sign in bit 0.
pub fn encode_fp_to_std_snorm<F: FloatElement, U: UIntElement>(
    x: F,
    nbits: u32,
) -> Result<U, FpqError> {
    check_snorm::<F, U>(nbits)?;
    let v = x.to_f64();
    let magnitude = unorm_encode_raw(F::from_f64(v.abs()), nbits - 1);
    let sign = u64::from(v < 0.0);
    Ok(U::from_u64_truncating((magnitude << 1) | sign))
}

pub fn decode_std_snorm_to_fp<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: u32,
) -> Result<F, FpqError> {
    check_snorm::<F, U>(nbits)?;
    let code = code.to_u64();
    let magnitude: F = unorm_decode_raw(code >> 1, nbits - 1);
    if code & 1 == 1 {
        Ok(F::from_f64(-magnitude.to_f64()))
    } else {
        Ok(magnitude)
    }
}

/// Two's-complement snorm shared by the OpenGL and Direct3D conventions.
pub fn encode_fp_to_twos_snorm<F: FloatElement, U: UIntElement>(
    x: F,
    nbits: u32,
) -> Result<U, FpqError> {
    check_snorm::<F, U>(nbits)?;
    Ok(U::from_u64_truncating(twos_encode_raw(x, nbits)))
}

/// Decoded values are clamped to `>= -1.0`.
pub fn decode_twos_snorm_to_fp<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: u32,
) -> Result<F, FpqError> {
    check_snorm::<F, U>(nbits)?;
    Ok(twos_decode_raw(code.to_u64(), nbits))
}

pub fn encode_fp_to_ogl_snorm<F: FloatElement, U: UIntElement>(
    x: F,
    nbits: u32,
) -> Result<U, FpqError> {
    encode_fp_to_twos_snorm(x, nbits)
}

pub fn decode_ogl_snorm_to_fp<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: u32,
) -> Result<F, FpqError> {
    decode_twos_snorm_to_fp(code, nbits)
}

pub fn encode_fp_to_d3d_snorm<F: FloatElement, U: UIntElement>(
    x: F,
    nbits: u32,
) -> Result<U, FpqError> {
    encode_fp_to_twos_snorm(x, nbits)
}

pub fn decode_d3d_snorm_to_fp<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: u32,
) -> Result<F, FpqError> {
    decode_twos_snorm_to_fp(code, nbits)
}

/// Signed-normalized encode under `convention`.
pub fn encode_fp_to_snorm<F: FloatElement, U: UIntElement>(
    x: F,
    nbits: u32,
    convention: SignConvention,
) -> Result<U, FpqError> {
    match convention {
        SignConvention::Std => encode_fp_to_std_snorm(x, nbits),
        SignConvention::OpenGl | SignConvention::Direct3D => encode_fp_to_twos_snorm(x, nbits),
    }
}

/// Signed-normalized decode under `convention`.
pub fn decode_snorm_to_fp<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: u32,
    convention: SignConvention,
) -> Result<F, FpqError> {
    match convention {
        SignConvention::Std => decode_std_snorm_to_fp(code, nbits),
        SignConvention::OpenGl | SignConvention::Direct3D => decode_twos_snorm_to_fp(code, nbits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_unorm_endpoints() {
        assert_eq!(encode_fp_to_std_unorm::<f64, u8>(0.0, Some(8)).unwrap(), 0);
        assert_eq!(encode_fp_to_std_unorm::<f64, u8>(1.0, Some(8)).unwrap(), 255);
        assert_eq!(decode_std_unorm_to_fp::<f64, u8>(0, Some(8)).unwrap(), 0.0);
        assert_eq!(decode_std_unorm_to_fp::<f64, u8>(255, Some(8)).unwrap(), 1.0);
        // default width is the whole code type
        assert_eq!(encode_fp_to_std_unorm::<f32, u8>(1.0, None).unwrap(), 255);
        assert_eq!(encode_fp_to_std_unorm::<f32, u16>(0.5, None).unwrap(), 32768);
    }

    #[test]
    fn test_unorm_rounds_half_to_even() {
        // 0.5 * 3 = 1.5 -> 2, 0.5 * 5 = 2.5 -> 2
        assert_eq!(encode_fp_to_std_unorm::<f64, u8>(0.5, Some(2)).unwrap(), 2);
        assert_eq!(encode_fp_to_std_unorm::<f64, u8>(0.5, Some(8)).unwrap(), 128);
        assert_eq!(encode_fp_to_std_unorm::<f64, u8>(0.5, Some(1)).unwrap(), 0);
    }

    #[test]
    fn test_unorm_clamps() {
        assert_eq!(encode_fp_to_std_unorm::<f32, u8>(1.5, Some(8)).unwrap(), 255);
        assert_eq!(encode_fp_to_std_unorm::<f32, u8>(-0.2, Some(8)).unwrap(), 0);
    }

    #[test]
    fn test_unorm_precision_limits() {
        // f16 carries 11 significant bits
        assert!(encode_fp_to_std_unorm::<f16, u16>(f16::ONE, Some(11)).is_ok());
        assert_eq!(
            encode_fp_to_std_unorm::<f16, u16>(f16::ONE, Some(12)),
            Err(FpqError::InvalidBitWidth { nbits: 12, min: 1, max: 11 })
        );
        // f32 into u32: capped by the mantissa, not the code width
        assert!(encode_fp_to_std_unorm::<f32, u32>(0.0, None).is_err());
        assert!(encode_fp_to_std_unorm::<f32, u32>(0.0, Some(24)).is_ok());
        assert!(encode_fp_to_std_unorm::<f64, u8>(0.0, Some(9)).is_err());
        assert!(encode_fp_to_std_unorm::<f64, u8>(0.0, Some(0)).is_err());
    }

    #[test]
    fn test_can_express() {
        assert_eq!(can_express_unorm(11, DType::F16), Ok(true));
        assert_eq!(can_express_unorm(12, DType::F16), Ok(false));
        assert_eq!(can_express_snorm(12, DType::F16), Ok(true));
        assert_eq!(can_express_snorm(54, DType::F64), Ok(true));
        assert_eq!(can_express_snorm(55, DType::F64), Ok(false));
        assert!(matches!(can_express_unorm(8, DType::U8), Err(FpqError::TypeMismatch { .. })));
    }

    #[test]
    fn test_std_snorm_layout() {
        // 7-bit magnitude: 0.5 * 127 = 63.5 -> 64
        assert_eq!(encode_fp_to_std_snorm::<f64, u8>(0.5, 8).unwrap(), 64 << 1);
        assert_eq!(encode_fp_to_std_snorm::<f64, u8>(-0.5, 8).unwrap(), (64 << 1) | 1);
        assert_eq!(encode_fp_to_std_snorm::<f64, u8>(-1.0, 8).unwrap(), 0xff);
        assert_eq!(decode_std_snorm_to_fp::<f64, u8>(0xff, 8).unwrap(), -1.0);
        assert_eq!(decode_std_snorm_to_fp::<f64, u8>(0xfe, 8).unwrap(), 1.0);
        assert_eq!(decode_std_snorm_to_fp::<f64, u8>(0, 8).unwrap(), 0.0);
    }

    #[test]
    fn test_std_snorm_needs_two_bits() {
        assert!(encode_fp_to_std_snorm::<f32, u8>(0.5, 1).is_err());
        assert_eq!(encode_fp_to_std_snorm::<f32, u8>(-1.0, 2).unwrap(), 0b11);
    }

    #[test]
    fn test_twos_snorm_layout() {
        // maxInt = 127
        assert_eq!(encode_fp_to_ogl_snorm::<f64, u8>(1.0, 8).unwrap(), 127);
        assert_eq!(encode_fp_to_ogl_snorm::<f64, u8>(-1.0, 8).unwrap(), 0x81);
        assert_eq!(encode_fp_to_ogl_snorm::<f64, u16>(-1.0, 8).unwrap(), 0x81);
        assert_eq!(encode_fp_to_d3d_snorm::<f64, u8>(0.0, 8).unwrap(), 0);
        assert_eq!(decode_ogl_snorm_to_fp::<f64, u8>(127, 8).unwrap(), 1.0);
        assert_eq!(decode_d3d_snorm_to_fp::<f64, u8>(0x81, 8).unwrap(), -1.0);
    }

    #[test]
    fn test_twos_snorm_clamps_most_negative_code() {
        // 0x80 is -128, one step past -maxInt
        assert_eq!(decode_ogl_snorm_to_fp::<f64, u8>(0x80, 8).unwrap(), -1.0);
        assert_eq!(decode_d3d_snorm_to_fp::<f32, u16>(0x200, 10).unwrap(), -1.0);
        // bits above the field do not leak into the sign
        assert_eq!(decode_ogl_snorm_to_fp::<f64, u16>(0xff00 | 127, 8).unwrap(), 1.0);
    }

    #[test]
    fn test_conventions_dispatch() {
        let std: u16 = encode_fp_to_snorm(-0.25f32, 12, SignConvention::Std).unwrap();
        assert_eq!(std, encode_fp_to_std_snorm::<f32, u16>(-0.25, 12).unwrap());
        let ogl: u16 = encode_fp_to_snorm(-0.25f32, 12, SignConvention::OpenGl).unwrap();
        let d3d: u16 = encode_fp_to_snorm(-0.25f32, 12, SignConvention::Direct3D).unwrap();
        assert_eq!(ogl, d3d);
        for convention in SignConvention::ALL {
            let code: u16 = encode_fp_to_snorm(0.75f64, 12, convention).unwrap();
            let back: f64 = decode_snorm_to_fp(code, 12, convention).unwrap();
            assert!((back - 0.75).abs() <= 1.0 / 1023.0, "{}: {}", convention, back);
        }
    }
}
