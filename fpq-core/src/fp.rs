//! Bit-pattern truncation of floats.
//!
//! `encode_fp_to_uint` keeps the top `nbits` bits of the IEEE-754 pattern
//! (sign, exponent, leading mantissa). Decoding zero-fills the dropped bits,
//! so the pair is the identity at full width and truncates toward zero
//! otherwise.

use fpq_math::{low_bits_mask, DType, DTypeKind, FloatElement, UIntElement};
use half::f16;

use crate::error::FpqError;

fn check_width<F: FloatElement>(nbits: u32) -> Result<(), FpqError> {
    FpqError::check_bit_width(nbits, 1, F::BITS)
}

/// Top `nbits` bits of `x`'s bit pattern, right-aligned.
pub fn encode_fp_to_uint<F: FloatElement>(x: F, nbits: u32) -> Result<F::Bits, FpqError> {
    check_width::<F>(nbits)?;
    let shift = F::BITS - nbits;
    Ok(F::Bits::from_u64_truncating(x.to_bits().to_u64() >> shift))
}

/// Inverse of [`encode_fp_to_uint`]; bits above `nbits` in `code` are ignored.
pub fn decode_uint_to_fp<F: FloatElement>(code: F::Bits, nbits: u32) -> Result<F, FpqError> {
    check_width::<F>(nbits)?;
    let shift = F::BITS - nbits;
    let field = code.to_u64() & low_bits_mask(nbits);
    Ok(F::from_bits(F::Bits::from_u64_truncating(field << shift)))
}

/// [`encode_fp_to_uint`] with the storage float chosen at run time.
///
/// `value` is first narrowed to `dtype`.
pub fn encode_fp_to_uint_as(value: f64, dtype: DType, nbits: u32) -> Result<u64, FpqError> {
    FpqError::check_kind(dtype, DTypeKind::Float)?;
    let code = match dtype {
        DType::F16 => encode_fp_to_uint(f16::from_f64(value), nbits)?.to_u64(),
        DType::F32 => encode_fp_to_uint(value as f32, nbits)?.to_u64(),
        _ => encode_fp_to_uint(value, nbits)?,
    };
    Ok(code)
}

/// [`decode_uint_to_fp`] with the storage float chosen at run time, widened to `f64`.
pub fn decode_uint_to_fp_as(code: u64, dtype: DType, nbits: u32) -> Result<f64, FpqError> {
    FpqError::check_kind(dtype, DTypeKind::Float)?;
    let value = match dtype {
        DType::F16 => {
            let field = u16::from_u64_truncating(code & low_bits_mask(nbits.min(16)));
            decode_uint_to_fp::<f16>(field, nbits)?.to_f64()
        }
        DType::F32 => {
            let field = u32::from_u64_truncating(code & low_bits_mask(nbits.min(32)));
            decode_uint_to_fp::<f32>(field, nbits)? as f64
        }
        _ => decode_uint_to_fp::<f64>(code, nbits)?,
    };
    Ok(value)
}

/// Rounds `value` to the nearest `dtype` float and widens it back to `f64`.
///
/// Magnitudes beyond the storage range come back infinite.
pub fn narrow_fp_as(value: f64, dtype: DType) -> Result<f64, FpqError> {
    FpqError::check_kind(dtype, DTypeKind::Float)?;
    let narrowed = match dtype {
        DType::F16 => f16::from_f64(value).to_f64(),
        DType::F32 => value as f32 as f64,
        _ => value,
    };
    Ok(narrowed)
}
