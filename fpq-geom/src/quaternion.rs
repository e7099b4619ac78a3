//! Smallest-three unit quaternion quantization.
//!
//! Code layout, MSB first, with `n = (W_u - 2) / 3`:
//!
//! ```text
//! | padding | index (2) | c0 (n) | c1 (n) | c2 (n) |
//! ```
//!
//! `q` and `-q` are the same rotation and produce the same code. The input is
//! assumed to be unit length; it is not checked.

use fpq_core::{decode_snorm_to_fp, encode_fp_to_snorm, FpqError, SignConvention};
use fpq_math::{argmax_abs_index, low_bits_mask, remove_component, FloatElement, UIntElement};
use tracing::debug;

use crate::batch;
use crate::format::{validate_quat_format, QuatBreakdown};
use crate::smallest_three::{canonical_sign, complete_unit, narrow, widen};

const COMPONENTS: usize = 4;

fn layout<F: FloatElement, U: UIntElement>() -> Result<QuatBreakdown, FpqError> {
    validate_quat_format(F::DTYPE, U::DTYPE)
}

#[inline]
fn component_shift(breakdown: &QuatBreakdown, slot: usize) -> u32 {
    (2 - slot as u32) * breakdown.component_bits
}

fn encode_with_layout<F: FloatElement, U: UIntElement>(
    q: &[F; COMPONENTS],
    breakdown: QuatBreakdown,
    convention: SignConvention,
) -> Result<U, FpqError> {
    let nbits = breakdown.component_bits;
    let index = argmax_abs_index(q);
    let sign = canonical_sign(q[index]);
    let rest: [F; 3] = remove_component(q, index)?;

    let mut packed = (index as u64) << (3 * nbits);
    for (slot, c) in rest.iter().enumerate() {
        let widened = widen(F::from_f64(c.to_f64() * sign))?;
        let code: U = encode_fp_to_snorm(widened, nbits, convention)?;
        packed |= (code.to_u64() & low_bits_mask(nbits)) << component_shift(&breakdown, slot);
    }
    Ok(U::from_u64_truncating(packed))
}

fn decode_with_layout<F: FloatElement, U: UIntElement>(
    code: U,
    breakdown: QuatBreakdown,
    convention: SignConvention,
) -> Result<[F; COMPONENTS], FpqError> {
    let nbits = breakdown.component_bits;
    let code = code.to_u64();
    let index = (code >> (3 * nbits)) & low_bits_mask(breakdown.index_bits);

    let mut rest = [F::from_f64(0.0); 3];
    for (slot, c) in rest.iter_mut().enumerate() {
        let field = (code >> component_shift(&breakdown, slot)) & low_bits_mask(nbits);
        let widened: F = decode_snorm_to_fp(U::from_u64_truncating(field), nbits, convention)?;
        *c = narrow(widened)?;
    }
    complete_unit(&rest, index as usize)
}

/// Packs the unit quaternion `q` into one `U`.
pub fn encode_quat_to_uint<F: FloatElement, U: UIntElement>(
    q: &[F; COMPONENTS],
    convention: SignConvention,
) -> Result<U, FpqError> {
    encode_with_layout(q, layout::<F, U>()?, convention)
}

/// Inverse of [`encode_quat_to_uint`]; the result satisfies `sum(c^2) ~= 1`.
pub fn decode_uint_to_quat<F: FloatElement, U: UIntElement>(
    code: U,
    convention: SignConvention,
) -> Result<[F; COMPONENTS], FpqError> {
    decode_with_layout(code, layout::<F, U>()?, convention)
}

pub fn encode_quats_to_uint<F: FloatElement, U: UIntElement>(
    qs: &[[F; COMPONENTS]],
    convention: SignConvention,
) -> Result<Vec<U>, FpqError> {
    let breakdown = layout::<F, U>()?;
    debug!(
        count = qs.len(),
        float = %F::DTYPE,
        uint = %U::DTYPE,
        "encoding quaternion batch"
    );
    batch::try_map(qs, |q| encode_with_layout(q, breakdown, convention))
}

pub fn decode_uint_to_quats<F: FloatElement, U: UIntElement>(
    codes: &[U],
    convention: SignConvention,
) -> Result<Vec<[F; COMPONENTS]>, FpqError> {
    let breakdown = layout::<F, U>()?;
    debug!(
        count = codes.len(),
        float = %F::DTYPE,
        uint = %U::DTYPE,
        "decoding quaternion batch"
    );
    batch::try_map(codes, |&code| decode_with_layout(code, breakdown, convention))
}
