//! 3-D vector quantization.
//!
//! A vector is split into its norm and a unit direction. The direction drops
//! its largest-magnitude component, so a code holds, MSB first:
//!
//! ```text
//! | index (2) | component A (nbits) | component B (nbits) | norm (rest) |
//! ```
//!
//! The kept components are sign-canonicalized against the dropped one; the
//! sign moves onto the stored norm instead. The norm is truncated from the
//! narrowest float that holds the norm field
//! (see [`VectorBreakdown::norm_dtype`]).

use fpq_core::{
    decode_snorm_to_fp, decode_uint_to_fp_as, encode_fp_to_snorm, encode_fp_to_uint_as,
    narrow_fp_as, FpqError, SignConvention,
};
use fpq_math::{
    accel, argmax_abs_index, low_bits_mask, remove_component, FloatElement, UIntElement,
};
use tracing::debug;

use crate::batch;
use crate::format::{validate_format, VectorBreakdown};
use crate::smallest_three::{canonical_sign, complete_unit, narrow, widen};

const COMPONENTS: usize = 3;

/// Bit offsets of each field for one validated breakdown.
#[derive(Debug, Clone, Copy)]
struct Layout {
    breakdown: VectorBreakdown,
}

impl Layout {
    fn new<F: FloatElement, U: UIntElement>(nbits: u32) -> Result<Self, FpqError> {
        Ok(Self { breakdown: validate_format(F::DTYPE, U::DTYPE, nbits)? })
    }

    fn nbits(&self) -> u32 {
        self.breakdown.component_bits
    }

    fn norm_bits(&self) -> u32 {
        self.breakdown.norm_bits
    }

    fn index_shift(&self) -> u32 {
        2 * self.nbits() + self.norm_bits()
    }

    /// Shift of kept component `slot` (0 = A, 1 = B).
    fn component_shift(&self, slot: usize) -> u32 {
        self.norm_bits() + (1 - slot as u32) * self.nbits()
    }
}

fn encode_with_layout<F: FloatElement, U: UIntElement>(
    v: &[F; COMPONENTS],
    layout: Layout,
    convention: SignConvention,
) -> Result<U, FpqError> {
    let norm = accel::norm(v).to_f64();
    if !(norm.is_finite() && norm > 0.0) {
        return Err(FpqError::UndefinedDirection);
    }

    let index = argmax_abs_index(v);
    let unit: [F; COMPONENTS] = std::array::from_fn(|i| F::from_f64(v[i].to_f64() / norm));
    let sign = canonical_sign(unit[index]);
    let rest: [F; 2] = remove_component(&unit, index)?;

    let nbits = layout.nbits();
    let mut packed = (index as u64) << layout.index_shift();
    for (slot, c) in rest.iter().enumerate() {
        let widened = widen(F::from_f64(c.to_f64() * sign))?;
        let code: U = encode_fp_to_snorm(widened, nbits, convention)?;
        packed |= (code.to_u64() & low_bits_mask(nbits)) << layout.component_shift(slot);
    }

    let storage = layout.breakdown.norm_dtype();
    let signed_norm = narrow_fp_as(F::from_f64(norm * sign).to_f64(), storage)?;
    if !signed_norm.is_finite() {
        return Err(FpqError::NormOutOfRange { norm, storage });
    }
    let norm_code = encode_fp_to_uint_as(signed_norm, storage, layout.norm_bits())?;
    packed |= norm_code & low_bits_mask(layout.norm_bits());

    Ok(U::from_u64_truncating(packed))
}

fn decode_with_layout<F: FloatElement, U: UIntElement>(
    code: U,
    layout: Layout,
    convention: SignConvention,
) -> Result<[F; COMPONENTS], FpqError> {
    let code = code.to_u64();
    let index = (code >> layout.index_shift()) & low_bits_mask(layout.breakdown.index_bits);
    if index >= COMPONENTS as u64 {
        return Err(FpqError::InvalidComponentIndex { index, components: COMPONENTS });
    }

    let nbits = layout.nbits();
    let mut rest = [F::from_f64(0.0); 2];
    for (slot, c) in rest.iter_mut().enumerate() {
        let field = (code >> layout.component_shift(slot)) & low_bits_mask(nbits);
        let widened: F = decode_snorm_to_fp(U::from_u64_truncating(field), nbits, convention)?;
        *c = narrow(widened)?;
    }

    let norm = decode_uint_to_fp_as(
        code & low_bits_mask(layout.norm_bits()),
        layout.breakdown.norm_dtype(),
        layout.norm_bits(),
    )?;

    let unit: [F; COMPONENTS] = complete_unit(&rest, index as usize)?;
    Ok(unit.map(|c| F::from_f64(c.to_f64() * norm)))
}

/// Packs `v` into one `U` with `nbits` per kept direction component.
///
/// Fails with [`FpqError::InvalidFormat`] when `(F, U, nbits)` is not a valid
/// format, with [`FpqError::UndefinedDirection`] when `v` has zero or
/// non-finite length, and with [`FpqError::NormOutOfRange`] when the length
/// overflows the float the norm field is truncated from.
pub fn encode_vec_to_uint<F: FloatElement, U: UIntElement>(
    v: &[F; COMPONENTS],
    nbits: u32,
    convention: SignConvention,
) -> Result<U, FpqError> {
    let layout = Layout::new::<F, U>(nbits)?;
    encode_with_layout(v, layout, convention)
}

/// Inverse of [`encode_vec_to_uint`]. `nbits` and `convention` must match the encoder's.
pub fn decode_uint_to_vec<F: FloatElement, U: UIntElement>(
    code: U,
    nbits: u32,
    convention: SignConvention,
) -> Result<[F; COMPONENTS], FpqError> {
    let layout = Layout::new::<F, U>(nbits)?;
    decode_with_layout(code, layout, convention)
}

/// [`encode_vec_to_uint`] over a batch. The format is validated once.
pub fn encode_vecs_to_uint<F: FloatElement, U: UIntElement>(
    vs: &[[F; COMPONENTS]],
    nbits: u32,
    convention: SignConvention,
) -> Result<Vec<U>, FpqError> {
    let layout = Layout::new::<F, U>(nbits)?;
    debug!(
        count = vs.len(),
        float = %F::DTYPE,
        uint = %U::DTYPE,
        nbits,
        "encoding vector batch"
    );
    batch::try_map(vs, |v| encode_with_layout(v, layout, convention))
}

/// [`decode_uint_to_vec`] over a batch.
pub fn decode_uint_to_vecs<F: FloatElement, U: UIntElement>(
    codes: &[U],
    nbits: u32,
    convention: SignConvention,
) -> Result<Vec<[F; COMPONENTS]>, FpqError> {
    let layout = Layout::new::<F, U>(nbits)?;
    debug!(
        count = codes.len(),
        float = %F::DTYPE,
        uint = %U::DTYPE,
        nbits,
        "decoding vector batch"
    );
    batch::try_map(codes, |&code| decode_with_layout(code, layout, convention))
}
