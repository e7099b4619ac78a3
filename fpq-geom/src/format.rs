use std::fmt;

use fpq_core::{can_express_snorm, FpqError, SignConvention};
use fpq_math::{DType, DTypeKind, FloatElement, UIntElement};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Width of the dropped-component index field in every packed code.
pub const INDEX_BITS: u32 = 2;

/// Bit split of a packed vector code, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorBreakdown {
    pub index_bits: u32,
    pub component_bits: u32,
    pub norm_bits: u32,
}

impl VectorBreakdown {
    /// `(index, component A, component B, norm)` widths.
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.index_bits, self.component_bits, self.component_bits, self.norm_bits)
    }

    /// Float type the norm is truncated from: the narrowest one that holds `norm_bits`.
    pub fn norm_dtype(&self) -> DType {
        DType::narrowest_float_for(self.norm_bits).unwrap_or(DType::F64)
    }

    pub fn total_bits(&self) -> u32 {
        self.index_bits + 2 * self.component_bits + self.norm_bits
    }
}

/// Bit split of a packed quaternion code, MSB first. Padding sits above the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuatBreakdown {
    pub padding_bits: u32,
    pub index_bits: u32,
    pub component_bits: u32,
}

impl QuatBreakdown {
    pub fn total_bits(&self) -> u32 {
        self.padding_bits + self.index_bits + 3 * self.component_bits
    }
}

/// Splits a `dtype_u` code into index, two components of `nbits` and the norm remainder.
pub fn calc_breakdown_of_uint(dtype_u: DType, nbits: u32) -> Result<VectorBreakdown, FpqError> {
    FpqError::check_kind(dtype_u, DTypeKind::UInt)?;
    let remaining = dtype_u.bits() - INDEX_BITS;
    FpqError::check_bit_width(nbits, 1, (remaining - 1) / 2)?;
    Ok(VectorBreakdown {
        index_bits: INDEX_BITS,
        component_bits: nbits,
        norm_bits: remaining - 2 * nbits,
    })
}

pub fn calc_breakdown_of_quat(dtype_u: DType) -> Result<QuatBreakdown, FpqError> {
    FpqError::check_kind(dtype_u, DTypeKind::UInt)?;
    let remaining = dtype_u.bits() - INDEX_BITS;
    Ok(QuatBreakdown {
        padding_bits: remaining % 3,
        index_bits: INDEX_BITS,
        component_bits: remaining / 3,
    })
}

/// Checks a `(float, uint, nbits)` vector format and returns its bit split.
///
/// Rules: `nbits >= 2`; `nbits <= (W_u - 4) / 2` so the norm keeps at least
/// two bits; the norm field no wider than the source float; `nbits` within
/// what the float can carry as snorm (`2 + M_f`).
pub fn validate_format(
    dtype_f: DType,
    dtype_u: DType,
    nbits: u32,
) -> Result<VectorBreakdown, FpqError> {
    FpqError::check_kind(dtype_f, DTypeKind::Float)?;
    FpqError::check_kind(dtype_u, DTypeKind::UInt)?;

    let invalid = || {
        debug!(float = %dtype_f, uint = %dtype_u, nbits, "rejected vector format");
        FpqError::InvalidFormat { float: dtype_f, uint: dtype_u, nbits }
    };

    let remaining = dtype_u.bits() - INDEX_BITS;
    if nbits < 2 || nbits > (remaining - 2) / 2 {
        return Err(invalid());
    }
    let breakdown = calc_breakdown_of_uint(dtype_u, nbits)?;
    if breakdown.norm_bits > dtype_f.bits() || !can_express_snorm(nbits, dtype_f)? {
        return Err(invalid());
    }
    Ok(breakdown)
}

pub fn is_valid_format(dtype_f: DType, dtype_u: DType, nbits: u32) -> bool {
    validate_format(dtype_f, dtype_u, nbits).is_ok()
}

/// Checks a `(float, uint)` quaternion format and returns its bit split.
pub fn validate_quat_format(dtype_f: DType, dtype_u: DType) -> Result<QuatBreakdown, FpqError> {
    FpqError::check_kind(dtype_f, DTypeKind::Float)?;
    let breakdown = calc_breakdown_of_quat(dtype_u)?;
    let nbits = breakdown.component_bits;
    if nbits < 2 || !can_express_snorm(nbits, dtype_f)? {
        debug!(float = %dtype_f, uint = %dtype_u, nbits, "rejected quaternion format");
        return Err(FpqError::InvalidFormat { float: dtype_f, uint: dtype_u, nbits });
    }
    Ok(breakdown)
}

pub fn is_valid_quat_format(dtype_f: DType, dtype_u: DType) -> bool {
    validate_quat_format(dtype_f, dtype_u).is_ok()
}

/// Serializable description of a vector encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorFormat {
    pub float: DType,
    pub uint: DType,
    pub nbits: u32,
    #[serde(default)]
    pub convention: SignConvention,
}

impl VectorFormat {
    pub fn new(float: DType, uint: DType, nbits: u32) -> Self {
        Self { float, uint, nbits, convention: SignConvention::default() }
    }

    /// Format for the element types `F` and `U`.
    pub fn of<F: FloatElement, U: UIntElement>(nbits: u32) -> Self {
        Self::new(F::DTYPE, U::DTYPE, nbits)
    }

    pub fn with_convention(mut self, convention: SignConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn validate(&self) -> Result<VectorBreakdown, FpqError> {
        validate_format(self.float, self.uint, self.nbits)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for VectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vec3<{}> -> {} (nbits={}, {})",
            self.float, self.uint, self.nbits, self.convention
        )
    }
}

/// Serializable description of a quaternion encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuatFormat {
    pub float: DType,
    pub uint: DType,
    #[serde(default)]
    pub convention: SignConvention,
}

impl QuatFormat {
    pub fn new(float: DType, uint: DType) -> Self {
        Self { float, uint, convention: SignConvention::default() }
    }

    pub fn of<F: FloatElement, U: UIntElement>() -> Self {
        Self::new(F::DTYPE, U::DTYPE)
    }

    pub fn with_convention(mut self, convention: SignConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn validate(&self) -> Result<QuatBreakdown, FpqError> {
        validate_quat_format(self.float, self.uint)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for QuatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quat<{}> -> {} ({})", self.float, self.uint, self.convention)
    }
}
