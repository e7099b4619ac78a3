use std::fmt;
use std::hash::Hash;

use half::f16;
use serde::{Deserialize, Serialize};

/// Runtime tag for the element types the codec understands.
///
/// Generic code uses [`FloatElement`] / [`UIntElement`]; the tag exists for
/// format predicates that take types as values and for kernel dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    F16,
    F32,
    F64,
    U8,
    U16,
    U32,
    U64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeKind {
    Float,
    UInt,
}

impl DType {
    pub const FLOATS: [DType; 3] = [DType::F16, DType::F32, DType::F64];
    pub const UINTS: [DType; 4] = [DType::U8, DType::U16, DType::U32, DType::U64];

    pub const fn kind(self) -> DTypeKind {
        match self {
            DType::F16 | DType::F32 | DType::F64 => DTypeKind::Float,
            DType::U8 | DType::U16 | DType::U32 | DType::U64 => DTypeKind::UInt,
        }
    }

    /// Total storage width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            DType::U8 => 8,
            DType::F16 | DType::U16 => 16,
            DType::F32 | DType::U32 => 32,
            DType::F64 | DType::U64 => 64,
        }
    }

    /// Explicitly stored mantissa bits (10/23/52); `None` for integer tags.
    pub const fn mantissa_bits(self) -> Option<u32> {
        match self {
            DType::F16 => Some(10),
            DType::F32 => Some(23),
            DType::F64 => Some(52),
            _ => None,
        }
    }

    /// Narrowest float tag whose width can hold `nbits` truncated bits.
    pub const fn narrowest_float_for(nbits: u32) -> Option<DType> {
        match nbits {
            1..=16 => Some(DType::F16),
            17..=32 => Some(DType::F32),
            33..=64 => Some(DType::F64),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DType::F16 => "float16",
            DType::F32 => "float32",
            DType::F64 => "float64",
            DType::U8 => "uint8",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
            DType::U64 => "uint64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DTypeKind::Float => f.write_str("floating-point"),
            DTypeKind::UInt => f.write_str("unsigned integer"),
        }
    }
}

/// Unsigned integer storage for packed codes.
///
/// Bit manipulation happens in `u64`; implementors only widen and truncate.
pub trait UIntElement: Copy + Eq + Ord + Hash + Default + fmt::Debug + Send + Sync + 'static {
    const DTYPE: DType;
    const BITS: u32;

    fn to_u64(self) -> u64;

    /// Keeps the low `Self::BITS` bits of `value`.
    fn from_u64_truncating(value: u64) -> Self;
}

macro_rules! impl_uint_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl UIntElement for $ty {
                const DTYPE: DType = DType::$tag;
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn from_u64_truncating(value: u64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_uint_element!(u8 => U8, u16 => U16, u32 => U32, u64 => U64);

/// IEEE-754 element type (binary16/32/64).
///
/// Arithmetic is carried out in `f64` and narrowed back with [`from_f64`],
/// so results keep the caller's element type.
///
/// [`from_f64`]: FloatElement::from_f64
pub trait FloatElement: Copy + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Same-width unsigned integer holding the raw bit pattern.
    type Bits: UIntElement;

    const DTYPE: DType;
    const BITS: u32;
    const MANTISSA_BITS: u32;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;
    fn to_f64(self) -> f64;

    /// Round-to-nearest narrowing conversion.
    fn from_f64(value: f64) -> Self;
}

impl FloatElement for f16 {
    type Bits = u16;

    const DTYPE: DType = DType::F16;
    const BITS: u32 = 16;
    const MANTISSA_BITS: u32 = 10;

    #[inline]
    fn to_bits(self) -> u16 {
        f16::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u16) -> Self {
        f16::from_bits(bits)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }
}

impl FloatElement for f32 {
    type Bits = u32;

    const DTYPE: DType = DType::F32;
    const BITS: u32 = 32;
    const MANTISSA_BITS: u32 = f32::MANTISSA_DIGITS - 1;

    #[inline]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl FloatElement for f64 {
    type Bits = u64;

    const DTYPE: DType = DType::F64;
    const BITS: u32 = 64;
    const MANTISSA_BITS: u32 = f64::MANTISSA_DIGITS - 1;

    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Mask with the low `nbits` bits set. Saturates at 64.
#[inline]
pub const fn low_bits_mask(nbits: u32) -> u64 {
    if nbits >= 64 {
        u64::MAX
    } else {
        (1u64 << nbits) - 1
    }
}
