use fpq_math::{DType, DTypeKind, MathError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FpqError {
    #[error("nbits {nbits} outside the supported range [{min}, {max}]")]
    InvalidBitWidth { nbits: u32, min: u32, max: u32 },
    #[error("expected a {expected} type, found {found}")]
    TypeMismatch { expected: DTypeKind, found: DType },
    #[error("cannot normalize a zero-length or non-finite vector")]
    UndefinedDirection,
    #[error("invalid format: {float} into {uint} with nbits {nbits}")]
    InvalidFormat { float: DType, uint: DType, nbits: u32 },
    #[error("norm {norm} does not fit in {storage}")]
    NormOutOfRange { norm: f64, storage: DType },
    #[error("decoded component index {index} is out of range for {components} components")]
    InvalidComponentIndex { index: u64, components: usize },
    #[error("Math error: {0}")]
    MathError(#[from] MathError),
}

impl FpqError {
    /// Fails unless `min <= nbits <= max`.
    pub fn check_bit_width(nbits: u32, min: u32, max: u32) -> Result<(), FpqError> {
        if nbits < min || nbits > max {
            return Err(FpqError::InvalidBitWidth { nbits, min, max });
        }
        Ok(())
    }

    /// Fails unless `dtype` is of the `expected` kind.
    pub fn check_kind(dtype: DType, expected: DTypeKind) -> Result<(), FpqError> {
        if dtype.kind() != expected {
            return Err(FpqError::TypeMismatch { expected, found: dtype });
        }
        Ok(())
    }
}
