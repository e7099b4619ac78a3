//! # fpq-math
//!
//! Numeric groundwork for the fpq codec:
//! - [`FloatElement`] / [`UIntElement`]: the float and code types the codec is
//!   generic over, plus the [`DType`] runtime tag
//! - [`utils`]: argmax-of-absolute-value, component removal/insertion, remap
//! - [`accel`]: per-element-type kernel dispatch (native vs portable)

pub mod accel;
pub mod element;
pub mod utils;

pub use element::{low_bits_mask, DType, DTypeKind, FloatElement, UIntElement};
pub use utils::{
    argmax_abs_index, argmax_abs_indices, insert_component, remap, remove_component, MathError,
};
