//! # fpq-core
//!
//! Bit-level float codec for the fpq quantizers.
//!
//! - [`fp`]: keep the top `nbits` of a float's bit pattern ([`encode_fp_to_uint`])
//! - [`normalized`]: unorm and snorm encodings under a [`SignConvention`]
//! - [`FpqError`]: the error taxonomy shared by every encode/decode call
//!
//! All preconditions are checked before any work is done; a failing call has
//! no side effects.

pub mod convention;
pub mod error;
pub mod fp;
pub mod normalized;

pub use convention::{SignConvention, UnknownConvention};
pub use error::FpqError;
pub use fp::{
    decode_uint_to_fp, decode_uint_to_fp_as, encode_fp_to_uint, encode_fp_to_uint_as, narrow_fp_as,
};
pub use normalized::{
    can_express_snorm, can_express_unorm, decode_d3d_snorm_to_fp, decode_ogl_snorm_to_fp,
    decode_snorm_to_fp, decode_std_snorm_to_fp, decode_std_unorm_to_fp, decode_twos_snorm_to_fp,
    encode_fp_to_d3d_snorm, encode_fp_to_ogl_snorm, encode_fp_to_snorm, encode_fp_to_std_snorm,
    encode_fp_to_std_unorm, encode_fp_to_twos_snorm,
};
