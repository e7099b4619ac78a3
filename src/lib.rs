//! # fpq
//!
//! Floating-point quantization: scalars, 3-D vectors and unit quaternions
//! packed into fixed-width unsigned integers and unpacked back.
//!
//! - [`fpq_math`]: element types, component helpers, kernel dispatch
//! - [`fpq_core`]: bit truncation and unorm/snorm encodings
//! - [`fpq_geom`]: vector and quaternion quantizers
//!
//! ```
//! use fpq::{decode_uint_to_vec, encode_vec_to_uint, SignConvention};
//!
//! let code: u64 = encode_vec_to_uint(&[-50.0f64, 30.0, 20.0], 20, SignConvention::Std)?;
//! let back: [f64; 3] = decode_uint_to_vec(code, 20, SignConvention::Std)?;
//! assert!((back[0] + 50.0).abs() < 0.05);
//! # Ok::<(), fpq::FpqError>(())
//! ```

pub use fpq_core;
pub use fpq_geom;
pub use fpq_math;

pub use fpq_core::{
    can_express_snorm, can_express_unorm, decode_d3d_snorm_to_fp, decode_ogl_snorm_to_fp,
    decode_snorm_to_fp, decode_std_snorm_to_fp, decode_std_unorm_to_fp, decode_uint_to_fp,
    encode_fp_to_d3d_snorm, encode_fp_to_ogl_snorm, encode_fp_to_snorm, encode_fp_to_std_snorm,
    encode_fp_to_std_unorm, encode_fp_to_uint, FpqError, SignConvention,
};
pub use fpq_geom::{
    calc_breakdown_of_quat, calc_breakdown_of_uint, decode_uint_to_quat, decode_uint_to_quats,
    decode_uint_to_vec, decode_uint_to_vecs, encode_quat_to_uint, encode_quats_to_uint,
    encode_vec_to_uint, encode_vecs_to_uint, is_valid_format, is_valid_quat_format, QuatFormat,
    VectorFormat,
};
pub use fpq_math::{DType, FloatElement, UIntElement};
pub use half::f16;
