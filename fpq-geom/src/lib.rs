//! # fpq-geom
//!
//! Packs 3-D vectors and unit quaternions into single fixed-width integers.
//!
//! Key items:
//! - [`encode_vec_to_uint`] / [`decode_uint_to_vec`]: dropped-largest-component
//!   direction plus a truncated-float norm
//! - [`encode_quat_to_uint`] / [`decode_uint_to_quat`]: smallest-three quaternions
//! - [`VectorFormat`] / [`QuatFormat`]: serde descriptors with validity checks
//!
//! Batch variants run on the rayon pool with the `parallel` feature (default).

mod batch;
pub mod format;
pub mod quaternion;
mod smallest_three;
pub mod vector;

pub use format::{
    calc_breakdown_of_quat, calc_breakdown_of_uint, is_valid_format, is_valid_quat_format,
    validate_format, validate_quat_format, QuatBreakdown, QuatFormat, VectorBreakdown,
    VectorFormat, INDEX_BITS,
};
pub use quaternion::{
    decode_uint_to_quat, decode_uint_to_quats, encode_quat_to_uint, encode_quats_to_uint,
};
pub use vector::{
    decode_uint_to_vec, decode_uint_to_vecs, encode_vec_to_uint, encode_vecs_to_uint,
};
