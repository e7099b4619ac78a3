//! Kernel dispatch for the hot scalar paths.
//!
//! A [`Kernels`] table bundles the four kernels the codec leans on: affine
//! remap, round-half-to-even, L2 norm and the missing unit-component solve.
//! The portable table handles every float tag. The native table (cargo
//! feature `native`) only serves `f32`/`f64`; other tags are routed back to
//! the portable table. Both tables produce bit-identical results.
//!
//! Kernels work on `f64`. The typed wrappers in this module narrow the result
//! back to the element type of their first argument.

use std::sync::OnceLock;

use tracing::{trace, warn};

use crate::element::{DType, FloatElement};

/// One backend's kernel set.
#[derive(Debug)]
pub struct Kernels {
    pub name: &'static str,
    pub supports: &'static [DType],
    pub remap: fn(f64, f64, f64, f64, f64) -> f64,
    pub rint: fn(f64) -> f64,
    pub norm: fn(&[f64]) -> f64,
    pub solve_missing_component: fn(&[f64]) -> f64,
}

impl Kernels {
    pub fn supports(&self, dtype: DType) -> bool {
        self.supports.contains(&dtype)
    }
}

pub static PORTABLE: Kernels = Kernels {
    name: "portable",
    supports: &DType::FLOATS,
    remap: portable::remap,
    rint: portable::rint,
    norm: portable::norm,
    solve_missing_component: portable::solve_missing_component,
};

#[cfg(feature = "native")]
pub static NATIVE: Kernels = Kernels {
    name: "native",
    supports: &[DType::F32, DType::F64],
    remap: native::remap,
    rint: native::rint,
    norm: native::norm,
    solve_missing_component: native::solve_missing_component,
};

/// Raised when the native table cannot serve an element type.
/// Never leaves this module: [`kernels_for`] swaps in the portable table.
#[derive(Debug, Clone, Copy)]
struct UnsupportedAcceleratedType(DType);

fn native_backend() -> Option<&'static Kernels> {
    static BACKEND: OnceLock<Option<&'static Kernels>> = OnceLock::new();
    *BACKEND.get_or_init(|| {
        let backend = detect_native();
        if backend.is_none() {
            warn!("native kernel backend not compiled in; all element types use portable kernels");
        }
        backend
    })
}

#[cfg(feature = "native")]
fn detect_native() -> Option<&'static Kernels> {
    Some(&NATIVE)
}

#[cfg(not(feature = "native"))]
fn detect_native() -> Option<&'static Kernels> {
    None
}

fn accelerated(
    native: &'static Kernels,
    dtype: DType,
) -> Result<&'static Kernels, UnsupportedAcceleratedType> {
    if native.supports(dtype) {
        Ok(native)
    } else {
        Err(UnsupportedAcceleratedType(dtype))
    }
}

/// Kernel table serving `dtype`.
pub fn kernels_for(dtype: DType) -> &'static Kernels {
    let Some(native) = native_backend() else {
        return &PORTABLE;
    };
    accelerated(native, dtype).unwrap_or_else(|UnsupportedAcceleratedType(dtype)| {
        trace!(%dtype, "element type not accelerated, routing to portable kernels");
        &PORTABLE
    })
}

/// Name of the backend that serves `dtype`.
pub fn backend_name(dtype: DType) -> &'static str {
    kernels_for(dtype).name
}

/// `(x - src_min) * (dst_max - dst_min) / (src_max - src_min) + dst_min`, unchecked.
#[inline]
pub fn remap<F: FloatElement>(x: F, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> F {
    let k = kernels_for(F::DTYPE);
    F::from_f64((k.remap)(x.to_f64(), src_min, src_max, dst_min, dst_max))
}

/// Round half to even.
#[inline]
pub fn rint<F: FloatElement>(x: F) -> F {
    let k = kernels_for(F::DTYPE);
    F::from_f64((k.rint)(x.to_f64()))
}

#[inline]
pub fn norm<F: FloatElement, const N: usize>(v: &[F; N]) -> F {
    let k = kernels_for(F::DTYPE);
    let wide: [f64; N] = std::array::from_fn(|i| v[i].to_f64());
    F::from_f64((k.norm)(&wide))
}

/// `sqrt(1 - sum(others^2))`, clamped at zero.
#[inline]
pub fn solve_missing_component<F: FloatElement, const N: usize>(others: &[F; N]) -> F {
    let k = kernels_for(F::DTYPE);
    let wide: [f64; N] = std::array::from_fn(|i| others[i].to_f64());
    F::from_f64((k.solve_missing_component)(&wide))
}

mod portable {
    pub(super) fn remap(x: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
        (x - src_min) * (dst_max - dst_min) / (src_max - src_min) + dst_min
    }

    pub(super) fn rint(x: f64) -> f64 {
        let rounded = x.round();
        // round() breaks ties away from zero; pull exact halves back to even
        if (rounded - x).abs() == 0.5 {
            2.0 * (x / 2.0).round()
        } else {
            rounded
        }
    }

    fn sum_sq(v: &[f64]) -> f64 {
        v.iter().fold(0.0, |acc, &c| acc + c * c)
    }

    pub(super) fn norm(v: &[f64]) -> f64 {
        sum_sq(v).sqrt()
    }

    pub(super) fn solve_missing_component(others: &[f64]) -> f64 {
        (1.0 - sum_sq(others)).max(0.0).sqrt()
    }
}

#[cfg(feature = "native")]
mod native {
    // Same left-to-right summation order as the portable kernels.
    #[inline(always)]
    fn sum_sq(v: &[f64]) -> f64 {
        match v {
            [a, b] => a * a + b * b,
            [a, b, c] => a * a + b * b + c * c,
            [a, b, c, d] => a * a + b * b + c * c + d * d,
            _ => v.iter().fold(0.0, |acc, &c| acc + c * c),
        }
    }

    #[inline(always)]
    pub(super) fn remap(x: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
        (x - src_min) * (dst_max - dst_min) / (src_max - src_min) + dst_min
    }

    #[inline(always)]
    pub(super) fn rint(x: f64) -> f64 {
        x.round_ties_even()
    }

    #[inline(always)]
    pub(super) fn norm(v: &[f64]) -> f64 {
        sum_sq(v).sqrt()
    }

    #[inline(always)]
    pub(super) fn solve_missing_component(others: &[f64]) -> f64 {
        (1.0 - sum_sq(others)).max(0.0).sqrt()
    }
}
