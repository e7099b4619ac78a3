use thiserror::Error;

use crate::accel;
use crate::element::FloatElement;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("component index {index} out of range for {len} components")]
    ComponentIndexOutOfRange { index: usize, len: usize },
    #[error("degenerate source range: min == max == {0}")]
    DegenerateRange(f64),
}

/// Compile-time check that an `N`-array maps onto an `M`-array with one slot removed.
struct DropOne<const N: usize, const M: usize>;

impl<const N: usize, const M: usize> DropOne<N, M> {
    const OK: () = assert!(M + 1 == N, "output must have exactly one fewer component");
}

/// Index of the component with the largest absolute value.
///
/// Ties resolve to the lowest index; NaN components never win. Returns 0 for
/// an empty array.
pub fn argmax_abs_index<F: FloatElement, const N: usize>(v: &[F; N]) -> usize {
    let mut best = 0;
    let mut best_abs = f64::NEG_INFINITY;
    for (i, c) in v.iter().enumerate() {
        let a = c.to_f64().abs();
        if a > best_abs {
            best = i;
            best_abs = a;
        }
    }
    best
}

/// [`argmax_abs_index`] over every item of a batch.
pub fn argmax_abs_indices<F: FloatElement, const N: usize>(batch: &[[F; N]]) -> Vec<usize> {
    batch.iter().map(argmax_abs_index).collect()
}

/// Drops the component at `index`, keeping the order of the rest.
pub fn remove_component<F: Copy, const N: usize, const M: usize>(
    v: &[F; N],
    index: usize,
) -> Result<[F; M], MathError> {
    let () = DropOne::<N, M>::OK;
    if index >= N {
        return Err(MathError::ComponentIndexOutOfRange { index, len: N });
    }
    Ok(std::array::from_fn(|i| if i < index { v[i] } else { v[i + 1] }))
}

/// Inverse of [`remove_component`]: places `value` at `index`.
pub fn insert_component<F: Copy, const M: usize, const N: usize>(
    rest: &[F; M],
    index: usize,
    value: F,
) -> Result<[F; N], MathError> {
    let () = DropOne::<N, M>::OK;
    if index >= N {
        return Err(MathError::ComponentIndexOutOfRange { index, len: N });
    }
    Ok(std::array::from_fn(|i| match i.cmp(&index) {
        std::cmp::Ordering::Less => rest[i],
        std::cmp::Ordering::Equal => value,
        std::cmp::Ordering::Greater => rest[i - 1],
    }))
}

/// Affine map of `x` from `[src_min, src_max]` onto `[dst_min, dst_max]`.
///
/// Runs on the dispatched kernel and keeps `x`'s element type.
pub fn remap<F: FloatElement>(
    x: F,
    src_min: f64,
    src_max: f64,
    dst_min: f64,
    dst_max: f64,
) -> Result<F, MathError> {
    if src_max == src_min {
        return Err(MathError::DegenerateRange(src_min));
    }
    Ok(accel::remap(x, src_min, src_max, dst_min, dst_max))
}
