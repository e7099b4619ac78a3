//! Fallible map over a batch, on the rayon pool when `parallel` is enabled.

#[cfg(feature = "parallel")]
pub(crate) fn try_map<T, R, E, Op>(items: &[T], op: Op) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    Op: Fn(&T) -> Result<R, E> + Sync + Send,
{
    use rayon::prelude::*;
    items.par_iter().map(op).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn try_map<T, R, E, Op>(items: &[T], op: Op) -> Result<Vec<R>, E>
where
    Op: Fn(&T) -> Result<R, E>,
{
    items.iter().map(op).collect()
}
