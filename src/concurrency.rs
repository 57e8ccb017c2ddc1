//! Concurrency helper: bound how many per-forum passes run in parallel.

use anyhow::Result;
use rayon::prelude::*;

/// Run `f` over `items` with at most `limit` in flight. `limit <= 1` runs
/// sequentially in order.
pub fn for_each_limited<T, F>(items: &[T], limit: usize, f: F) -> Result<()>
where
    T: Sync,
    F: Sync + Fn(&T) -> Result<()>,
{
    if limit <= 1 {
        for item in items {
            f(item)?;
        }
        return Ok(());
    }
    for chunk in items.chunks(limit) {
        chunk.par_iter().try_for_each(|item| f(item))?;
    }
    Ok(())
}
