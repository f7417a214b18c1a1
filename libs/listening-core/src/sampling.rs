//! Picking the next practice item.

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick uniformly from `pool`, skipping every item equal to `current`.
///
/// Returns `None` when nothing else is left (empty pool, or a pool holding
/// only the current item). Callers treat that as "stay on the current item".
pub fn pick_next<'a, T, R>(pool: &'a [T], current: Option<&T>, rng: &mut R) -> Option<&'a T>
where
    T: PartialEq,
    R: Rng + ?Sized,
{
    let candidates: Vec<&T> = pool
        .iter()
        .filter(|item| current != Some(*item))
        .collect();
    candidates.choose(rng).copied()
}

/// Pick uniformly from the whole pool.
pub fn pick_any<'a, T, R>(pool: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    pool.choose(rng)
}
