//! Shuffling and sampling helpers.
//!
//! Correctness in the exercises is tracked by value, never by position, so
//! the one place a post-shuffle position matters — the synthesizer's
//! `correctAnswer` index — is computed here exactly once and threaded
//! explicitly.

use rand::seq::SliceRandom;
use rand::Rng;

/// A shuffled candidate list together with the target's post-shuffle index.
#[derive(Debug, Clone)]
pub struct Located<T> {
    pub shuffled: Vec<T>,
    /// Zero-based index of the target in `shuffled`.
    pub index: usize,
}

/// Insert `target` among `candidates`, shuffle, and report where it landed.
///
/// The index must be recomputed on every call; shuffles are freshly
/// randomized and never assumed stable.
pub fn shuffle_and_locate<T: Clone + PartialEq>(
    candidates: Vec<T>,
    target: T,
    rng: &mut impl Rng,
) -> Located<T> {
    let probe = target.clone();
    let mut shuffled = candidates;
    shuffled.push(target);
    shuffled.shuffle(rng);
    // target was just inserted, so a match always exists
    let index = shuffled.iter().position(|it| *it == probe).unwrap_or(0);
    Located { shuffled, index }
}

/// Sample up to `k` items from `pool` uniformly, without replacement.
///
/// When the pool holds fewer than `k` items, all of them are returned.
pub fn sample_without_replacement<T: Clone>(pool: &[T], k: usize, rng: &mut impl Rng) -> Vec<T> {
    pool.choose_multiple(rng, k.min(pool.len()))
        .cloned()
        .collect()
}

/// Shuffle a list in place.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    items.shuffle(rng);
}
