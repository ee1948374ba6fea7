//! Shuffle index selection
//!
//! Shuffle never reorders the stored queue. It only changes how the next or
//! previous index is picked: uniformly at random over the whole queue, each
//! pick independent of the last. The same track may therefore play twice in
//! a row.

use rand::Rng;

/// Pick a uniformly random index in `0..len`
///
/// Returns `None` for an empty queue.
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
