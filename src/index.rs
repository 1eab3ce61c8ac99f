//! Visual ↔ logical index mapping.
//!
//! A visual index is a slot in the unrolled (infinite) wheel and may be negative. A logical index
//! is a position in the item collection, `0..count`.

use crate::{Result, SelectorError};

/// Wraps `x` into `0..n`, also for negative `x`.
///
/// `n == 0` has no valid result and returns `0` (debug-asserted).
#[must_use]
pub fn positive_mod(x: i64, n: usize) -> usize {
    debug_assert!(n > 0, "positive_mod: modulus must be positive");
    if n == 0 {
        return 0;
    }
    // Counts above i64::MAX cannot be indexed by a visual index anyway.
    let n = i64::try_from(n).unwrap_or(i64::MAX);
    // rem_euclid never overflows for a positive divisor and is always in 0..n.
    x.rem_euclid(n) as usize
}

/// Maps a visual index onto the logical item it shows.
///
/// With looping, every visual index is valid and wraps. Without looping the two index spaces are
/// identical and anything outside `0..count` is rejected.
pub fn visual_to_logical(visual_index: i64, count: usize, should_loop: bool) -> Result<usize> {
    if count == 0 {
        return Err(SelectorError::InvalidIndex {
            index: visual_index,
            count,
        });
    }
    if should_loop {
        return Ok(positive_mod(visual_index, count));
    }
    match usize::try_from(visual_index) {
        Ok(i) if i < count => Ok(i),
        _ => Err(SelectorError::InvalidIndex {
            index: visual_index,
            count,
        }),
    }
}

/// The visual index of logical item `0` in the cycle that contains `visual_index`.
#[must_use]
pub fn cycle_start(visual_index: i64, count: usize) -> i64 {
    if count == 0 {
        return visual_index;
    }
    visual_index.saturating_sub(positive_mod(visual_index, count) as i64)
}

/// Picks the visual index showing `logical_index` that is closest to `reference`.
///
/// Candidates are the copies of the item in the reference's cycle and the two neighbouring
/// cycles. An exact half-cycle tie resolves forward (towards larger visual indexes).
#[must_use]
pub fn nearest_visual_index(logical_index: usize, count: usize, reference: i64) -> i64 {
    if count == 0 {
        return reference;
    }
    let n = i64::try_from(count).unwrap_or(i64::MAX);
    let logical = positive_mod(logical_index as i64, count) as i64;
    let candidate = cycle_start(reference, count).saturating_add(logical);
    let distance = candidate.saturating_sub(reference);
    if distance.saturating_mul(2) > n {
        candidate.saturating_sub(n)
    } else if distance.saturating_mul(2) <= -n {
        candidate.saturating_add(n)
    } else {
        candidate
    }
}
