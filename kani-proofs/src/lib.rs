// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for the vseq index arithmetic.
//!
//! This standalone crate extracts the index-mapping functions and the fold
//! step bound and proves them for all inputs in range using Kani.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Roundtrip**: to_index(locate(i)) == i, with position < L
//! 2. **Coverage**: iterations_covering(i) is the least count whose length exceeds i
//! 3. **Monotonic**: growing to cover a new key never lowers the iteration count
//! 4. **Progress**: a fold step always advances and never passes the length
//! 5. **No overflow**: a covering count, when there is one, has a length that
//!    fits in `usize`, and the top index never has one

// ============================================================================
// INDEX ARITHMETIC (copied from src/location.rs)
// ============================================================================

/// `iteration * pattern_len + position`, `None` on overflow.
pub fn to_index(iteration: usize, position: usize, pattern_len: usize) -> Option<usize> {
    iteration.checked_mul(pattern_len)?.checked_add(position)
}

/// Split an absolute index into `(iteration, position)`.
pub fn locate(index: usize, pattern_len: usize) -> (usize, usize) {
    (index / pattern_len, index % pattern_len)
}

/// Iterations needed so that `index` is inside the sequence, `None` if the
/// resulting length overflows.
pub fn iterations_covering(index: usize, pattern_len: usize) -> Option<usize> {
    let iterations = (index / pattern_len).checked_add(1)?;
    iterations.checked_mul(pattern_len).map(|_| iterations)
}

// ============================================================================
// FOLD STEP (copied from src/fold.rs)
// ============================================================================

/// Exclusive end of a fold step starting at `start` with `extra` folded slots.
pub fn step_end(start: usize, extra: usize, length: usize) -> usize {
    start.saturating_add(extra).saturating_add(1).min(length)
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Bound inputs so multiplication cannot overflow in the model.
    const MAX_LEN: usize = 64;
    const MAX_INDEX: usize = 1 << 20;

    /// Verify locate and to_index are inverses.
    #[kani::proof]
    fn verify_locate_roundtrip() {
        let len: usize = kani::any_where(|&n| n >= 1 && n <= MAX_LEN);
        let index: usize = kani::any_where(|&i| i <= MAX_INDEX);

        let (iteration, position) = locate(index, len);
        kani::assert(position < len, "position must be inside one iteration");
        kani::assert(
            to_index(iteration, position, len) == Some(index),
            "to_index(locate(i)) must be i",
        );
    }

    /// Verify the covering count is exact: enough, and no more than needed.
    #[kani::proof]
    fn verify_covering_is_minimal() {
        let len: usize = kani::any_where(|&n| n >= 1 && n <= MAX_LEN);
        let index: usize = kani::any_where(|&i| i <= MAX_INDEX);

        let iterations = iterations_covering(index, len).unwrap();
        kani::assert(iterations >= 1, "at least one iteration");
        kani::assert(index < iterations * len, "index must be covered");
        kani::assert(
            index >= (iterations - 1) * len,
            "one fewer iteration must not cover index",
        );
    }

    /// Verify growing to cover a key never lowers the iteration count.
    #[kani::proof]
    fn verify_cover_monotonic() {
        let len: usize = kani::any_where(|&n| n >= 1 && n <= MAX_LEN);
        let current: usize = kani::any_where(|&n| n >= 1 && n <= MAX_INDEX);
        let key: usize = kani::any_where(|&i| i <= MAX_INDEX);

        let grown = current.max(iterations_covering(key, len).unwrap());
        kani::assert(grown >= current, "cover must not shrink");
        kani::assert(key < grown * len, "key must be inside after cover");
    }

    /// Verify any covering count yields a representable length, for all
    /// inputs including the top of `usize`.
    #[kani::proof]
    fn verify_covering_never_overflows() {
        let len: usize = kani::any_where(|&n| n >= 1);
        let index: usize = kani::any();

        if let Some(iterations) = iterations_covering(index, len) {
            kani::assert(
                iterations.checked_mul(len).is_some(),
                "covered length must fit in usize",
            );
            kani::assert(index < iterations * len, "index must be covered");
        }
        kani::assert(
            iterations_covering(usize::MAX, len).is_none(),
            "the top index is never coverable",
        );
    }

    /// Verify a fold step advances and stays inside the absolute length.
    #[kani::proof]
    fn verify_step_progress() {
        let length: usize = kani::any_where(|&n| n >= 1);
        let start: usize = kani::any_where(|&s| s < length);
        let extra: usize = kani::any();

        let end = step_end(start, extra, length);
        kani::assert(end > start, "step must advance");
        kani::assert(end <= length, "step must not pass the length");
    }
}
