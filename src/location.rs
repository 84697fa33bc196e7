// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Mapping between absolute indices and (iteration, position) pairs.
//!
//! A virtual sequence is `iterations` back-to-back copies of a base pattern of
//! length `L`. Every absolute index `i` therefore names exactly one slot:
//!
//! ```text
//! i = iteration * L + position,   0 <= position < L
//! ```
//!
//! Both overlay variants go through these helpers so the arithmetic lives in
//! one place. The Kani harness in `kani-proofs/` checks the same formulas.

/// A slot inside the virtual sequence, expressed relative to the base pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Which copy of the base pattern.
    pub iteration: usize,
    /// Offset inside that copy.
    pub position: usize,
}

impl Location {
    pub const fn new(iteration: usize, position: usize) -> Self {
        Self {
            iteration,
            position,
        }
    }
}

/// `iteration * pattern_len + position`, or `None` if that overflows `usize`.
/// No range validation.
///
/// `position` is not required to be below `pattern_len`; callers who pass an
/// overlong position simply land in a later iteration.
#[inline]
pub const fn to_index(iteration: usize, position: usize, pattern_len: usize) -> Option<usize> {
    match iteration.checked_mul(pattern_len) {
        Some(start) => start.checked_add(position),
        None => None,
    }
}

/// Inverse of [`to_index`] for in-range positions.
#[inline]
pub const fn locate(index: usize, pattern_len: usize) -> Location {
    debug_assert!(pattern_len > 0, "pattern length must be non-zero");
    Location {
        iteration: index / pattern_len,
        position: index % pattern_len,
    }
}

/// Number of base iterations needed so that `index` is inside the sequence.
///
/// This is the `1 + k / L` term of `iterations = max(1, 1 + max(k) / L)`.
/// Returns `None` when the count, or the length `count * L` it implies, does
/// not fit in `usize`.
#[inline]
pub const fn iterations_covering(index: usize, pattern_len: usize) -> Option<usize> {
    debug_assert!(pattern_len > 0, "pattern length must be non-zero");
    match (index / pattern_len).checked_add(1) {
        Some(iterations) => match iterations.checked_mul(pattern_len) {
            Some(_) => Some(iterations),
            None => None,
        },
        None => None,
    }
}
