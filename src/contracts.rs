// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the overlay invariants.
//!
//! Debug-mode assertions that the containers call on their mutation and walk
//! paths. They compile to nothing in release builds.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function               | Invariant                                       |
//! |---------------------------------|-------------------------------------------------|
//! | `check_iterations_cover_marks`  | `iterations >= 1 + max(k) / L` for every mark k |
//! |                                 | and `iterations * L` fits in `usize`            |
//! | `check_length_monotonic`        | length never shrinks                            |
//! | `check_fold_step`               | a walk step starts inside the absolute bound    |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

use crate::location::{iterations_covering, locate, to_index};

/// Index mapping sanity on the canonical example: base `[2, 4]`, mark at 3.
const _: () = {
    const L: usize = 2;
    // A mark at 3 needs two iterations: [2, 4, 2, 9].
    assert!(matches!(iterations_covering(3, L), Some(2)));
    assert!(matches!(iterations_covering(1, L), Some(1)));
    // The top slot is never coverable.
    assert!(iterations_covering(usize::MAX, L).is_none());

    let loc = locate(3, L);
    assert!(loc.iteration == 1 && loc.position == 1);
    assert!(matches!(to_index(loc.iteration, loc.position, L), Some(3)));
};

// ============================================================================
// LENGTH CONTRACTS
// ============================================================================

/// Check that `iterations` base copies cover the largest mark key.
///
/// # Panics (debug builds only)
/// Panics if `iterations == 0`, if `iterations * L` overflows, or if a mark
/// sits at or past `iterations * L`.
#[inline]
pub fn check_iterations_cover_marks(iterations: usize, pattern_len: usize, max_key: Option<usize>) {
    debug_assert!(
        iterations >= 1,
        "Contract violation: iterations must be at least 1"
    );
    debug_assert!(
        iterations.checked_mul(pattern_len).is_some(),
        "Contract violation: {} iterations of length {} overflow usize",
        iterations,
        pattern_len
    );

    if let Some(key) = max_key {
        debug_assert!(
            iterations_covering(key, pattern_len).is_some_and(|needed| iterations >= needed),
            "Contract violation: mark at {} not covered by {} iterations of length {}",
            key,
            iterations,
            pattern_len
        );
    }
}

/// Check that an update did not shrink the virtual length.
///
/// # Panics (debug builds only)
/// Panics if `after < before`.
#[inline]
pub fn check_length_monotonic(before: usize, after: usize) {
    debug_assert!(
        after >= before,
        "Contract violation: length shrank from {} to {}",
        before,
        after
    );
}

// ============================================================================
// FOLD WALK CONTRACTS
// ============================================================================

/// Check that a fold step starts inside the absolute length and moves forward.
///
/// # Panics (debug builds only)
/// Panics if `start >= length` or `next <= start`.
#[inline]
pub fn check_fold_step(start: usize, next: usize, length: usize) {
    debug_assert!(
        start < length,
        "Contract violation: fold step at {} past absolute length {}",
        start,
        length
    );
    debug_assert!(
        next > start,
        "Contract violation: fold walk stalled at {} (next = {})",
        start,
        next
    );
}
