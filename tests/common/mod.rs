//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::num::NonZeroUsize;
use vseq::{FoldVirtualSequence, VirtualSequence};

// Re-export canonical test utilities from vseq::testing
pub use vseq::testing::{count, expand, expand_covering, fold_reference};

// ============================================================================
// FIXTURES
// ============================================================================

/// The two-element pattern most of the scenarios start from.
pub const PAIR: [i32; 2] = [2, 4];

/// A four-element pattern for fold scenarios.
pub const RUN: [i32; 4] = [2, 3, 4, 5];

/// Plain overlay over `base` with the given marks.
pub fn plain(base: &[i32], marks: &[(usize, i32)]) -> VirtualSequence<i32> {
    VirtualSequence::new(base.to_vec(), marks.to_vec()).expect("non-empty base")
}

/// Fold overlay over `base` with the given fold counts.
pub fn folded(base: &[i32], folds: &[(usize, usize)]) -> FoldVirtualSequence<i32> {
    let folds: Vec<(usize, NonZeroUsize)> = folds.iter().map(|&(i, c)| (i, count(c))).collect();
    FoldVirtualSequence::new(base.to_vec(), folds).expect("non-empty base")
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Iteration, random access and brute-force expansion all agree.
pub fn assert_plain_consistent(seq: &VirtualSequence<i32>) {
    let walked: Vec<i32> = seq.iter().copied().collect();
    assert_eq!(walked.len(), seq.length(), "walk length != length()");

    for (i, value) in walked.iter().enumerate() {
        assert_eq!(seq.get(i), Ok(value), "get({}) disagrees with the walk", i);
    }

    let base = seq.base().as_slice();
    let marks: Vec<(usize, i32)> = seq.marks_sorted().map(|(i, v)| (i, *v)).collect();
    let mut expected = expand(base, &marks);
    // A deleted mark can leave the length above what the remaining marks need.
    while expected.len() < seq.length() {
        expected.push(base[expected.len() % base.len()]);
    }
    assert_eq!(walked, expected);
}

/// The fold walk, replayed random access and the reference scan all agree.
pub fn assert_fold_consistent(seq: &FoldVirtualSequence<i32>) {
    let walked = seq.to_vec();
    assert_eq!(walked.len(), seq.logical_len(), "walk length != logical_len()");

    for (i, value) in walked.iter().enumerate() {
        assert_eq!(seq.get(i), Ok(*value), "get({}) disagrees with the walk", i);
    }

    let values = seq.overlay().to_vec();
    let folds: Vec<(usize, usize)> = seq
        .folds()
        .iter_sorted()
        .map(|(i, c)| (i, c.get()))
        .collect();
    assert_eq!(walked, fold_reference(&values, &folds));
}
