// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the fold walk.
//!
//! The walk must terminate, tile the absolute range without gaps, and emit
//! spans whose sums match the plain overlay. Replayed random access must agree
//! with the walk.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::num::NonZeroUsize;
use vseq::{FoldVirtualSequence, VirtualSequence};

#[derive(Debug, Arbitrary)]
struct Input {
    base: Vec<i16>,
    values: Vec<(u8, i16)>,
    folds: Vec<(u8, u8)>,
}

fuzz_target!(|input: Input| {
    let values = input.values.iter().map(|&(i, v)| (usize::from(i), i64::from(v)));
    let base: Vec<i64> = input.base.iter().map(|&v| i64::from(v)).collect();
    let Ok(overlay) = VirtualSequence::new(base, values) else {
        return;
    };

    let folds = input
        .folds
        .iter()
        .filter_map(|&(i, c)| NonZeroUsize::new(usize::from(c)).map(|c| (usize::from(i), c)))
        .collect();
    let seq = FoldVirtualSequence::from_parts(overlay, folds).expect("u16 keys always fit");

    let mut cursor = 0;
    let mut emitted = Vec::new();
    for step in seq.steps() {
        assert_eq!(step.start, cursor, "gap in fold walk");
        assert!(step.end > step.start && step.end <= seq.length());

        let span: i64 = (step.start..step.end)
            .map(|i| *seq.overlay().get(i).expect("span inside length"))
            .sum();
        assert_eq!(step.value, span);

        cursor = step.end;
        emitted.push(step.value);
    }
    assert_eq!(cursor, seq.length(), "walk stopped early");

    // Random access replays are O(n) each; sample a few.
    for i in [0, emitted.len() / 2, emitted.len().saturating_sub(1)] {
        if let Some(expected) = emitted.get(i) {
            assert_eq!(seq.get(i).ok(), Some(*expected));
        }
    }
    assert!(seq.get(emitted.len()).is_err());
});
