// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for set/delete scripts on the plain overlay.
//!
//! Replays arbitrary edits against a `VirtualSequence` and a plain `Vec`
//! model. Length must never shrink, and every read must match the model. Marks
//! at the top of `usize` must be refused without touching the sequence.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vseq::{OverlayError, VirtualSequence};

#[derive(Debug, Arbitrary)]
enum Op {
    Set { index: u16, value: i8 },
    SetTop { value: i8 },
    Delete { index: u16 },
    Get { index: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    base: Vec<i8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let Ok(mut seq) = VirtualSequence::unmarked(input.base.clone()) else {
        assert!(input.base.is_empty(), "only an empty base may be rejected");
        return;
    };

    // Model: the fully materialized sequence.
    let mut model: Vec<i8> = input.base.clone();

    for op in input.ops {
        let before = seq.length();
        match op {
            Op::Set { index, value } => {
                let index = usize::from(index);
                seq.set(index, value).expect("u16 index fits");
                while model.len() < seq.length() {
                    model.push(input.base[model.len() % input.base.len()]);
                }
                model[index] = value;
            }
            Op::SetTop { value } => {
                assert!(matches!(
                    seq.set(usize::MAX, value),
                    Err(OverlayError::CapacityExceeded { .. })
                ));
                assert_eq!(seq.length(), before, "refused set changed the length");
            }
            Op::Delete { index } => {
                let index = usize::from(index);
                if seq.delete(index).is_some() {
                    model[index] = input.base[index % input.base.len()];
                }
                assert_eq!(seq.length(), before, "delete changed the length");
            }
            Op::Get { index } => {
                let index = usize::from(index);
                match seq.get(index) {
                    Ok(value) => assert_eq!(*value, model[index]),
                    Err(OverlayError::IndexOutOfRange { length, .. }) => {
                        assert!(index >= length);
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        }
        assert!(seq.length() >= before, "length shrank");
        assert_eq!(seq.length(), model.len());
    }

    let walked: Vec<i8> = seq.iter().copied().collect();
    assert_eq!(walked, model);
});
