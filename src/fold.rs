// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fold overlay: marks that merge following elements into the marked one.
//!
//! A fold mark at absolute index `k` with count `c` makes the walk emit
//! `v[k] + v[k+1] + ... + v[k+c]` as a single element and resume at `k + c + 1`.
//! `v` is the plain overlay underneath, so value marks still substitute before
//! anything is summed.
//!
//! ```text
//! base  = [2, 3, 4, 5]     fold mark {2: 1}
//!
//! absolute   0   1   2   3
//! values     2   3   4   5
//!                    └─+─┘
//! emitted    2   3     9          3 logical elements from 4 absolute slots
//! ```
//!
//! # The walk
//!
//! State is a single absolute index, starting at 0. The walk stops once that
//! index reaches the *absolute* length of the underlying sequence. A fold that
//! would run past the end is clamped there. A fold mark sitting inside an
//! earlier fold's span is stepped over and never takes effect.
//!
//! # Random access
//!
//! There is no closed form for the logical-to-absolute mapping: it depends on
//! every fold before the requested element. [`FoldVirtualSequence::get`]
//! either replays the walk from the start (O(absolute length), the default) or
//! refuses with [`OverlayError::UnsupportedOperation`], chosen through
//! [`FoldOptions`].

use crate::contracts::{check_fold_step, check_iterations_cover_marks};
use crate::error::{OverlayError, Result};
use crate::location::{to_index, Location};
use crate::marks::MarkTable;
use crate::pattern::BasePattern;
use crate::sequence::{SequenceParts, VirtualSequence};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;
use std::ops::Add;

// =============================================================================
// OPTIONS
// =============================================================================

/// How [`FoldVirtualSequence::get`] answers a logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomAccess {
    /// Replay the fold walk from index 0. O(absolute length) per call.
    #[default]
    Replay,
    /// Fail with [`OverlayError::UnsupportedOperation`].
    Unsupported,
}

/// Tunables for a fold sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldOptions {
    pub random_access: RandomAccess,
}

// =============================================================================
// SEQUENCE
// =============================================================================

/// Serializable description of a fold sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de>"
))]
pub struct FoldParts<T> {
    pub base: BasePattern<T>,
    /// Substituted values the folds sum over.
    #[serde(default)]
    pub values: MarkTable<T>,
    /// Merge counts. Zero is rejected on load.
    #[serde(default)]
    pub folds: MarkTable<NonZeroUsize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub options: FoldOptions,
}

/// A virtual sequence whose marks fold following elements into the marked one.
///
/// The absolute length follows the same rule as [`VirtualSequence`], with fold
/// mark keys counted alongside value mark keys. The logical length, the number
/// of elements the walk emits, is at most the absolute length and is only
/// known by walking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "FoldParts<T>",
    into = "FoldParts<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct FoldVirtualSequence<T> {
    overlay: VirtualSequence<T>,
    folds: MarkTable<NonZeroUsize>,
    options: FoldOptions,
}

impl<T> FoldVirtualSequence<T> {
    /// Build a fold sequence from a base pattern and initial fold marks.
    pub fn new<I>(base: impl Into<Vec<T>>, folds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, NonZeroUsize)>,
    {
        let overlay = VirtualSequence::unmarked(base)?;
        Self::from_parts(overlay, folds.into_iter().collect())
    }

    /// Combine an existing plain overlay with a table of fold marks.
    ///
    /// Fails with [`OverlayError::CapacityExceeded`] when a fold key cannot be
    /// covered.
    pub fn from_parts(
        overlay: VirtualSequence<T>,
        folds: MarkTable<NonZeroUsize>,
    ) -> Result<Self> {
        let mut sequence = Self {
            overlay,
            folds,
            options: FoldOptions::default(),
        };
        if let Some(key) = sequence.folds.max_key() {
            sequence.overlay.cover(key)?;
        }
        check_iterations_cover_marks(
            sequence.overlay.iterations(),
            sequence.overlay.pattern_len(),
            sequence.folds.max_key(),
        );
        Ok(sequence)
    }

    pub fn with_options(mut self, options: FoldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> FoldOptions {
        self.options
    }

    /// The plain overlay the folds are applied on top of.
    pub fn overlay(&self) -> &VirtualSequence<T> {
        &self.overlay
    }

    pub fn folds(&self) -> &MarkTable<NonZeroUsize> {
        &self.folds
    }

    /// Absolute length, the bound of the fold walk.
    #[inline]
    pub fn length(&self) -> usize {
        self.overlay.length()
    }

    /// Number of elements the fold walk emits. O(absolute length).
    pub fn logical_len(&self) -> usize {
        let count = self.starts().count();
        tracing::trace!(
            logical_len = count,
            length = self.length(),
            "fold walk finished"
        );
        count
    }

    /// Fold `count` following elements into `index`. Grows the sequence so
    /// that `index` is covered. Returns the previous count, if any.
    ///
    /// Fails with [`OverlayError::CapacityExceeded`], leaving the sequence
    /// untouched, when the grown length would not fit in `usize`.
    pub fn set(&mut self, index: usize, count: NonZeroUsize) -> Result<Option<NonZeroUsize>> {
        self.overlay.cover(index)?;
        let previous = self.folds.set(index, count);
        if previous.is_some() {
            tracing::trace!(index, count = count.get(), "overwrote fold mark");
        }
        Ok(previous)
    }

    /// Remove the fold mark at `index`. The length is left untouched.
    pub fn delete(&mut self, index: usize) -> Option<NonZeroUsize> {
        let removed = self.folds.delete(index);
        if removed.is_some() {
            tracing::trace!(index, "deleted fold mark");
        }
        removed
    }

    /// Substitute the value at `index` before folding.
    pub fn set_value(&mut self, index: usize, value: T) -> Result<Option<T>> {
        self.overlay.set(index, value)
    }

    pub fn delete_value(&mut self, index: usize) -> Option<T> {
        self.overlay.delete(index)
    }

    /// The unfolded value at an absolute index.
    pub fn get_absolute(&self, index: usize) -> Result<&T> {
        self.overlay.get(index)
    }

    #[inline]
    pub fn to_index(&self, iteration: usize, position: usize) -> Option<usize> {
        to_index(iteration, position, self.overlay.pattern_len())
    }

    /// Whether a fold mark sits at the given location.
    pub fn is_marked(&self, iteration: usize, position: usize) -> bool {
        self.to_index(iteration, position)
            .is_some_and(|index| self.folds.contains(index))
    }

    /// Extra absolute positions a step starting at `start` consumes.
    #[inline]
    fn extra_at(&self, start: usize) -> usize {
        self.folds.get(start).map_or(0, |count| count.get())
    }

    /// Exclusive end of the step starting at `start`, clamped to the length.
    #[inline]
    fn step_end(&self, start: usize) -> usize {
        start
            .saturating_add(self.extra_at(start))
            .saturating_add(1)
            .min(self.length())
    }

    /// Absolute start index of every step, without summing anything.
    fn starts(&self) -> impl Iterator<Item = usize> + '_ {
        let length = self.length();
        std::iter::successors(Some(0).filter(|_| length > 0), move |&start| {
            let next = self.step_end(start);
            check_fold_step(start, next, length);
            Some(next).filter(|&next| next < length)
        })
    }
}

impl<T: Clone + Add<Output = T>> FoldVirtualSequence<T> {
    /// Emit the step that starts at absolute index `start`.
    fn step_at(&self, start: usize) -> FoldStep<T> {
        let end = self.step_end(start);
        let value = (start + 1..end).fold(self.overlay.resolve(start).clone(), |sum, index| {
            sum + self.overlay.resolve(index).clone()
        });
        FoldStep {
            start,
            location: self.overlay.locate(start),
            end,
            extra: self.extra_at(start),
            value,
        }
    }

    /// The element at `logical_index` in the folded sequence.
    ///
    /// With [`RandomAccess::Replay`] this walks from the start, so it costs
    /// O(absolute length). Out-of-range indices report the logical length.
    pub fn get(&self, logical_index: usize) -> Result<T> {
        if self.options.random_access == RandomAccess::Unsupported {
            return Err(OverlayError::UnsupportedOperation {
                operation: "random access by logical index",
            });
        }

        let mut emitted = 0;
        for start in self.starts() {
            if emitted == logical_index {
                return Ok(self.step_at(start).value);
            }
            emitted += 1;
        }
        Err(OverlayError::IndexOutOfRange {
            index: logical_index,
            length: emitted,
        })
    }

    /// `(emitted value, extra positions consumed)` for a step that starts at the
    /// given location.
    ///
    /// Fails with [`OverlayError::IndexOutOfRange`] if the location is past the
    /// absolute length, or does not fit in `usize` at all.
    pub fn value_at(&self, iteration: usize, position: usize) -> Result<(T, usize)> {
        let length = self.length();
        let index = self.to_index(iteration, position).unwrap_or(usize::MAX);
        if index >= length {
            return Err(OverlayError::IndexOutOfRange { index, length });
        }
        let step = self.step_at(index);
        Ok((step.value, step.extra))
    }

    /// Walk the fold steps. Finite and restartable.
    pub fn steps(&self) -> FoldWalk<'_, T> {
        FoldWalk {
            sequence: self,
            next: 0,
        }
    }

    /// Walk the emitted values.
    pub fn iter(&self) -> FoldValues<'_, T> {
        FoldValues { walk: self.steps() }
    }

    /// Materialize the folded sequence.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T> TryFrom<FoldParts<T>> for FoldVirtualSequence<T> {
    type Error = OverlayError;

    fn try_from(parts: FoldParts<T>) -> Result<Self> {
        let overlay = VirtualSequence::try_from(SequenceParts {
            base: parts.base,
            marks: parts.values,
            iterations: parts.iterations,
        })?;
        Ok(Self::from_parts(overlay, parts.folds)?.with_options(parts.options))
    }
}

impl<T> From<FoldVirtualSequence<T>> for FoldParts<T> {
    fn from(sequence: FoldVirtualSequence<T>) -> Self {
        let overlay = SequenceParts::from(sequence.overlay);
        Self {
            base: overlay.base,
            values: overlay.marks,
            folds: sequence.folds,
            iterations: overlay.iterations,
            options: sequence.options,
        }
    }
}

// =============================================================================
// WALK
// =============================================================================

/// One step of the fold walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldStep<T> {
    /// Absolute index the step starts at.
    pub start: usize,
    /// `start` as (iteration, position).
    pub location: Location,
    /// Exclusive end of the absolute span that was summed.
    pub end: usize,
    /// Fold count at `start`, or 0. Not clamped.
    pub extra: usize,
    /// Sum of the overlay values over `start..end`.
    pub value: T,
}

/// Iterator over [`FoldStep`]s.
#[derive(Debug, Clone)]
pub struct FoldWalk<'a, T> {
    sequence: &'a FoldVirtualSequence<T>,
    next: usize,
}

impl<T: Clone + Add<Output = T>> Iterator for FoldWalk<'_, T> {
    type Item = FoldStep<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let length = self.sequence.length();
        if self.next >= length {
            return None;
        }
        let step = self.sequence.step_at(self.next);
        check_fold_step(step.start, step.end, length);
        self.next = step.end;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.length().saturating_sub(self.next);
        // Every step consumes at least one slot; a single fold can swallow the rest.
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl<T: Clone + Add<Output = T>> FusedIterator for FoldWalk<'_, T> {}

/// Iterator over the values the fold walk emits.
#[derive(Debug, Clone)]
pub struct FoldValues<'a, T> {
    walk: FoldWalk<'a, T>,
}

impl<T: Clone + Add<Output = T>> Iterator for FoldValues<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|step| step.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T: Clone + Add<Output = T>> FusedIterator for FoldValues<'_, T> {}

impl<'a, T: Clone + Add<Output = T>> IntoIterator for &'a FoldVirtualSequence<T> {
    type Item = T;
    type IntoIter = FoldValues<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn single_fold_merges_neighbour() {
        let seq = FoldVirtualSequence::new(vec![2, 3, 4, 5], vec![(2, nz(1))]).unwrap();
        assert_eq!(seq.length(), 4);
        assert_eq!(seq.to_vec(), vec![2, 3, 9]);
        assert_eq!(seq.logical_len(), 3);
    }

    #[test]
    fn no_folds_is_the_plain_overlay() {
        let mut seq = FoldVirtualSequence::new(vec![1, 2], Vec::new()).unwrap();
        seq.set_value(3, 7).unwrap();
        assert_eq!(seq.to_vec(), seq.overlay().to_vec());
        assert_eq!(seq.to_vec(), vec![1, 2, 1, 7]);
    }

    #[test]
    fn folds_sum_substituted_values() {
        let mut seq = FoldVirtualSequence::new(vec![1, 1, 1], vec![(0, nz(2))]).unwrap();
        seq.set_value(1, 10).unwrap();
        assert_eq!(seq.to_vec(), vec![12]);
    }

    #[test]
    fn fold_past_the_end_is_clamped() {
        let seq = FoldVirtualSequence::new(vec![1, 2, 3], vec![(1, nz(10))]).unwrap();
        assert_eq!(seq.length(), 3);
        assert_eq!(seq.to_vec(), vec![1, 5]);

        let steps: Vec<_> = seq.steps().collect();
        assert_eq!(steps[1].end, 3);
        assert_eq!(steps[1].extra, 10);
    }

    #[test]
    fn fold_inside_another_fold_is_inert() {
        let seq =
            FoldVirtualSequence::new(vec![1, 2, 3, 4], vec![(0, nz(1)), (1, nz(2))]).unwrap();
        assert_eq!(seq.to_vec(), vec![3, 3, 4]);
    }

    #[test]
    fn fold_keys_extend_length() {
        let mut seq = FoldVirtualSequence::new(vec![1, 2], Vec::new()).unwrap();
        seq.set(5, nz(1)).unwrap();
        assert_eq!(seq.length(), 6);
        assert_eq!(seq.to_vec(), vec![1, 2, 1, 2, 1, 2]);

        seq.set(4, nz(1)).unwrap();
        assert_eq!(seq.to_vec(), vec![1, 2, 1, 2, 3]);

        assert_eq!(seq.delete(4), Some(nz(1)));
        assert_eq!(seq.length(), 6);
    }

    #[test]
    fn value_at_reports_extra_consumption() {
        let seq = FoldVirtualSequence::new(vec![2, 3, 4, 5], vec![(2, nz(1))]).unwrap();
        assert_eq!(seq.value_at(0, 2), Ok((9, 1)));
        assert_eq!(seq.value_at(0, 1), Ok((3, 0)));
        assert!(seq.is_marked(0, 2));
        assert!(!seq.is_marked(0, 3));
        assert_eq!(
            seq.value_at(1, 0),
            Err(OverlayError::IndexOutOfRange {
                index: 4,
                length: 4
            })
        );
    }

    #[test]
    fn replayed_get_matches_walk() {
        let seq = FoldVirtualSequence::new(vec![2, 3, 4, 5], vec![(2, nz(1)), (5, nz(2))]).unwrap();
        let walked = seq.to_vec();
        assert_eq!(walked, vec![2, 3, 9, 2, 12]);
        for (i, value) in walked.iter().enumerate() {
            assert_eq!(seq.get(i), Ok(*value));
        }
        assert_eq!(
            seq.get(5),
            Err(OverlayError::IndexOutOfRange {
                index: 5,
                length: 5
            })
        );
    }

    #[test]
    fn unsupported_random_access_refuses() {
        let seq = FoldVirtualSequence::new(vec![2, 3], Vec::new())
            .unwrap()
            .with_options(FoldOptions {
                random_access: RandomAccess::Unsupported,
            });
        assert!(matches!(
            seq.get(0),
            Err(OverlayError::UnsupportedOperation { .. })
        ));
        // Iteration still works.
        assert_eq!(seq.to_vec(), vec![2, 3]);
    }

    #[test]
    fn steps_carry_locations() {
        let seq = FoldVirtualSequence::new(vec![1, 1], vec![(2, nz(1))]).unwrap();
        let steps: Vec<_> = seq.steps().collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].start, 2);
        assert_eq!(steps[2].location, Location::new(1, 0));
        assert_eq!(steps[2].end, 4);
        assert_eq!(steps[2].value, 2);
    }

    #[test]
    fn description_loads_folds_and_options() {
        let json = r#"{
            "base": [2, 3, 4, 5],
            "folds": [[2, 1]],
            "options": {"random_access": "unsupported"}
        }"#;
        let seq: FoldVirtualSequence<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(seq.to_vec(), vec![2, 3, 9]);
        assert_eq!(seq.options().random_access, RandomAccess::Unsupported);

        let zero: std::result::Result<FoldVirtualSequence<i32>, _> =
            serde_json::from_str(r#"{"base": [1], "folds": [[0, 0]]}"#);
        assert!(zero.is_err());
    }

    #[test]
    fn serde_roundtrip_preserves_walk() {
        let mut seq = FoldVirtualSequence::new(vec![1, 2, 3], vec![(4, nz(1))]).unwrap();
        seq.set_value(0, 9).unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        let back: FoldVirtualSequence<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
        assert_eq!(back.to_vec(), seq.to_vec());
    }

    #[test]
    fn marks_past_capacity_leave_the_sequence_alone() {
        let mut seq = FoldVirtualSequence::new(vec![1, 2], vec![(1, nz(1))]).unwrap();
        let before = seq.clone();
        assert!(matches!(
            seq.set(usize::MAX, nz(1)),
            Err(OverlayError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            seq.set_value(usize::MAX, 5),
            Err(OverlayError::CapacityExceeded { .. })
        ));
        assert_eq!(seq, before);
    }

    #[test]
    fn overflowing_location_is_out_of_range() {
        let seq = FoldVirtualSequence::new(vec![2, 3], vec![(0, nz(1))]).unwrap();
        assert!(!seq.is_marked(usize::MAX, 0));
        assert_eq!(
            seq.value_at(usize::MAX, 0),
            Err(OverlayError::IndexOutOfRange {
                index: usize::MAX,
                length: 2
            })
        );
    }
}
