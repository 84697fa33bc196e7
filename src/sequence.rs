// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The plain overlay: a base pattern repeated `iterations` times, with
//! individual slots replaced by marks.
//!
//! ```text
//! base   = [2, 4]
//! marks  = {3: 5, 4: 3}
//!
//! index    0  1 | 2  3 | 4  5
//! base     2  4 | 2  4 | 2  4
//! virtual  2  4 | 2  5 | 3  4      length = 3 * 2
//! ```
//!
//! # Invariants
//!
//! - `iterations = max(1, 1 + max(k) / L)` over every key ever set.
//! - `length() = iterations * L`, non-decreasing. Deleting a mark never
//!   shrinks it, even when that mark was the reason it grew.
//! - `length()` always fits in `usize`. A mark whose covering length would not
//!   is refused with [`OverlayError::CapacityExceeded`].
//! - For any unmarked `i < length()`, `get(i) == base[i mod L]`.

use crate::contracts::{check_iterations_cover_marks, check_length_monotonic};
use crate::error::{OverlayError, Result};
use crate::location::{iterations_covering, locate, to_index, Location};
use crate::marks::MarkTable;
use crate::pattern::BasePattern;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Serializable description of a virtual sequence.
///
/// `iterations` is optional on input; it can only raise the count derived from
/// the marks, never lower it. A count whose length overflows `usize` is
/// rejected. Serializing a sequence always writes it so that a length grown by
/// since-deleted marks survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de>"
))]
pub struct SequenceParts<T> {
    pub base: BasePattern<T>,
    #[serde(default)]
    pub marks: MarkTable<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
}

/// A long, mostly repeating sequence stored as a base pattern plus marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "SequenceParts<T>",
    into = "SequenceParts<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct VirtualSequence<T> {
    base: BasePattern<T>,
    marks: MarkTable<T>,
    iterations: usize,
}

impl<T> VirtualSequence<T> {
    /// Build a sequence from a base pattern and initial marks.
    ///
    /// The pattern is moved into the sequence; later duplicates in `marks`
    /// overwrite earlier ones. Fails with [`OverlayError::InvalidPattern`] when
    /// `base` is empty and [`OverlayError::CapacityExceeded`] when a mark key
    /// cannot be covered.
    pub fn new<I>(base: impl Into<Vec<T>>, marks: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let base = BasePattern::new(base.into())?;
        Self::from_parts(base, marks.into_iter().collect())
    }

    /// A sequence with no marks: exactly one iteration of `base`.
    pub fn unmarked(base: impl Into<Vec<T>>) -> Result<Self> {
        Self::new(base, std::iter::empty())
    }

    pub fn from_parts(base: BasePattern<T>, marks: MarkTable<T>) -> Result<Self> {
        let iterations = match marks.max_key() {
            Some(key) => covering(key, base.len())?,
            None => 1,
        };
        check_iterations_cover_marks(iterations, base.len(), marks.max_key());
        Ok(Self {
            base,
            marks,
            iterations,
        })
    }

    /// `iterations * L`.
    #[inline]
    pub fn length(&self) -> usize {
        self.iterations * self.base.len()
    }

    /// Number of base copies the sequence spans.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `L`, the length of one iteration.
    #[inline]
    pub fn pattern_len(&self) -> usize {
        self.base.len()
    }

    pub fn base(&self) -> &BasePattern<T> {
        &self.base
    }

    pub fn marks(&self) -> &MarkTable<T> {
        &self.marks
    }

    /// The value at `index`: the mark if there is one, the base value otherwise.
    ///
    /// Fails with [`OverlayError::IndexOutOfRange`] when `index >= length()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let length = self.length();
        if index >= length {
            return Err(OverlayError::IndexOutOfRange { index, length });
        }
        Ok(self.resolve(index))
    }

    /// Unchecked lookup; callers guarantee `index < length()` or accept the
    /// wrap-around base value.
    #[inline]
    pub(crate) fn resolve(&self, index: usize) -> &T {
        self.marks.get(index).unwrap_or_else(|| self.base.at(index))
    }

    /// Store `value` at `index`, growing the sequence if needed.
    ///
    /// Returns the value previously marked there, if any. The only bound on
    /// `index` is that the grown length must fit in `usize`; past that the call
    /// fails with [`OverlayError::CapacityExceeded`] and nothing changes.
    pub fn set(&mut self, index: usize, value: T) -> Result<Option<T>> {
        self.cover(index)?;
        let previous = self.marks.set(index, value);
        if previous.is_some() {
            tracing::trace!(index, "overwrote mark");
        }
        check_iterations_cover_marks(self.iterations, self.base.len(), Some(index));
        Ok(previous)
    }

    /// Revert `index` to its base value. Absent marks are a no-op.
    ///
    /// The length is left untouched.
    pub fn delete(&mut self, index: usize) -> Option<T> {
        let removed = self.marks.delete(index);
        if removed.is_some() {
            tracing::trace!(index, length = self.length(), "deleted mark");
        }
        removed
    }

    /// Grow `iterations` so that `index` falls inside the sequence.
    pub(crate) fn cover(&mut self, index: usize) -> Result<()> {
        let needed = covering(index, self.base.len())?;
        if needed > self.iterations {
            let before = self.length();
            self.iterations = needed;
            check_length_monotonic(before, self.length());
            tracing::debug!(
                index,
                iterations = self.iterations,
                length = self.length(),
                "mark extended virtual sequence"
            );
        }
        Ok(())
    }

    /// `iteration * L + position`, or `None` if it overflows. No range check.
    #[inline]
    pub fn to_index(&self, iteration: usize, position: usize) -> Option<usize> {
        to_index(iteration, position, self.base.len())
    }

    /// Split an absolute index into its iteration and position.
    #[inline]
    pub fn locate(&self, index: usize) -> Location {
        locate(index, self.base.len())
    }

    pub fn is_marked(&self, iteration: usize, position: usize) -> bool {
        self.to_index(iteration, position)
            .is_some_and(|index| self.marks.contains(index))
    }

    /// Fails with [`OverlayError::IndexOutOfRange`] past the end, including
    /// pairs whose index does not fit in `usize`.
    pub fn value_at(&self, iteration: usize, position: usize) -> Result<&T> {
        let index = self
            .to_index(iteration, position)
            .ok_or(OverlayError::IndexOutOfRange {
                index: usize::MAX,
                length: self.length(),
            })?;
        self.get(index)
    }

    /// Lazily walk all `length()` values in index order.
    ///
    /// Each call starts a fresh walk. The iterator borrows the sequence, so the
    /// marks cannot change underneath it.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            sequence: self,
            front: 0,
            back: self.length(),
        }
    }

    /// Marks in increasing index order.
    pub fn marks_sorted(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.marks.iter_sorted()
    }
}

impl<T: Clone> VirtualSequence<T> {
    /// Materialize the whole sequence. O(length).
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> TryFrom<SequenceParts<T>> for VirtualSequence<T> {
    type Error = OverlayError;

    fn try_from(parts: SequenceParts<T>) -> Result<Self> {
        let mut sequence = Self::from_parts(parts.base, parts.marks)?;
        if let Some(iterations) = parts.iterations {
            let pattern_len = sequence.base.len();
            if iterations.checked_mul(pattern_len).is_none() {
                return Err(OverlayError::CapacityExceeded {
                    index: usize::MAX,
                    pattern_len,
                });
            }
            sequence.iterations = sequence.iterations.max(iterations);
        }
        Ok(sequence)
    }
}

/// [`iterations_covering`] as a `Result`.
pub(crate) fn covering(index: usize, pattern_len: usize) -> Result<usize> {
    iterations_covering(index, pattern_len)
        .ok_or(OverlayError::CapacityExceeded { index, pattern_len })
}

impl<T> From<VirtualSequence<T>> for SequenceParts<T> {
    fn from(sequence: VirtualSequence<T>) -> Self {
        Self {
            base: sequence.base,
            marks: sequence.marks,
            iterations: Some(sequence.iterations),
        }
    }
}

/// Lazy in-order walk over a [`VirtualSequence`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    sequence: &'a VirtualSequence<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let value = self.sequence.resolve(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.sequence.resolve(self.back))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a VirtualSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
