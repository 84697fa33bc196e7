// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sparse table of deviations from the base pattern.
//!
//! Only positions that differ are stored. Storage is a hash map, so nothing
//! here is ordered; callers that need increasing indices ask for
//! [`MarkTable::sorted_keys`] and pay the sort on demand. Marks are expected to
//! be sparse relative to the virtual length, which keeps that cheap.
//!
//! The payload is generic: the plain overlay stores replacement values, the
//! fold overlay stores merge counts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from absolute index to mark payload. Keys are unique.
///
/// Serialized as a list of `(index, payload)` pairs in increasing index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(usize, P)>",
    into = "Vec<(usize, P)>",
    bound(
        serialize = "P: Serialize + Clone",
        deserialize = "P: Deserialize<'de>"
    )
)]
pub struct MarkTable<P> {
    entries: HashMap<usize, P>,
}

impl<P> Default for MarkTable<P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<P> MarkTable<P> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&P> {
        self.entries.get(&index)
    }

    /// Store `payload` at `index`, returning whatever was there before.
    #[inline]
    pub fn set(&mut self, index: usize, payload: P) -> Option<P> {
        self.entries.insert(index, payload)
    }

    /// Remove the mark at `index`. `None` means there was nothing to remove.
    #[inline]
    pub fn delete(&mut self, index: usize) -> Option<P> {
        self.entries.remove(&index)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Largest marked index, if any. O(marks).
    pub fn max_key(&self) -> Option<usize> {
        self.entries.keys().copied().max()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Marked indices in increasing order.
    pub fn sorted_keys(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// `(index, payload)` pairs in increasing index order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (usize, &P)> + '_ {
        self.sorted_keys()
            .into_iter()
            .filter_map(move |index| self.entries.get(&index).map(|p| (index, p)))
    }
}

impl<P> FromIterator<(usize, P)> for MarkTable<P> {
    /// Later pairs overwrite earlier ones with the same index.
    fn from_iter<I: IntoIterator<Item = (usize, P)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<P> Extend<(usize, P)> for MarkTable<P> {
    fn extend<I: IntoIterator<Item = (usize, P)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<P> From<Vec<(usize, P)>> for MarkTable<P> {
    fn from(pairs: Vec<(usize, P)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<P> From<MarkTable<P>> for Vec<(usize, P)> {
    fn from(table: MarkTable<P>) -> Self {
        let mut pairs: Vec<(usize, P)> = table.entries.into_iter().collect();
        pairs.sort_unstable_by_key(|(index, _)| *index);
        pairs
    }
}
