// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The repeating unit underneath every virtual sequence.
//!
//! A `BasePattern` owns its elements. Once a pattern is bound to a sequence
//! nobody else holds a handle that could change it, so every read through the
//! overlay sees the same snapshot.

use crate::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};

/// Immutable, non-empty pattern with modulo-indexed lookup.
///
/// **Invariant**: `len() >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<T>",
    into = "Vec<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct BasePattern<T> {
    elements: Box<[T]>,
}

impl<T> BasePattern<T> {
    /// Take ownership of `elements` as the repeating unit.
    ///
    /// Fails with [`OverlayError::InvalidPattern`] if `elements` is empty.
    pub fn new(elements: Vec<T>) -> Result<Self> {
        if elements.is_empty() {
            return Err(OverlayError::InvalidPattern);
        }
        Ok(Self {
            elements: elements.into_boxed_slice(),
        })
    }

    /// Length of one iteration, `L`.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`; kept so clippy's `len_without_is_empty` stays quiet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `base[index mod L]`.
    #[inline]
    pub fn at(&self, index: usize) -> &T {
        &self.elements[index % self.elements.len()]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T> TryFrom<Vec<T>> for BasePattern<T> {
    type Error = OverlayError;

    fn try_from(elements: Vec<T>) -> Result<Self> {
        Self::new(elements)
    }
}

impl<T> From<BasePattern<T>> for Vec<T> {
    fn from(pattern: BasePattern<T>) -> Self {
        pattern.elements.into_vec()
    }
}
