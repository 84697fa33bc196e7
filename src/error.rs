// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by the overlay containers.
//!
//! A missing mark is never an error: it resolves to the base value. Reading past
//! the end and asking the fold variant for something it refuses to do are.
//!
//! There is no "bad index type" variant. Indices are `usize`, so a non-integral
//! or negative key cannot reach these APIs in the first place.

/// Result type for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors that can occur while building or reading a virtual sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// The base pattern was empty. Nothing can repeat an empty unit.
    #[error("base pattern must contain at least one element")]
    InvalidPattern,

    /// Read at or past the current length.
    #[error("index {index} out of range for virtual sequence of length {length}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length at the time of the request.
        length: usize,
    },

    /// Covering `index` would make the length overflow `usize`.
    ///
    /// The top slot `usize::MAX` can never be covered, since the whole
    /// iteration around it would have to fit too.
    #[error(
        "index {index} cannot be covered: length would exceed usize::MAX \
         with pattern length {pattern_len}"
    )]
    CapacityExceeded {
        /// The index that could not be brought inside the sequence.
        index: usize,
        /// `L` of the pattern being repeated.
        pattern_len: usize,
    },

    /// The operation is switched off for this container.
    #[error("{operation} is not supported by this sequence; iterate instead")]
    UnsupportedOperation {
        /// Name of the refused operation.
        operation: &'static str,
    },
}
