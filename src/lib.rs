//! Virtual sequences: a short repeating pattern plus sparse deviations.
//!
//! A long, mostly repeating sequence is stored as a base pattern and a table of
//! marks instead of being materialized. Two overlays are provided:
//!
//! - [`VirtualSequence`] substitutes individual values.
//! - [`FoldVirtualSequence`] folds following elements into a marked one,
//!   summing them and removing them from the emitted sequence.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  pattern.rs  │   │  marks.rs   │   │ location.rs  │
//! │ (BasePattern)│   │ (MarkTable) │   │ (to_index,   │
//! │              │   │             │   │  locate)     │
//! └──────┬───────┘   └──────┬──────┘   └──────┬───────┘
//!        └──────────────────┼─────────────────┘
//!                           ▼
//!                  ┌─────────────────┐     ┌──────────────────────┐
//!                  │   sequence.rs   │────▶│       fold.rs        │
//!                  │(VirtualSequence)│     │ (FoldVirtualSequence,│
//!                  └─────────────────┘     │  FoldWalk)           │
//!                                          └──────────────────────┘
//!        contracts.rs: debug-mode invariant checks on every mutation
//! ```
//!
//! # Invariants
//!
//! | Property                        | Where it is enforced                 |
//! |---------------------------------|--------------------------------------|
//! | Base pattern is non-empty       | `BasePattern::new`, serde `try_from` |
//! | `iterations = max(1, 1+max(k)/L)` | `VirtualSequence::cover`, contracts |
//! | Length never shrinks            | `delete` leaves `iterations` alone   |
//! | Length fits in `usize`          | `CapacityExceeded` from `set`, load  |
//! | Fold walk bound is absolute     | `FoldWalk`, `check_fold_step`        |
//!
//! # Usage
//!
//! ```
//! use std::num::NonZeroUsize;
//! use vseq::{FoldVirtualSequence, VirtualSequence};
//!
//! let mut seq = VirtualSequence::unmarked(vec![2, 4])?;
//! seq.set(3, 9)?;
//! assert_eq!(seq.to_vec(), vec![2, 4, 2, 9]);
//!
//! let one = NonZeroUsize::new(1).unwrap();
//! let folded = FoldVirtualSequence::new(vec![2, 3, 4, 5], vec![(2, one)])?;
//! assert_eq!(folded.to_vec(), vec![2, 3, 9]);
//! # Ok::<(), vseq::OverlayError>(())
//! ```
//!
//! Nothing here is thread-safe or meant to be; a sequence has one owner. The
//! iterators borrow the sequence, so marks cannot change during a walk.

// Module declarations
pub mod contracts;
mod error;
mod fold;
mod location;
mod marks;
mod pattern;
mod sequence;
pub mod testing;

// Re-exports for public API
pub use error::{OverlayError, Result};
pub use fold::{
    FoldOptions, FoldParts, FoldStep, FoldValues, FoldVirtualSequence, FoldWalk, RandomAccess,
};
pub use location::{iterations_covering, locate, to_index, Location};
pub use marks::MarkTable;
pub use pattern::BasePattern;
pub use sequence::{Iter, SequenceParts, VirtualSequence};
