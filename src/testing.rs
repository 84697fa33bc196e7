//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! The functions here materialize sequences the slow, obvious way so tests
//! can compare the overlays against them.

#![doc(hidden)]

use std::num::NonZeroUsize;
use std::ops::Add;

/// Materialize a plain overlay by brute force: repeat `base` enough times to
/// cover every mark, then write the marks over it.
pub fn expand<T: Clone>(base: &[T], marks: &[(usize, T)]) -> Vec<T> {
    expand_covering(base, marks, &[])
}

/// Like [`expand`], but `extra_keys` also count towards the length. Fold mark
/// keys go here.
pub fn expand_covering<T: Clone>(
    base: &[T],
    marks: &[(usize, T)],
    extra_keys: &[usize],
) -> Vec<T> {
    let len = base.len();
    let iterations = marks
        .iter()
        .map(|(index, _)| *index)
        .chain(extra_keys.iter().copied())
        .map(|index| index / len + 1)
        .max()
        .unwrap_or(1);

    let mut values: Vec<T> = base.iter().cloned().cycle().take(iterations * len).collect();
    for (index, value) in marks {
        values[*index] = value.clone();
    }
    values
}

/// Apply fold marks to already materialized values.
///
/// Scans left to right; a fold at `i` with count `c` sums `values[i..=i+c]`
/// (clipped to the end) and resumes after it.
pub fn fold_reference<T: Clone + Add<Output = T>>(
    values: &[T],
    folds: &[(usize, usize)],
) -> Vec<T> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < values.len() {
        // Last write wins, matching the mark table.
        let count = folds
            .iter()
            .rev()
            .find(|(index, _)| *index == i)
            .map_or(0, |(_, count)| *count);
        let end = (i + count + 1).min(values.len());
        let sum = values[i + 1..end]
            .iter()
            .cloned()
            .fold(values[i].clone(), |acc, v| acc + v);
        out.push(sum);
        i = end;
    }
    out
}

/// Fold count from a plain integer; zero becomes one.
pub fn count(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}
