//! Worked examples for the fold overlay.

use crate::common::{assert_fold_consistent, count, folded, RUN};
use vseq::{FoldOptions, FoldVirtualSequence, OverlayError, RandomAccess, VirtualSequence};

#[test]
fn fold_merges_tail_of_run() {
    let seq = folded(&RUN, &[(2, 1)]);
    assert_eq!(seq.length(), 4);
    assert_eq!(seq.to_vec(), vec![2, 3, 9]);
    assert_eq!(seq.logical_len(), 3);
    assert_fold_consistent(&seq);
}

#[test]
fn fold_at_start_swallows_whole_iteration() {
    let seq = folded(&RUN, &[(0, 3)]);
    assert_eq!(seq.to_vec(), vec![14]);
    assert_fold_consistent(&seq);
}

#[test]
fn folds_across_iteration_boundary() {
    // [2, 3, 4, 5 | 2, 3, 4, 5], index 3 folds 5 + 2 across the seam.
    let mut seq = folded(&RUN, &[(3, 1)]);
    seq.set(7, count(1)).unwrap();
    assert_eq!(seq.length(), 8);
    assert_eq!(seq.to_vec(), vec![2, 3, 4, 7, 3, 4, 5]);
    assert_fold_consistent(&seq);
}

#[test]
fn step_sum_equals_overlay_span() {
    let mut seq = folded(&RUN, &[(1, 2), (5, 2)]);
    seq.set_value(2, 40).unwrap();
    seq.set_value(6, -1).unwrap();

    for step in seq.steps() {
        let span: i32 = (step.start..step.end)
            .map(|i| *seq.get_absolute(i).unwrap())
            .sum();
        assert_eq!(step.value, span, "step at {} disagrees", step.start);
    }
    assert_fold_consistent(&seq);
}

#[test]
fn value_at_pairs_value_with_consumption() {
    let seq = folded(&RUN, &[(2, 1)]);
    assert_eq!(seq.value_at(0, 0), Ok((2, 0)));
    assert_eq!(seq.value_at(0, 2), Ok((9, 1)));
}

#[test]
fn deleting_fold_restores_elements() {
    let mut seq = folded(&RUN, &[(2, 1)]);
    assert_eq!(seq.delete(2), Some(count(1)));
    assert_eq!(seq.to_vec(), RUN.to_vec());
    assert_eq!(seq.delete(2), None);
}

#[test]
fn get_past_logical_end_reports_logical_length() {
    let seq = folded(&RUN, &[(2, 1)]);
    assert_eq!(
        seq.get(3),
        Err(OverlayError::IndexOutOfRange {
            index: 3,
            length: 3
        })
    );
}

#[test]
fn random_access_can_be_disabled() {
    let seq = folded(&RUN, &[(2, 1)]).with_options(FoldOptions {
        random_access: RandomAccess::Unsupported,
    });
    assert_eq!(
        seq.get(0),
        Err(OverlayError::UnsupportedOperation {
            operation: "random access by logical index"
        })
    );
    assert_eq!(seq.iter().count(), 3);
}

#[test]
fn walk_is_restartable() {
    let seq = folded(&RUN, &[(1, 1), (6, 1)]);
    let first: Vec<i32> = (&seq).into_iter().collect();
    let second: Vec<i32> = seq.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn folds_over_existing_overlay() {
    let overlay = VirtualSequence::new(vec![1.5f64, 2.5], vec![(2, 10.0)]).unwrap();
    let folds = vec![(1, count(1))].into_iter().collect();
    let seq = FoldVirtualSequence::from_parts(overlay, folds).unwrap();
    assert_eq!(seq.to_vec(), vec![1.5, 12.5, 2.5]);
}
