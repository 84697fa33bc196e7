//! Worked examples for the plain overlay.

use crate::common::{assert_plain_consistent, plain, PAIR};
use vseq::{OverlayError, VirtualSequence};

#[test]
fn unmarked_pair() {
    let seq = plain(&PAIR, &[]);
    assert_eq!(seq.length(), 2);
    assert_eq!(seq.to_vec(), vec![2, 4]);
    assert_plain_consistent(&seq);
}

#[test]
fn mark_inside_first_iteration() {
    let mut seq = plain(&PAIR, &[]);
    seq.set(1, 5).unwrap();
    assert_eq!(seq.length(), 2);
    assert_eq!(seq.to_vec(), vec![2, 5]);
    assert_plain_consistent(&seq);
}

#[test]
fn mark_past_the_end_adds_iterations() {
    let mut seq = plain(&PAIR, &[]);
    seq.set(3, 9).unwrap();
    assert_eq!(seq.length(), 4);
    assert_eq!(seq.to_vec(), vec![2, 4, 2, 9]);
    assert_plain_consistent(&seq);
}

#[test]
fn delete_reverts_without_shrinking() {
    let mut seq = plain(&PAIR, &[]);
    seq.set(1, 5).unwrap();
    assert_eq!(seq.delete(1), Some(5));
    assert_eq!(seq.length(), 2);
    assert_eq!(seq.get(1), Ok(&4));
    assert_plain_consistent(&seq);
}

#[test]
fn deleting_the_last_mark_keeps_grown_length() {
    let mut seq = plain(&PAIR, &[]);
    seq.set(9, 1).unwrap();
    seq.delete(9);
    assert_eq!(seq.length(), 10);
    assert_eq!(seq.marks().len(), 0);
    assert_plain_consistent(&seq);
}

#[test]
fn delete_of_absent_mark_is_a_no_op() {
    let mut seq = plain(&PAIR, &[(1, 5)]);
    assert_eq!(seq.delete(0), None);
    assert_eq!(seq.to_vec(), vec![2, 5]);
}

#[test]
fn six_iteration_reference() {
    let seq = plain(&PAIR, &[(3, 5), (4, 3), (8, 8), (9, 7), (10, 10)]);
    assert_eq!(seq.to_vec(), vec![2, 4, 2, 5, 3, 4, 2, 4, 8, 7, 10, 4]);
    assert!(seq.is_marked(2, 0));
    assert!(!seq.is_marked(0, 1));
    assert_eq!(seq.value_at(4, 1), Ok(&7));
    assert_plain_consistent(&seq);
}

#[test]
fn out_of_range_is_distinct_from_unmarked() {
    let seq = plain(&PAIR, &[(3, 9)]);
    // Unmarked but in range: base value.
    assert_eq!(seq.get(2), Ok(&2));
    // Past the end: an error, not a base value.
    assert_eq!(
        seq.get(4),
        Err(OverlayError::IndexOutOfRange {
            index: 4,
            length: 4
        })
    );
    assert!(seq.value_at(2, 0).is_err());
}

#[test]
fn marks_at_the_top_of_usize_are_refused() {
    for base in [&PAIR[..1], &PAIR[..]] {
        let mut seq = plain(base, &[(3, 9)]);
        let err = seq.set(usize::MAX, 1).unwrap_err();
        assert_eq!(
            err,
            OverlayError::CapacityExceeded {
                index: usize::MAX,
                pattern_len: base.len()
            }
        );
        assert_eq!(seq.length(), 4);
        assert_eq!(
            seq.get(usize::MAX),
            Err(OverlayError::IndexOutOfRange {
                index: usize::MAX,
                length: 4
            })
        );
        assert!(!seq.is_marked(usize::MAX, 0));
        assert!(matches!(
            seq.value_at(usize::MAX, 0),
            Err(OverlayError::IndexOutOfRange { .. })
        ));
        assert_plain_consistent(&seq);
    }
}

#[test]
fn empty_base_is_fatal() {
    let err = VirtualSequence::<i32>::new(Vec::new(), vec![(0, 1)]).unwrap_err();
    assert_eq!(err, OverlayError::InvalidPattern);
}

#[test]
fn non_numeric_elements_work() {
    let mut seq = VirtualSequence::unmarked(vec!["a".to_string(), "b".to_string()]).unwrap();
    seq.set(2, "z".to_string()).unwrap();
    let joined: String = seq.iter().map(String::as_str).collect();
    assert_eq!(joined, "abzb");
}
