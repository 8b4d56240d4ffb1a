use super::List;
use crate::error::ListError;
use proptest::collection::vec;
use proptest::num::usize::ANY;
use proptest::prelude::*;
use std::ops::Range;

fn trace_init() -> tracing::dispatcher::DefaultGuard {
    use tracing_subscriber::prelude::*;
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_timer(())
        .set_default()
}

/// Asserts that `list` holds exactly the elements of `reference`, and that its
/// ring is well formed.
#[track_caller]
fn assert_matches(list: &List<i32>, reference: &[i32]) {
    list.assert_valid();
    assert_eq!(list.count(), reference.len());
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), reference);
    assert_eq!(list.front().ok(), reference.first());
    assert_eq!(list.back().ok(), reference.last());
    assert_eq!(list.is_empty(), reference.is_empty());
}

#[test]
fn const_new() {
    const _: List<i32> = List::new();
}

#[test]
fn split_and_splice_with_trace() {
    let _trace = trace_init();

    let mut list = List::from_iter(0..8);
    let mut middle = list.split_off(2..5).unwrap();
    assert_matches(&middle, &[2, 3, 4]);
    assert_matches(&list, &[0, 1, 5, 6, 7]);

    list.splice_after(2, &mut middle).unwrap();
    assert!(middle.is_empty());
    assert_matches(&list, &[0, 1, 2, 3, 4, 5, 6, 7]);

    list.sort_by(|a, b| b.cmp(a));
    list.reverse();
    assert_matches(&list, &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn clone_from_reuses_nodes() {
    let source = List::from([1, 2, 3]);

    let mut longer = List::from_iter(10..15);
    longer.clone_from(&source);
    assert_matches(&longer, &[1, 2, 3]);

    let mut shorter = List::from([9]);
    shorter.clone_from(&source);
    assert_matches(&shorter, &[1, 2, 3]);

    let mut empty = List::new();
    empty.clone_from(&source);
    assert_matches(&empty, &[1, 2, 3]);

    let mut cleared = List::from([4, 5]);
    cleared.clone_from(&List::new());
    assert_matches(&cleared, &[]);
}

#[test]
fn index_errors() {
    let mut list = List::from([1, 2]);
    assert_eq!(
        list.insert_after(3, 0),
        Err(ListError::OutOfBounds { index: 3, count: 2 })
    );
    assert_eq!(
        list.splice_after(3, &mut List::from([0])),
        Err(ListError::OutOfBounds { index: 3, count: 2 })
    );
    assert_eq!(
        list.erase_range(1..3),
        Err(ListError::OutOfBounds { index: 3, count: 2 })
    );
    assert!(list.cursor_mut(3).is_err());
    assert_matches(&list, &[1, 2]);
}

#[test]
fn hash_and_order() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let a = List::from([1, 2, 3]);
    let b: List<_> = vec![1, 2, 3].into_iter().collect();
    assert_eq!(hash_of(&a), hash_of(&b));
    assert!(a < List::from([1, 2, 4]));
    assert!(a > List::from([1, 2]));
    assert_eq!(format!("{:?}", a), "[1, 2, 3]");
}

#[derive(Debug)]
enum Op {
    PushFront,
    PushBack,
    PopFront,
    InsertAfter(usize),
    EraseAfter(usize),
    RemoveCurrent(usize),
    Remove(usize),
    SplitAndSplice(usize, usize),
    Reverse,
    Sort,
    SpliceThenEdit(usize, usize),
    SplitThenEdit(usize, usize),
}

/// The default range for proptest's vec strategy is 0..100.
const FUZZ_RANGE: Range<usize> = 0..100;

proptest::proptest! {
    #[test]
    fn fuzz_linked_list(ops in vec(ANY, FUZZ_RANGE)) {
        let ops = ops
            .iter()
            .map(|i| match i % 12 {
                0 => Op::PushFront,
                1 => Op::PushBack,
                2 => Op::PopFront,
                3 => Op::InsertAfter(i / 10),
                4 => Op::EraseAfter(i / 10),
                5 => Op::RemoveCurrent(i / 10),
                6 => Op::Remove(i / 10),
                7 => Op::SplitAndSplice(i / 10, i / 1000),
                8 => Op::Reverse,
                9 => Op::Sort,
                10 => Op::SpliceThenEdit(i / 12, i / 1200),
                11 => Op::SplitThenEdit(i / 12, i / 1200),
                _ => unreachable!(),
            })
            .collect::<Vec<_>>();

        let _trace = trace_init();
        let _span = tracing::info_span!("fuzz").entered();
        tracing::info!(?ops);
        run_fuzz(ops);
    }

    #[test]
    fn sort_matches_vec(values in vec(any::<i32>(), FUZZ_RANGE)) {
        let mut list = List::from_iter(values.iter().copied());
        let mut values = values;
        list.sort();
        values.sort();
        assert_matches(&list, &values);
    }

    #[test]
    fn sort_is_stable(values in vec((0..4_u8, any::<u16>()), FUZZ_RANGE)) {
        let mut list = List::from_iter(values.iter().copied());
        list.sort_by_key(|x| x.0);
        list.assert_valid();

        let mut expected = values;
        expected.sort_by_key(|x| x.0);
        prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn reverse_is_an_involution(values in vec(any::<i32>(), FUZZ_RANGE)) {
        let mut list = List::from_iter(values.iter().copied());
        list.reverse();
        let reversed: Vec<_> = values.iter().rev().copied().collect();
        assert_matches(&list, &reversed);
        list.reverse();
        assert_matches(&list, &values);
    }

    #[test]
    fn split_then_splice_round_trips(
        values in vec(any::<i32>(), FUZZ_RANGE),
        a in ANY,
        b in ANY,
    ) {
        let len = values.len();
        let start = a % (len + 1);
        let end = start + b % (len - start + 1);

        let mut list = List::from_iter(values.iter().copied());
        let mut split = list.split_off(start..end).unwrap();
        assert_matches(&split, &values[start..end]);
        prop_assert_eq!(list.count() + split.count(), len);

        list.splice_after(start, &mut split).unwrap();
        assert!(split.is_empty());
        assert_matches(&list, &values);
    }
}

fn run_fuzz(ops: Vec<Op>) {
    let mut list = List::new();
    let mut reference: Vec<i32> = Vec::new();

    for (i, op) in ops.iter().enumerate() {
        let _span = tracing::info_span!("op", ?i, ?op).entered();
        tracing::info!(?op);
        // Small values, so that removing by value hits duplicates.
        let value = (i % 7) as i32;
        match op {
            Op::PushFront => {
                reference.insert(0, value);
                list.push_front(value);
            }
            Op::PushBack => {
                reference.push(value);
                list.push_back(value);
            }
            Op::PopFront => {
                if reference.is_empty() {
                    assert_eq!(list.pop_front(), Err(ListError::EmptyAccess));
                    tracing::debug!("skipping pop; list is empty");
                    continue;
                }
                assert_eq!(list.pop_front(), Ok(reference.remove(0)));
            }
            Op::InsertAfter(n) => {
                let at = n % (reference.len() + 1);
                reference.insert(at, value);
                list.insert_after(at, value).unwrap();
            }
            Op::EraseAfter(n) => {
                if reference.is_empty() {
                    tracing::debug!("skipping erase; list is empty");
                    continue;
                }
                let at = n % reference.len();
                let expect = (at + 1 < reference.len()).then(|| reference.remove(at + 1));
                let mut cursor = list.cursor_mut(at).unwrap();
                assert_eq!(cursor.erase_after(), expect);
                assert_eq!(cursor.current(), reference.get(at));
            }
            Op::RemoveCurrent(n) => {
                if reference.is_empty() {
                    tracing::debug!("skipping remove; list is empty");
                    continue;
                }
                let at = n % reference.len();
                let expect = reference.remove(at);
                let mut cursor = list.cursor_mut(at).unwrap();
                assert_eq!(cursor.remove_current(), Some(expect));
                assert_eq!(cursor.current(), reference.get(at));
            }
            Op::Remove(n) => {
                let target = (n % 7) as i32;
                let before = reference.len();
                reference.retain(|x| *x != target);
                assert_eq!(list.remove(&target), before - reference.len());
            }
            Op::SplitAndSplice(a, b) => {
                let len = reference.len();
                let start = a % (len + 1);
                let end = start + b % (len - start + 1);
                let mut split = list.split_off(start..end).unwrap();
                assert_matches(&split, &reference[start..end]);
                list.splice_after(start, &mut split).unwrap();
                assert!(split.is_empty());
            }
            Op::Reverse => {
                reference.reverse();
                list.reverse();
            }
            Op::Sort => {
                reference.sort();
                list.sort();
            }
            Op::SpliceThenEdit(n, edit) => {
                if reference.is_empty() {
                    tracing::debug!("skipping splice; list is empty");
                    continue;
                }
                let at = n % reference.len();
                let mut cursor = list.cursor_mut(at).unwrap();
                cursor.splice_after(&mut List::from([value, value + 1]));
                reference.insert(at + 1, value + 1);
                reference.insert(at + 1, value);
                match edit % 3 {
                    0 => {
                        assert_eq!(cursor.remove_current(), Some(reference.remove(at)));
                        assert_eq!(cursor.current(), reference.get(at));
                    }
                    1 => {
                        cursor.insert_before(-value);
                        reference.insert(at, -value);
                        assert_eq!(cursor.current(), reference.get(at + 1));
                    }
                    _ => {
                        assert_eq!(cursor.erase_after(), Some(reference.remove(at + 1)));
                        assert_eq!(cursor.current(), reference.get(at));
                    }
                }
            }
            Op::SplitThenEdit(a, b) => {
                let len = reference.len();
                let start = a % (len + 1);
                let end = start + b % (len - start + 1);
                let mut cursor = list.cursor_mut(start).unwrap();
                cursor.set_mark();
                cursor.seek_forward(end - start).unwrap();
                let split = cursor.split_from_mark();
                assert_matches(&split, &reference[start..end]);
                reference.drain(start..end);

                cursor.insert_before(value);
                reference.insert(start, value);
                let expect = (start + 1 < reference.len()).then(|| reference.remove(start + 1));
                assert_eq!(cursor.remove_current(), expect);
                assert_eq!(cursor.current(), reference.get(start + 1));
            }
        }
        assert_matches(&list, &reference);
    }
}
