//! Property-based tests for the linked deque using proptest
//!
//! Random operation sequences run against both the deque and a `VecDeque`
//! model; after every step the two must agree and the deque's links must be
//! consistent.

use super::*;
use crate::Error;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Put(End, u16),
    Get(End),
    Ith(End, usize),
    Remove(End, u16),
}

fn end() -> impl Strategy<Value = End> {
    prop_oneof![Just(End::Head), Just(End::Tail)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (end(), 0u16..32).prop_map(|(e, v)| Op::Put(e, v)),
        2 => end().prop_map(Op::Get),
        2 => (end(), 0usize..24).prop_map(|(e, i)| Op::Ith(e, i)),
        2 => (end(), 0u16..32).prop_map(|(e, v)| Op::Remove(e, v)),
    ]
}

fn model_put(model: &mut VecDeque<u16>, end: End, value: u16) {
    match end {
        End::Head => model.push_front(value),
        End::Tail => model.push_back(value),
    }
}

fn model_get(model: &mut VecDeque<u16>, end: End) -> Option<u16> {
    match end {
        End::Head => model.pop_front(),
        End::Tail => model.pop_back(),
    }
}

fn model_ith(model: &VecDeque<u16>, end: End, index: usize) -> Option<u16> {
    match end {
        End::Head => model.get(index).copied(),
        End::Tail => model.iter().rev().nth(index).copied(),
    }
}

fn model_remove(model: &mut VecDeque<u16>, end: End, value: u16) -> Option<u16> {
    let position = match end {
        End::Head => model.iter().position(|v| *v == value),
        End::Tail => model.iter().rposition(|v| *v == value),
    }?;
    model.remove(position)
}

proptest! {
    #[test]
    fn test_matches_vecdeque_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut deque = Deque::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Put(end, value) => {
                    deque.put(end, value);
                    model_put(&mut model, end, value);
                }
                Op::Get(end) => {
                    let expected = model_get(&mut model, end).ok_or(Error::Empty);
                    prop_assert_eq!(deque.get(end), expected);
                }
                Op::Ith(end, index) => {
                    let expected = model_ith(&model, end, index);
                    match expected {
                        Some(value) => prop_assert_eq!(deque.ith(end, index), Ok(&value)),
                        None => prop_assert_eq!(
                            deque.ith(end, index),
                            Err(Error::IndexOutOfRange { index, len: model.len() })
                        ),
                    }
                }
                Op::Remove(end, value) => {
                    let expected = model_remove(&mut model, end, value);
                    prop_assert_eq!(deque.remove_by_value(end, &value), expected);
                }
            }

            deque.assert_invariants();
            prop_assert_eq!(deque.len(), model.len());
            prop_assert!(deque.iter().eq(model.iter()));
        }
    }

    #[test]
    fn test_len_is_puts_minus_gets(
        puts in prop::collection::vec((end(), any::<u16>()), 0..100),
        gets in prop::collection::vec(end(), 0..100),
    ) {
        let mut deque = Deque::new();
        for (end, value) in &puts {
            deque.put(*end, *value);
        }

        let k = gets.len().min(puts.len());
        for end in gets.iter().take(k) {
            prop_assert!(deque.get(*end).is_ok());
        }
        prop_assert_eq!(deque.len(), puts.len() - k);
    }

    #[test]
    fn test_removal_preserves_relative_order(
        values in prop::collection::vec(any::<u16>(), 1..50),
        pick in any::<prop::sample::Index>(),
        end in end(),
    ) {
        let handles: Vec<std::sync::Arc<u16>> =
            values.iter().map(|v| std::sync::Arc::new(*v)).collect();
        let mut deque: Deque<_> = handles.iter().cloned().collect();
        let position = pick.index(handles.len());

        let removed = deque.remove_by_value(end, &handles[position]);
        prop_assert!(removed.is_some());
        deque.assert_invariants();

        let mut expected = values.clone();
        expected.remove(position);
        let remaining: Vec<u16> = deque.iter().map(|v| **v).collect();
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn test_render_matches_join(words in prop::collection::vec("[a-z]{1,6}", 0..20)) {
        let deque: Deque<String> = words.iter().cloned().collect();
        prop_assert_eq!(deque.render(), words.join(" "));
    }
}
