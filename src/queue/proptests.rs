//! Property-based tests for the bounded queue using proptest

use super::*;
use crate::deque::End;
use crate::Error;
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
enum Op {
    Put(End, u32),
    Get(End),
    Ith(End, usize),
    Remove(End, u32),
}

fn end() -> impl Strategy<Value = End> {
    prop_oneof![Just(End::Head), Just(End::Tail)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (end(), 0u32..16).prop_map(|(e, v)| Op::Put(e, v)),
        end().prop_map(Op::Get),
        (end(), 0usize..8).prop_map(|(e, i)| Op::Ith(e, i)),
        (end(), 0u32..16).prop_map(|(e, v)| Op::Remove(e, v)),
    ]
}

/// Property: single-threaded use matches a `VecDeque` model and never exceeds
/// capacity.
///
/// Operations that would block are skipped, so the test never parks.
#[cfg(test)]
mod sequential_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_matches_model_without_blocking(
            capacity in 1usize..8,
            ops in prop::collection::vec(op(), 0..150)
        ) {
            let queue = BoundedQueue::new(capacity);
            let mut model: VecDeque<u32> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Put(end, value) => {
                        if model.len() == capacity {
                            prop_assert!(queue.is_full());
                            continue;
                        }
                        queue.put(end, value);
                        match end {
                            End::Head => model.push_front(value),
                            End::Tail => model.push_back(value),
                        }
                    }
                    Op::Get(end) => {
                        let expected = match end {
                            End::Head => model.pop_front(),
                            End::Tail => model.pop_back(),
                        };
                        if let Some(expected) = expected {
                            prop_assert_eq!(queue.get(end), expected);
                        }
                    }
                    Op::Ith(end, index) => {
                        if index >= capacity {
                            prop_assert_eq!(
                                queue.ith(end, index),
                                Err(Error::IndexBeyondCapacity { index, capacity })
                            );
                        } else if index < model.len() {
                            let expected = match end {
                                End::Head => model[index],
                                End::Tail => model[model.len() - 1 - index],
                            };
                            prop_assert_eq!(queue.ith(end, index), Ok(expected));
                        }
                    }
                    Op::Remove(end, value) => {
                        if model.is_empty() {
                            continue;
                        }
                        let position = match end {
                            End::Head => model.iter().position(|v| *v == value),
                            End::Tail => model.iter().rposition(|v| *v == value),
                        };
                        let expected = position.and_then(|p| model.remove(p));
                        prop_assert_eq!(queue.remove_by_value(end, &value), expected);
                    }
                }

                prop_assert!(queue.len() <= capacity);
                prop_assert_eq!(queue.len(), model.len());
            }

            let mut drained = Vec::new();
            queue.destroy(Some(|v| drained.push(v)));
            prop_assert_eq!(drained, model.into_iter().collect::<Vec<_>>());
        }
    }
}

/// Property: concurrent producers and consumers deliver every value exactly
/// once, whatever the capacity and ends.
#[cfg(test)]
mod concurrent_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_concurrent_exactly_once_delivery(
            num_threads in 1usize..6,
            operations_per_thread in 1usize..60,
            capacity in 0usize..8,
            producer_end in end(),
            consumer_end in end(),
        ) {
            let queue = Arc::new(BoundedQueue::new(capacity));
            let mut producers = vec![];
            let mut consumers = vec![];

            for thread_id in 0..num_threads {
                let queue = Arc::clone(&queue);
                producers.push(thread::spawn(move || {
                    for i in 0..operations_per_thread {
                        queue.put(producer_end, thread_id * operations_per_thread + i);
                    }
                }));
            }

            for _ in 0..num_threads {
                let queue = Arc::clone(&queue);
                consumers.push(thread::spawn(move || {
                    let mut received = Vec::with_capacity(operations_per_thread);
                    for _ in 0..operations_per_thread {
                        let value = queue.get(consumer_end);
                        received.push(value);
                    }
                    received
                }));
            }

            for producer in producers {
                producer.join().unwrap();
            }
            let mut all_received = Vec::new();
            for consumer in consumers {
                all_received.extend(consumer.join().unwrap());
            }

            let expected_total = num_threads * operations_per_thread;
            prop_assert_eq!(all_received.len(), expected_total);

            let unique: HashSet<usize> = all_received.iter().copied().collect();
            prop_assert_eq!(unique.len(), expected_total);
            prop_assert!(all_received.iter().all(|v| *v < expected_total));
            prop_assert!(queue.is_empty());
        }
    }
}
