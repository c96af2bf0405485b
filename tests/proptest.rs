use cyclic_queue::{merge, Queue};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Short values over a small alphabet, so that duplicates and ties are common.
fn values() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(b'a'..=b'd', 0..3), 0..48)
}

fn queue_of(values: &[Vec<u8>]) -> Queue {
    Queue::try_from_iter(values).unwrap()
}

proptest! {
    #[test]
    fn random_insert_and_remove(
        actions in proptest::collection::vec(any::<u8>(), 0..128)
    ) {
        let mut queue = Queue::new().unwrap();
        let mut model = std::collections::VecDeque::new();

        for a in actions {
            let value = [a];
            match a & 0x03 {
                0x00 => {
                    queue.insert_head(value).unwrap();
                    model.push_front(value.to_vec());
                },
                0x01 => {
                    queue.insert_tail(value).unwrap();
                    model.push_back(value.to_vec());
                },
                0x02 => {
                    let removed = queue.remove_head(None).map(|e| e.into_value());
                    prop_assert_eq!(removed, model.pop_front());
                },
                0x03 => {
                    let removed = queue.remove_tail(None).map(|e| e.into_value());
                    prop_assert_eq!(removed, model.pop_back());
                },
                _ => unreachable!(),
            }
            prop_assert_eq!(queue.size(), model.len());
        }
        prop_assert_eq!(queue.to_vec(), Vec::from(model));
    }
}

proptest! {
    #[test]
    fn reverse_twice_is_identity(input in values()) {
        let mut queue = queue_of(&input);
        queue.reverse();
        let mirrored: Vec<_> = input.iter().rev().cloned().collect();
        prop_assert_eq!(queue.to_vec(), mirrored);
        queue.reverse();
        prop_assert_eq!(queue.to_vec(), input);
    }

    #[test]
    fn reverse_k_blocks(input in values(), k in -2_isize..12) {
        let mut queue = queue_of(&input);
        queue.reverse_k(k);

        let mut expected = input.clone();
        if k > 1 {
            let k = k as usize;
            let full = expected.len() / k * k;
            expected[..full].chunks_mut(k).for_each(<[Vec<u8>]>::reverse);
        }
        prop_assert_eq!(queue.to_vec(), expected);
    }

    #[test]
    fn swap_pairs(input in values()) {
        let mut queue = queue_of(&input);
        queue.swap();

        let mut expected = input.clone();
        expected.chunks_exact_mut(2).for_each(|pair| pair.swap(0, 1));
        prop_assert_eq!(queue.to_vec(), expected);
    }

    #[test]
    fn delete_mid_removes_upper_middle(input in values()) {
        let mut queue = queue_of(&input);
        let deleted = queue.delete_mid();

        let mut expected = input.clone();
        if !expected.is_empty() {
            expected.remove(expected.len() / 2);
        }
        prop_assert_eq!(deleted, !input.is_empty());
        prop_assert_eq!(queue.to_vec(), expected);
    }
}

proptest! {
    #[test]
    fn sort_matches_stable_sort(input in values(), descending in any::<bool>()) {
        let mut queue = queue_of(&input);
        queue.sort(descending);

        let mut expected = input.clone();
        if descending {
            expected.sort_by(|a, b| b.cmp(a));
        } else {
            expected.sort();
        }
        prop_assert_eq!(queue.to_vec(), expected);
    }

    #[test]
    fn sort_is_stable(input in values()) {
        let mut queue = queue_of(&input);
        let before: Vec<*const u8> = queue.iter().map(<[u8]>::as_ptr).collect();
        queue.sort(false);
        let after: Vec<*const u8> = queue.iter().map(<[u8]>::as_ptr).collect();

        // `sort_by_key` on a slice is stable, so it gives the expected order
        // of the input positions.
        let mut order: Vec<usize> = (0..input.len()).collect();
        order.sort_by_key(|&i| &input[i]);
        // Empty payloads own no allocation and cannot be told apart.
        for (&got, &i) in after.iter().zip(&order) {
            if !input[i].is_empty() {
                prop_assert_eq!(got, before[i]);
            }
        }
    }

    #[test]
    fn delete_dup_keeps_unique_values(input in values()) {
        let mut queue = queue_of(&input);
        let deleted = queue.delete_dup();
        prop_assert_eq!(deleted, input.len() >= 2);

        let mut expected: Vec<Vec<u8>> = input
            .iter()
            .filter(|v| input.iter().filter(|w| w == v).count() == 1)
            .cloned()
            .collect();
        if input.len() >= 2 {
            expected.sort();
            prop_assert_eq!(queue.to_vec(), expected);
        } else {
            prop_assert_eq!(queue.to_vec(), input);
        }
    }

    #[test]
    fn filter_keeps_running_extremes(input in values(), descending in any::<bool>()) {
        let mut queue = queue_of(&input);
        let size = if descending {
            queue.filter_descend()
        } else {
            queue.filter_ascend()
        };

        let expected: Vec<Vec<u8>> = input
            .iter()
            .enumerate()
            .filter(|&(i, v)| {
                input[i + 1..]
                    .iter()
                    .all(|w| if descending { w <= v } else { w >= v })
            })
            .map(|(_, v)| v.clone())
            .collect();
        prop_assert_eq!(size, expected.len());
        prop_assert_eq!(queue.size(), size);
        prop_assert_eq!(queue.to_vec(), expected);
    }
}

proptest! {
    #[test]
    fn merge_sorted_queues(
        seed in any::<u64>(),
        input in values(),
        k in 1_usize..6,
        descending in any::<bool>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut shuffled = input.clone();
        shuffled.shuffle(&mut rng);

        let mut parts = vec![Vec::new(); k];
        for (i, v) in shuffled.into_iter().enumerate() {
            parts[i % k].push(v);
        }
        let mut queues: Vec<Queue> = parts
            .iter_mut()
            .map(|part| {
                part.sort();
                if descending {
                    part.reverse();
                }
                queue_of(part)
            })
            .collect();

        let (merged, size) = merge(&mut queues, descending).unwrap();

        let mut expected = input.clone();
        expected.sort();
        if descending {
            expected.reverse();
        }
        prop_assert_eq!(size, input.len());
        prop_assert_eq!(merged.to_vec(), expected);
        prop_assert!(queues.iter().all(Queue::is_empty));
    }
}
