use crate::queue::element::value_of;
use crate::queue::link;
use crate::queue::Queue;

impl Queue {
    /// Remove every element that has a strictly smaller element anywhere to
    /// its right, and return the resulting size.
    ///
    /// The survivors read as a non-decreasing sequence. Equal values never
    /// remove each other.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["1", "5", "2", "2", "3"])?;
    /// assert_eq!(queue.filter_ascend(), 4);
    /// assert_eq!(queue, Queue::try_from_iter(["1", "2", "2", "3"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn filter_ascend(&mut self) -> usize {
        self.filter_monotonic(false)
    }

    /// Remove every element that has a strictly greater element anywhere to
    /// its right, and return the resulting size.
    ///
    /// The survivors read as a non-increasing sequence. Equal values never
    /// remove each other.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["5", "2", "13", "3", "8"])?;
    /// assert_eq!(queue.filter_descend(), 1);
    /// assert_eq!(queue, Queue::try_from_iter(["8"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn filter_descend(&mut self) -> usize {
        self.filter_monotonic(true)
    }

    /// One left-to-right pass, equivalent to the right-to-left running
    /// extreme: it keeps exactly the elements that no later element beats.
    ///
    /// The survivors in front of the current node form a monotonic stack
    /// whose top is the node's predecessor: every top strictly beaten by the
    /// current node is popped (detached) before the current node is pushed.
    /// Each node is pushed and popped at most once.
    fn filter_monotonic(&mut self, descending: bool) -> usize {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        let mut survivors = 0;
        // SAFETY: `node` is the ghost or a live node of this queue, and every
        // popped top is a live node in front of it.
        unsafe {
            while node != ghost {
                loop {
                    let top = link::prev(node);
                    if top == ghost || !beaten(value_of(top), value_of(node), descending) {
                        break;
                    }
                    drop(self.detach_node(top));
                    survivors -= 1;
                }
                survivors += 1;
                node = link::next(node);
            }
        }
        self.check_ring();
        survivors
    }
}

/// Returns `true` if `later`, found to the right of `earlier`, removes it.
#[inline]
fn beaten(earlier: &[u8], later: &[u8], descending: bool) -> bool {
    if descending {
        later > earlier
    } else {
        later < earlier
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::algorithms::tests::strs;
    use crate::Queue;

    #[test]
    fn filter_empty_and_singleton() {
        let mut queue = Queue::new().unwrap();
        assert_eq!(queue.filter_ascend(), 0);
        assert_eq!(queue.filter_descend(), 0);

        let mut queue = Queue::try_from_iter(["k"]).unwrap();
        assert_eq!(queue.filter_ascend(), 1);
        assert_eq!(queue.filter_descend(), 1);
        assert_eq!(strs(&queue), vec!["k"]);
    }

    #[test]
    fn filter_descend_keeps_running_max() {
        let mut queue = Queue::try_from_iter(["c", "e", "b", "d", "d", "a"]).unwrap();
        assert_eq!(queue.filter_descend(), 4);
        assert_eq!(strs(&queue), vec!["e", "d", "d", "a"]);

        let mut queue = Queue::try_from_iter(["a", "a", "a"]).unwrap();
        assert_eq!(queue.filter_descend(), 3);

        let mut queue = Queue::try_from_iter(["a", "b", "c"]).unwrap();
        assert_eq!(queue.filter_descend(), 1);
        assert_eq!(strs(&queue), vec!["c"]);
    }

    #[test]
    fn filter_ascend_keeps_running_min() {
        let mut queue = Queue::try_from_iter(["c", "e", "b", "d", "d", "f"]).unwrap();
        assert_eq!(queue.filter_ascend(), 4);
        assert_eq!(strs(&queue), vec!["b", "d", "d", "f"]);

        let mut queue = Queue::try_from_iter(["c", "b", "a"]).unwrap();
        assert_eq!(queue.filter_ascend(), 1);
        assert_eq!(strs(&queue), vec!["a"]);

        let mut queue = Queue::try_from_iter(["a", "b", "b", "c"]).unwrap();
        assert_eq!(queue.filter_ascend(), 4);
    }

    #[test]
    fn filter_matches_right_to_left_scan() {
        let mut seed = 7_u32;
        let input: Vec<String> = (0..500)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                format!("{:02}", (seed >> 16) % 40)
            })
            .collect();

        for &descending in &[false, true] {
            let mut expected = Vec::new();
            let mut extreme: Option<&str> = None;
            for value in input.iter().rev() {
                let kept = match extreme {
                    None => true,
                    Some(e) if descending => value.as_str() >= e,
                    Some(e) => value.as_str() <= e,
                };
                if kept {
                    expected.push(value.as_str());
                    extreme = Some(value.as_str());
                }
            }
            expected.reverse();

            let mut queue = Queue::try_from_iter(&input).unwrap();
            let size = if descending {
                queue.filter_descend()
            } else {
                queue.filter_ascend()
            };
            assert_eq!(size, expected.len());
            assert_eq!(strs(&queue), expected);
        }
    }
}
