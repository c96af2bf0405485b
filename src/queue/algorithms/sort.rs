use crate::queue::element::value_of;
use crate::queue::link::{self, Link};
use crate::queue::Queue;
use std::ptr::NonNull;

impl Queue {
    /// Sort the queue by lexicographic byte order, ascending or descending.
    ///
    /// This sort is stable (i.e., does not reorder equal elements), and it
    /// relinks the nodes instead of moving payloads.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time. The
    /// recursion is *O*(log(*n*)) deep.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a top-down merge sort. Each level cuts the
    /// ring in two at its middle node into a ring anchored by a ghost node on
    /// the stack, so no allocation happens while sorting.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["c", "a", "b"])?;
    ///
    /// queue.sort(false);
    /// assert_eq!(queue, Queue::try_from_iter(["a", "b", "c"])?);
    ///
    /// queue.sort(true);
    /// assert_eq!(queue, Queue::try_from_iter(["c", "b", "a"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn sort(&mut self, descending: bool) {
        // SAFETY: the ghost node anchors the ring of this queue.
        unsafe { merge_sort(self.ghost_node(), descending) };
        self.check_ring();
    }
}

/// Returns `true` if the front of the right run must be taken before the
/// front of the left run. Equal values keep the left one first.
#[inline]
fn takes_right(left: &[u8], right: &[u8], descending: bool) -> bool {
    if descending {
        right > left
    } else {
        right < left
    }
}

/// Find the last node of the left half with a slow/fast walk, so that the
/// left half holds ⌈*n*/2⌉ nodes. The ring must hold at least two nodes.
unsafe fn lower_mid(ghost: NonNull<Link>) -> NonNull<Link> {
    let mut slow = link::next(ghost);
    let mut fast = link::next(slow);
    while fast != ghost && link::next(fast) != ghost {
        slow = link::next(slow);
        fast = link::next(link::next(fast));
    }
    slow
}

pub(crate) unsafe fn merge_sort(ghost: NonNull<Link>, descending: bool) {
    if link::is_empty(ghost) || link::is_singular(ghost) {
        return;
    }

    let mut left_ghost = Link::dangling();
    let left = NonNull::from(&mut left_ghost);
    link::init(left);
    link::cut(left, ghost, lower_mid(ghost));

    merge_sort(left, descending);
    merge_sort(ghost, descending);

    let mut right_ghost = Link::dangling();
    let right = NonNull::from(&mut right_ghost);
    link::init(right);
    link::splice_tail(ghost, right);

    merge_runs(ghost, left, right, descending);
}

/// Merge the sorted rings `left` and `right` onto the tail of `dest`,
/// leaving both empty.
unsafe fn merge_runs(
    dest: NonNull<Link>,
    left: NonNull<Link>,
    right: NonNull<Link>,
    descending: bool,
) {
    while !link::is_empty(left) && !link::is_empty(right) {
        let (l, r) = (link::next(left), link::next(right));
        let taken = if takes_right(value_of(l), value_of(r), descending) {
            r
        } else {
            l
        };
        link::move_before(taken, dest);
    }
    // One of them is empty, the other is already in order.
    link::splice_tail(left, dest);
    link::splice_tail(right, dest);
}

#[cfg(test)]
mod tests {
    use crate::queue::algorithms::tests::strs;
    use crate::Queue;

    #[test]
    fn sort_small() {
        let mut queue = Queue::new().unwrap();
        queue.sort(false);
        assert!(queue.is_empty());

        let mut queue = Queue::try_from_iter(["x"]).unwrap();
        queue.sort(true);
        assert_eq!(strs(&queue), vec!["x"]);

        let mut queue = Queue::try_from_iter(["b", "a"]).unwrap();
        queue.sort(false);
        assert_eq!(strs(&queue), vec!["a", "b"]);
        queue.sort(true);
        assert_eq!(strs(&queue), vec!["b", "a"]);
    }

    #[test]
    fn sort_lexicographic() {
        let input = ["banana", "apple", "", "app", "b", "apple", "Zebra", "a"];
        let mut queue = Queue::try_from_iter(input).unwrap();
        queue.sort(false);
        assert_eq!(
            strs(&queue),
            vec!["", "Zebra", "a", "app", "apple", "apple", "b", "banana"]
        );
        queue.sort(true);
        assert_eq!(
            strs(&queue),
            vec!["banana", "b", "apple", "apple", "app", "a", "Zebra", ""]
        );
    }

    #[test]
    fn sort_sorted_and_reversed() {
        let ascending: Vec<String> = (0..100).map(|i| format!("{:03}", i)).collect();
        let descending: Vec<String> = ascending.iter().rev().cloned().collect();

        let mut queue = Queue::try_from_iter(&ascending).unwrap();
        queue.sort(false);
        assert_eq!(strs(&queue), ascending);

        let mut queue = Queue::try_from_iter(&descending).unwrap();
        queue.sort(false);
        assert_eq!(strs(&queue), ascending);
        queue.sort(true);
        assert_eq!(strs(&queue), descending);
    }

    #[test]
    fn sort_is_stable() {
        // Equal payloads are told apart by the address of their payload.
        let mut queue = Queue::try_from_iter(["b", "a", "b", "a", "b"]).unwrap();
        let before: Vec<*const u8> = queue.iter().map(<[u8]>::as_ptr).collect();
        queue.sort(false);
        let after: Vec<*const u8> = queue.iter().map(<[u8]>::as_ptr).collect();
        assert_eq!(after, vec![before[1], before[3], before[0], before[2], before[4]]);

        queue.sort(true);
        let again: Vec<*const u8> = queue.iter().map(<[u8]>::as_ptr).collect();
        assert_eq!(again, vec![before[0], before[2], before[4], before[1], before[3]]);
    }
}
