use crate::queue::element::value_of;
use crate::queue::link::{self, Link};
use crate::queue::Queue;
use std::convert::TryFrom;
use std::ptr::NonNull;

/// Find the middle node of the non-empty ring anchored at `ghost` with a
/// slow/fast walk. For an even length, it is the second of the two central
/// nodes.
unsafe fn upper_mid(ghost: NonNull<Link>) -> NonNull<Link> {
    let (mut slow, mut fast) = (link::next(ghost), link::next(ghost));
    while fast != ghost && link::next(fast) != ghost {
        slow = link::next(slow);
        fast = link::next(link::next(fast));
    }
    slow
}

impl Queue {
    /// Delete the middle element, or return `false` if the queue is empty.
    ///
    /// For an odd length, it is the exact middle; for an even length, it is
    /// the second of the two central elements.
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
    /// let mut queue = Queue::try_from_iter(["a", "b", "c"])?;
    /// assert!(queue.delete_mid());
    /// assert_eq!(queue, Queue::try_from_iter(["a", "c"])?);
    ///
    /// assert!(queue.delete_mid());
    /// assert_eq!(queue, Queue::try_from_iter(["a"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        // SAFETY: the ring is not empty, so the middle is a node of it.
        unsafe {
            let mid = upper_mid(self.ghost_node());
            drop(self.detach_node(mid));
        }
        self.check_ring();
        true
    }

    /// Sort the queue ascending, then delete every element whose value occurs
    /// more than once. All copies are deleted, not just the extras.
    ///
    /// Returns `false` without touching the queue if it holds fewer than two
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["b", "a", "c", "a"])?;
    /// assert!(queue.delete_dup());
    /// assert_eq!(queue, Queue::try_from_iter(["b", "c"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn delete_dup(&mut self) -> bool {
        let ghost = self.ghost_node();
        // SAFETY: the ghost node anchors the ring of this queue.
        if self.is_empty() || unsafe { link::is_singular(ghost) } {
            return false;
        }
        self.sort(false);

        let mut node = self.front_node();
        while node != ghost {
            // SAFETY: `node` and every node after it up to the ghost are live
            // nodes of this queue; each detached node is skipped before use.
            unsafe {
                let mut duplicated = false;
                let mut other = link::next(node);
                while other != ghost && value_of(other) == value_of(node) {
                    let following = link::next(other);
                    drop(self.detach_node(other));
                    other = following;
                    duplicated = true;
                }
                if duplicated {
                    drop(self.detach_node(node));
                }
                node = other;
            }
        }
        self.check_ring();
        true
    }

    /// Swap every two adjacent elements. A trailing unpaired element stays in
    /// place.
    ///
    /// Elements are relinked, never copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["1", "2", "3", "4", "5"])?;
    /// queue.swap();
    /// assert_eq!(queue, Queue::try_from_iter(["2", "1", "4", "3", "5"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn swap(&mut self) {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        // SAFETY: `node` is either the ghost or a live node of this queue.
        unsafe {
            while node != ghost && link::next(node) != ghost {
                let following = link::next(link::next(node));
                link::move_before(node, following);
                node = following;
            }
        }
        self.check_ring();
    }

    /// Reverse the order of the elements in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["a", "b", "c"])?;
    /// queue.reverse();
    /// assert_eq!(queue, Queue::try_from_iter(["c", "b", "a"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        if self.is_empty() {
            return;
        }
        // SAFETY: the ring is not empty, and every node moved is a node of it.
        unsafe { reverse_block(ghost, ghost, usize::MAX) };
        self.check_ring();
    }

    /// Reverse the elements `k` at a time.
    ///
    /// Every complete block of `k` consecutive elements is reversed; a
    /// trailing block of fewer than `k` elements keeps its order. `k <= 1`
    /// and `k` greater than the size are no-ops.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["1", "2", "3", "4", "5"])?;
    /// queue.reverse_k(2);
    /// assert_eq!(queue, Queue::try_from_iter(["2", "1", "4", "3", "5"])?);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn reverse_k(&mut self, k: isize) {
        let k = match usize::try_from(k) {
            Ok(k) if k > 1 => k,
            _ => return,
        };
        let ghost = self.ghost_node();
        let mut anchor = ghost;
        // SAFETY: `anchor` is the ghost or a live node of this queue, and a
        // block is only reversed after `k` nodes are found behind it.
        unsafe {
            while has_nodes(anchor, ghost, k) {
                anchor = reverse_block(ghost, anchor, k);
            }
        }
        self.check_ring();
    }
}

/// Returns `true` if at least `k` nodes follow `anchor` before the ghost.
unsafe fn has_nodes(anchor: NonNull<Link>, ghost: NonNull<Link>, k: usize) -> bool {
    let mut node = anchor;
    for _ in 0..k {
        node = link::next(node);
        if node == ghost {
            return false;
        }
    }
    true
}

/// Reverse up to `k` nodes following `anchor`, stopping at the ghost node.
/// Returns the last node of the reversed block, the anchor of the next block.
///
/// The first node of the block stays put while each node behind it is moved
/// right after `anchor`.
unsafe fn reverse_block(
    ghost: NonNull<Link>,
    anchor: NonNull<Link>,
    k: usize,
) -> NonNull<Link> {
    let first = link::next(anchor);
    for _ in 1..k {
        let node = link::next(first);
        if node == ghost {
            break;
        }
        link::move_after(node, anchor);
    }
    first
}
