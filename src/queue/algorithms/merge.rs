use crate::error::QueueError;
use crate::queue::link::{self, Link};
use crate::queue::Queue;
use crate::Element;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Merge several queues, each sorted in the same direction, into a new
/// sorted queue. Every input is left empty.
///
/// Returns the merged queue and its size.
///
/// # Errors
///
/// [`QueueError::OutOfMemory`] if the ghost node of the new queue cannot be
/// allocated. The inputs are untouched in that case.
///
/// # Complexity
///
/// This operation should compute in *O*(*n* * log(*k*)) time for *n*
/// elements in *k* queues.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge, Queue};
///
/// let mut queues = vec![
///     Queue::try_from_iter(["a", "c"])?,
///     Queue::try_from_iter(["b", "d"])?,
/// ];
/// let (merged, size) = merge(&mut queues, false)?;
/// assert_eq!(size, 4);
/// assert_eq!(merged, Queue::try_from_iter(["a", "b", "c", "d"])?);
/// assert!(queues.iter().all(Queue::is_empty));
/// # Ok::<(), cyclic_queue::QueueError>(())
/// ```
pub fn merge(queues: &mut [Queue], descending: bool) -> Result<(Queue, usize), QueueError> {
    let mut merged = Queue::new()?;
    let sources: Vec<_> = queues.iter().map(Queue::ghost_node).collect();
    // SAFETY: every source is the ghost node of a distinct queue borrowed
    // mutably here, and `merged` is a fresh queue.
    let size = unsafe { merge_rings(&mut merged, &sources, descending) };
    Ok((merged, size))
}

impl Queue {
    /// Merge `others`, each sorted in the same direction as this queue, into
    /// this queue, and return the resulting size. Every queue of `others` is
    /// left empty.
    ///
    /// The current elements of this queue take part as the first input, so
    /// they come first among equal values.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_iter(["d", "b"])?;
    /// let mut others = [Queue::try_from_iter(["e", "c", "a"])?];
    /// assert_eq!(queue.merge_into(&mut others, true), 5);
    /// assert_eq!(queue, Queue::try_from_iter(["e", "d", "c", "b", "a"])?);
    /// assert!(others[0].is_empty());
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn merge_into(&mut self, others: &mut [Queue], descending: bool) -> usize {
        let mut own_ghost = Link::dangling();
        let own = NonNull::from(&mut own_ghost);
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(own);
        sources.extend(others.iter().map(Queue::ghost_node));
        // SAFETY: `own` is initialized before use and takes every node of
        // this queue; the other sources are ghost nodes of distinct queues.
        unsafe {
            link::init(own);
            link::splice_tail(self.ghost_node(), own);
            merge_rings(self, &sources, descending)
        }
    }
}

/// The order in which fronts leave the frontier, fixed for a whole merge.
trait Direction {
    /// `Greater` if `a` must be merged before `b`.
    fn order(a: &[u8], b: &[u8]) -> Ordering;
}

enum Ascending {}

enum Descending {}

impl Direction for Ascending {
    #[inline]
    fn order(a: &[u8], b: &[u8]) -> Ordering {
        b.cmp(a)
    }
}

impl Direction for Descending {
    #[inline]
    fn order(a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }
}

/// The front element of an input, detached and waiting in the frontier.
struct Front<D> {
    element: Element,
    source: usize,
    _direction: PhantomData<D>,
}

impl<D> Front<D> {
    fn new(element: Element, source: usize) -> Self {
        let _direction = PhantomData;
        Self {
            element,
            source,
            _direction,
        }
    }
}

/// `BinaryHeap` is a max-heap: the greatest `Front` is the next one to be
/// merged, with lower source indices winning ties.
impl<D: Direction> Ord for Front<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        D::order(self.element.value(), other.element.value())
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl<D: Direction> PartialOrd for Front<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Direction> PartialEq for Front<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D: Direction> Eq for Front<D> {}

/// Detach the front node of `ghost`, if any.
unsafe fn pop_front(ghost: NonNull<Link>) -> Option<Element> {
    let front = link::next(ghost);
    if front == ghost {
        return None;
    }
    link::unlink(front);
    Some(Element::from_link(front))
}

/// Merge the sorted rings anchored at `sources` onto the tail of `dest`, and
/// return the size of `dest`.
///
/// It is unsafe because every source must anchor a ring of element nodes,
/// distinct from each other and from `dest`.
unsafe fn merge_rings(dest: &mut Queue, sources: &[NonNull<Link>], descending: bool) -> usize {
    if descending {
        merge_rings_in::<Descending>(dest, sources)
    } else {
        merge_rings_in::<Ascending>(dest, sources)
    }
}

unsafe fn merge_rings_in<D: Direction>(dest: &mut Queue, sources: &[NonNull<Link>]) -> usize {
    let mut frontier = BinaryHeap::with_capacity(sources.len());
    for (source, &ghost) in sources.iter().enumerate() {
        if let Some(element) = pop_front(ghost) {
            frontier.push(Front::<D>::new(element, source));
        }
    }
    while let Some(Front { element, source, .. }) = frontier.pop() {
        dest.attach_after(dest.back_node(), element);
        if let Some(element) = pop_front(sources[source]) {
            frontier.push(Front::new(element, source));
        }
    }
    dest.check_ring();
    dest.size()
}
