use std::alloc::{alloc, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::QueueError;
use crate::queue::element::Node;
use crate::queue::link::Link;
use crate::{Element, Iter};

pub mod element;
pub mod iterator;

mod algorithms;
pub(crate) mod link;

pub use algorithms::merge::merge;

/// The `Queue` is a queue of byte strings on an intrusive cyclic
/// doubly-linked list. It allows inserting and removing elements at both ends
/// in constant time, and rewrites the whole ring in place for its transforms.
///
/// The `Queue` contains nothing but a pointer `ghost` to the ghost node,
/// which carries no payload. The length is not cached: [`Queue::size`] walks
/// the ring.
///
/// # Naming Conventions
///
/// - `node`: the link of an element in the ring, never the ghost node;
/// - `front`, `back`: the first and the last node, or the ghost node if the
///   queue is empty.
pub struct Queue {
    ghost: NonNull<Link>,
    _marker: PhantomData<Box<Node>>,
}

// private methods
impl Queue {
    pub(crate) fn ghost_node(&self) -> NonNull<Link> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Link> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the queue).
        unsafe { link::next(self.ghost) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Link> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the queue).
        unsafe { link::prev(self.ghost) }
    }

    /// Detach a single node `node` from the queue, and return it as an owned
    /// element.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the queue.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Link>) -> Element {
        debug_assert_ne!(node, self.ghost, "cannot detach the ghost node");
        link::unlink(node);
        Element::from_link(node)
    }

    /// Attach `element` right after `prev`, and return its link.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the queue.
    pub(crate) unsafe fn attach_after(
        &mut self,
        prev: NonNull<Link>,
        element: Element,
    ) -> NonNull<Link> {
        let node = element.into_link();
        link::insert_after(node, prev);
        node
    }

    /// Walk the whole ring and check every link. Enabled in debug builds, or
    /// by `feature = "ring-check"` in release builds.
    #[cfg(any(debug_assertions, feature = "ring-check"))]
    pub(crate) fn check_ring(&self) {
        // SAFETY: the ghost node anchors the ring of this queue.
        unsafe { link::assert_ring(self.ghost) }
    }

    #[cfg(not(any(debug_assertions, feature = "ring-check")))]
    #[inline(always)]
    pub(crate) fn check_ring(&self) {}

    fn remove_node(&mut self, node: NonNull<Link>, buf: Option<&mut [u8]>) -> Option<Element> {
        if node == self.ghost {
            return None;
        }
        // SAFETY: `node` is a node (not the ghost) of this queue.
        let element = unsafe { self.detach_node(node) };
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        self.check_ring();
        Some(element)
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// The ghost node is allocated once; if the allocator fails,
    /// [`QueueError::OutOfMemory`] is returned.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::Queue;
    /// let queue = Queue::new()?;
    /// assert!(queue.is_empty());
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn new() -> Result<Self, QueueError> {
        let ghost = new_ghost()?;
        let _marker = PhantomData;
        Ok(Self { ghost, _marker })
    }

    /// Release every element and the ghost node.
    ///
    /// This is what dropping the queue does; it is spelled out for callers
    /// that want the release to be visible.
    #[inline]
    pub fn destroy(self) {
        drop(self)
    }

    /// Like [`Queue::destroy`], but a missing queue is a no-op.
    #[inline]
    pub fn destroy_opt(queue: Option<Self>) {
        if let Some(queue) = queue {
            queue.destroy();
        }
    }

    /// Build a queue from the values of `iter`, inserted at the tail in order.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::Queue;
    /// let queue = Queue::try_from_iter(["a", "b", "c"])?;
    /// assert_eq!(queue.to_vec(), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn try_from_iter<I>(iter: I) -> Result<Self, QueueError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut queue = Self::new()?;
        for value in iter {
            queue.insert_tail(value)?;
        }
        Ok(queue)
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements, counted by walking the ring.
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
    /// let mut queue = Queue::new()?;
    /// assert_eq!(queue.size(), 0);
    ///
    /// queue.insert_head("b")?;
    /// queue.insert_tail("c")?;
    /// assert_eq!(queue.size(), 2);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `Queue`, keeping the ghost node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.remove_head(None).is_some() {}
    }

    /// Provides the payload of the front element, or `None` if the queue is
    /// empty.
    pub fn front(&self) -> Option<&[u8]> {
        self.iter().next()
    }

    /// Provides the payload of the back element, or `None` if the queue is
    /// empty.
    pub fn back(&self) -> Option<&[u8]> {
        self.iter().next_back()
    }

    /// Copies `value` into a new element and links it at the front.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`QueueError::OutOfMemory`] if the node or the payload copy cannot be
    /// allocated. The queue is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// queue.insert_head("a")?;
    /// queue.insert_head("b")?;
    /// assert_eq!(queue.front(), Some(&b"b"[..]));
    /// assert_eq!(queue.back(), Some(&b"a"[..]));
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn insert_head<V: AsRef<[u8]>>(&mut self, value: V) -> Result<(), QueueError> {
        let element = Element::try_new(value.as_ref())?;
        // SAFETY: the ghost node belongs to the queue.
        unsafe { self.attach_after(self.ghost, element) };
        self.check_ring();
        Ok(())
    }

    /// Copies `value` into a new element and links it at the back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`QueueError::OutOfMemory`] if the node or the payload copy cannot be
    /// allocated. The queue is left unchanged.
    pub fn insert_tail<V: AsRef<[u8]>>(&mut self, value: V) -> Result<(), QueueError> {
        let element = Element::try_new(value.as_ref())?;
        // SAFETY: the back node belongs to the queue.
        unsafe { self.attach_after(self.back_node(), element) };
        self.check_ring();
        Ok(())
    }

    /// Detaches the front element and returns it, or `None` if the queue is
    /// empty.
    ///
    /// If `buf` is given, the payload is also copied into it as a
    /// NUL-terminated string, truncated to `buf.len() - 1` bytes (see
    /// [`Element::copy_to`]).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// assert!(queue.remove_head(None).is_none());
    ///
    /// queue.insert_tail("hello")?;
    /// let mut buf = [0_u8; 8];
    /// let element = queue.remove_head(Some(&mut buf)).unwrap();
    /// assert_eq!(element.value(), b"hello");
    /// assert_eq!(&buf[..6], b"hello\0");
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        self.remove_node(self.front_node(), buf)
    }

    /// Detaches the back element and returns it, or `None` if the queue is
    /// empty. `buf` is handled as in [`Queue::remove_head`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        self.remove_node(self.back_node(), buf)
    }

    /// Like [`Queue::remove_head`], but an empty queue is an error.
    pub fn try_remove_head(&mut self, buf: Option<&mut [u8]>) -> Result<Element, QueueError> {
        self.remove_head(buf).ok_or(QueueError::EmptyQueue)
    }

    /// Like [`Queue::remove_tail`], but an empty queue is an error.
    pub fn try_remove_tail(&mut self, buf: Option<&mut [u8]>) -> Result<Element, QueueError> {
        self.remove_tail(buf).ok_or(QueueError::EmptyQueue)
    }

    /// Provides a forward iterator over the payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::try_from_iter(["x", "y"])?;
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next(), Some(&b"x"[..]));
    /// assert_eq!(iter.next(), Some(&b"y"[..]));
    /// assert_eq!(iter.next(), None);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Copies the payloads out, front to back.
    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.iter().map(<[u8]>::to_vec).collect()
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

fn new_ghost() -> Result<NonNull<Link>, QueueError> {
    let layout = Layout::new::<Link>();
    // SAFETY: `Link` is not zero-sized.
    let ghost = NonNull::new(unsafe { alloc(layout) }.cast::<Link>()).ok_or(
        QueueError::OutOfMemory {
            bytes: layout.size(),
        },
    )?;
    // SAFETY:
    // - `ghost` is freshly allocated with the layout of `Link`;
    // - `ghost.next`, `ghost.prev` are initialized to itself immediately.
    unsafe {
        ghost.as_ptr().write(Link::dangling());
        link::init(ghost);
    }
    Ok(ghost)
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was allocated by `new_ghost` with the layout of
        // `Link`, and the ring is empty so nothing points to it any more.
        drop(unsafe { Box::from_raw(self.ghost.as_ptr()) });
    }
}

unsafe impl Send for Queue {}

unsafe impl Sync for Queue {}
