use crate::error::QueueError;
use crate::queue::link::Link;
use std::alloc::{alloc, Layout};
use std::fmt;
use std::ptr::NonNull;

/// A heap node of the queue: the embedded link comes first so that a
/// `NonNull<Link>` of any non-ghost node can be cast back to its `Node`.
#[repr(C)]
pub(crate) struct Node {
    pub(crate) link: Link,
    pub(crate) value: Vec<u8>,
}

/// An element detached from a [`Queue`](crate::Queue).
///
/// Removing an element from a queue hands its ownership to the caller as an
/// `Element`. Dropping it releases both the payload and the node.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new()?;
/// queue.insert_tail("gerbil")?;
///
/// let element = queue.remove_head(None).unwrap();
/// assert_eq!(element.value(), b"gerbil");
/// assert_eq!(element.as_str(), Some("gerbil"));
/// # Ok::<(), cyclic_queue::QueueError>(())
/// ```
pub struct Element {
    node: Box<Node>,
}

impl Element {
    /// Allocate a detached node holding a copy of `value`.
    ///
    /// Both the payload and the node are allocated exactly once; a failure of
    /// either is reported as [`QueueError::OutOfMemory`].
    pub(crate) fn try_new(value: &[u8]) -> Result<Self, QueueError> {
        let mut payload = Vec::new();
        payload
            .try_reserve_exact(value.len())
            .map_err(|_| QueueError::OutOfMemory { bytes: value.len() })?;
        payload.extend_from_slice(value);

        let layout = Layout::new::<Node>();
        // SAFETY: `Node` is not zero-sized.
        let ptr = NonNull::new(unsafe { alloc(layout) }.cast::<Node>()).ok_or(
            QueueError::OutOfMemory {
                bytes: layout.size(),
            },
        )?;
        // SAFETY:
        // - `ptr` is freshly allocated with the layout of `Node` by the global
        //   allocator, so it is valid for writes and may be owned by a `Box`;
        // - the link is dangling, but is never read before being attached.
        let node = unsafe {
            ptr.as_ptr().write(Node {
                link: Link::dangling(),
                value: payload,
            });
            Box::from_raw(ptr.as_ptr())
        };
        Ok(Self { node })
    }

    /// Give up the ownership of the node, returning its link to be attached
    /// to a ring.
    pub(crate) fn into_link(self) -> NonNull<Link> {
        NonNull::from(Box::leak(self.node)).cast()
    }

    /// Take back the ownership of a node that has been unlinked.
    ///
    /// It is unsafe because `link` must be the link of a node created by
    /// [`Element::try_new`] which is no longer reachable from any ring.
    pub(crate) unsafe fn from_link(link: NonNull<Link>) -> Self {
        Self {
            node: Box::from_raw(link.cast::<Node>().as_ptr()),
        }
    }

    /// The payload bytes.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.node.value
    }

    /// The payload as a string slice, or `None` if it is not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.value()).ok()
    }

    /// Consume the element and return its payload.
    pub fn into_value(self) -> Vec<u8> {
        self.node.value
    }

    /// Copy the payload into `buf` as a NUL-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes are copied and the terminator is always
    /// written; a longer payload is silently truncated. An empty `buf` is
    /// left untouched. Returns the number of payload bytes copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// queue.insert_tail("dolphin")?;
    ///
    /// let mut buf = [0xff_u8; 4];
    /// let element = queue.remove_head(None).unwrap();
    /// assert_eq!(element.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"dol\0");
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let capacity = match buf.len().checked_sub(1) {
            Some(capacity) => capacity,
            None => return 0,
        };
        let copied = self.value().len().min(capacity);
        buf[..copied].copy_from_slice(&self.value()[..copied]);
        buf[copied] = 0;
        copied
    }
}

/// Reads the payload of the node owning `link`.
///
/// It is unsafe because `link` must be a live non-ghost link, and the
/// returned slice must not outlive the node.
#[inline]
pub(crate) unsafe fn value_of<'a>(link: NonNull<Link>) -> &'a [u8] {
    &(*link.cast::<Node>().as_ptr()).value
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element")
            .field(&String::from_utf8_lossy(self.value()))
            .finish()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Element {}
