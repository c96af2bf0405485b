use crate::error::QueueError;
use crate::queue::Queue;
use std::hash::{Hash, Hasher};

pub(crate) mod merge;
mod monotonic;
mod sort;
mod structural;

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl Hash for Queue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl Queue {
    /// Returns `true` if the `Queue` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::try_from_iter(["ant", "bee"])?;
    ///
    /// assert_eq!(queue.contains("ant"), true);
    /// assert_eq!(queue.contains("cow"), false);
    /// # Ok::<(), cyclic_queue::QueueError>(())
    /// ```
    pub fn contains<V: AsRef<[u8]>>(&self, x: V) -> bool {
        self.iter().any(|e| e == x.as_ref())
    }

    /// Copy every element into a new queue.
    ///
    /// # Errors
    ///
    /// [`QueueError::OutOfMemory`] if any allocation fails; the partial copy
    /// is released.
    pub fn try_clone(&self) -> Result<Self, QueueError> {
        Self::try_from_iter(self)
    }
}
