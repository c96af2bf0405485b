//! Error types for queue operations.

use thiserror::Error;

/// Errors that can occur in queue operations.
///
/// Most transforms never fail: an empty queue is a valid terminal state, so
/// they return their trivial value instead. A missing queue cannot be
/// expressed at all; [`Queue::destroy_opt`](crate::Queue::destroy_opt) takes
/// an `Option` for callers that hold one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The allocator could not provide `bytes` bytes for a node, a ghost or a
    /// payload copy.
    #[error("out of memory allocating {bytes} bytes")]
    OutOfMemory { bytes: usize },

    /// A removal was attempted on a queue with no elements.
    #[error("queue is empty")]
    EmptyQueue,
}

impl QueueError {
    /// Returns `true` if retrying the same call later may succeed.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}
