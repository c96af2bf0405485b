//! This crate provides a queue of byte strings on an intrusive doubly-linked
//! list, implemented as a cyclic list, together with whole-queue transforms:
//! deletion, reversal, sorting, monotonic filtering and merging.
//!
//! The [`Queue`] allows inserting and removing elements at both ends in
//! constant time. Every transform rewrites the same ring in place by
//! relinking nodes, so an element keeps its identity (and its payload
//! allocation) however it is reordered.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new()?;
//!
//! queue.insert_head("a")?;
//! queue.insert_head("b")?; // [b, a]
//! queue.insert_tail("c")?; // [b, a, c]
//!
//! let mut buf = [0_u8; 8];
//! let element = queue.remove_tail(Some(&mut buf)).unwrap();
//! assert_eq!(element.value(), b"c");
//! assert_eq!(&buf[..2], b"c\0");
//!
//! queue.sort(false);
//! assert_eq!(queue, Queue::try_from_iter(["a", "b"])?);
//! # Ok::<(), cyclic_queue::QueueError>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Link    │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        └───────────┘
//! │  ║  payload  ║           ║  payload  ║                            ↑   ↑
//! │  ╚═══════════╝           ╚═══════════╝                            │   │
//! │      Node 0                  Node 1                               │   │
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Queue
//! ```
//! The `Queue` contains only a pointer `ghost` to the ghost node. The length
//! is not cached, so [`Queue::size`] takes *O*(*n*) time.
//!
//! Each node is allocated on heap, and contains:
//! - the `next` and `prev` links, placed first so that a link can be turned
//!   back into its node;
//! - the payload, an owned copy of the inserted bytes.
//!
//! The ghost node is a bare link with *NO* payload.
//!
//! # Allocation
//!
//! Nodes, payloads and ghost nodes are allocated exactly once per call. If
//! the allocator fails, the call returns [`QueueError::OutOfMemory`] and the
//! queue is left as it was.
//!
//! # Ownership
//!
//! Removing an element detaches it and hands it to the caller as an
//! [`Element`]; dropping the element releases it. Dropping the [`Queue`]
//! releases every element still in it.
//!
//! # Transforms
//!
//! - [`delete_mid`], [`delete_dup`]: delete elements by position or value;
//! - [`swap`], [`reverse`], [`reverse_k`]: reorder elements by position;
//! - [`sort`]: stable merge sort, ascending or descending;
//! - [`filter_ascend`], [`filter_descend`]: keep running extremes from the
//!   right;
//! - [`merge`], [`merge_into`]: k-way merge of sorted queues.
//!
//! Payloads are compared as byte strings, lexicographically.
//!
//! # Features
//!
//! - `ring-check`: walk the whole ring after every mutation and assert that
//!   every link is consistent with its neighbours. Debug builds always do
//!   it; the feature turns it on for release builds too. Off by default.
//!
//! [`Queue`]: crate::Queue
//! [`Element`]: crate::Element
//! [`delete_mid`]: crate::Queue::delete_mid
//! [`delete_dup`]: crate::Queue::delete_dup
//! [`swap`]: crate::Queue::swap
//! [`reverse`]: crate::Queue::reverse
//! [`reverse_k`]: crate::Queue::reverse_k
//! [`sort`]: crate::Queue::sort
//! [`filter_ascend`]: crate::Queue::filter_ascend
//! [`filter_descend`]: crate::Queue::filter_descend
//! [`merge`]: crate::merge
//! [`merge_into`]: crate::Queue::merge_into

#[doc(inline)]
pub use error::QueueError;
#[doc(inline)]
pub use queue::element::Element;
#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::{merge, Queue};

pub mod error;
pub mod queue;
