//! Link primitives of the cyclic ring.
//!
//! All functions work on raw `NonNull<Link>` pointers and know nothing about
//! payloads. They are unsafe because none of them checks that the given links
//! belong to a well-formed ring.
//!
//! # Naming Conventions
//!
//! - `ghost`: the payload-less link that anchors a ring;
//! - `(ghost, pivot]`: a half-open range of links starting right after the
//!   ghost node and ending at `pivot` (inclusive).

use std::ptr::NonNull;

/// The pair of neighbour pointers embedded in every node, and the whole of
/// a ghost node.
#[repr(C)]
pub(crate) struct Link {
    pub(crate) next: NonNull<Link>,
    pub(crate) prev: NonNull<Link>,
}

impl Link {
    /// A link whose pointers must not be read until it is attached or
    /// initialized with [`init`].
    pub(crate) const fn dangling() -> Self {
        Self {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }
    }
}

/// Make `ghost` point to itself, the empty ring.
pub(crate) unsafe fn init(mut ghost: NonNull<Link>) {
    ghost.as_mut().next = ghost;
    ghost.as_mut().prev = ghost;
}

#[inline]
pub(crate) unsafe fn next(link: NonNull<Link>) -> NonNull<Link> {
    link.as_ref().next
}

#[inline]
pub(crate) unsafe fn prev(link: NonNull<Link>) -> NonNull<Link> {
    link.as_ref().prev
}

#[inline]
pub(crate) unsafe fn is_empty(ghost: NonNull<Link>) -> bool {
    next(ghost) == ghost
}

/// Returns `true` if the ring anchored at `ghost` holds exactly one node.
#[inline]
pub(crate) unsafe fn is_singular(ghost: NonNull<Link>) -> bool {
    !is_empty(ghost) && next(ghost) == prev(ghost)
}

pub(crate) unsafe fn connect(mut prev: NonNull<Link>, mut next: NonNull<Link>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Attach a detached `node` right after `after`.
pub(crate) unsafe fn insert_after(node: NonNull<Link>, after: NonNull<Link>) {
    let before = next(after);
    #[cfg(debug_assertions)]
    assert_adjacent(after, before);
    connect(after, node);
    connect(node, before);
}

/// Attach a detached `node` right before `before`.
///
/// Inserting before the ghost node appends to the tail of the ring.
pub(crate) unsafe fn insert_before(node: NonNull<Link>, before: NonNull<Link>) {
    insert_after(node, prev(before));
}

/// Detach `node` from its ring and reconnect its neighbours.
///
/// The memory of `node` is untouched and its own pointers are left stale.
pub(crate) unsafe fn unlink(node: NonNull<Link>) {
    #[cfg(debug_assertions)]
    {
        assert_adjacent(prev(node), node);
        assert_adjacent(node, next(node));
    }
    connect(prev(node), next(node));
}

/// Move `node` so that it directly follows `dest`. `node` and `dest` must
/// differ, but may belong to different rings.
pub(crate) unsafe fn move_after(node: NonNull<Link>, dest: NonNull<Link>) {
    debug_assert_ne!(node, dest, "cannot move a node after itself");
    unlink(node);
    insert_after(node, dest);
}

/// Move `node` so that it directly precedes `dest`.
pub(crate) unsafe fn move_before(node: NonNull<Link>, dest: NonNull<Link>) {
    debug_assert_ne!(node, dest, "cannot move a node before itself");
    unlink(node);
    insert_before(node, dest);
}

/// Move the range `(src, pivot]` out of the ring anchored at `src` into the
/// empty ring anchored at `dest`.
///
/// `pivot` must be a node of `src` (not the ghost). The remaining nodes stay
/// in `src`, which may become empty if `pivot` was its last node.
pub(crate) unsafe fn cut(dest: NonNull<Link>, src: NonNull<Link>, pivot: NonNull<Link>) {
    debug_assert!(is_empty(dest), "cut into a non-empty ring");
    debug_assert_ne!(src, pivot, "cannot cut at the ghost node");
    let front = next(src);
    let rest = next(pivot);
    connect(src, rest);
    connect(dest, front);
    connect(pivot, dest);
}

/// Append every node of `src` to the tail of `dest`, leaving `src` empty.
pub(crate) unsafe fn splice_tail(src: NonNull<Link>, dest: NonNull<Link>) {
    if is_empty(src) {
        return;
    }
    let (front, back) = (next(src), prev(src));
    connect(prev(dest), front);
    connect(back, dest);
    init(src);
}

#[cfg(debug_assertions)]
pub(crate) unsafe fn assert_adjacent(prev: NonNull<Link>, next: NonNull<Link>) {
    assert_eq!(prev.as_ref().next, next);
    assert_eq!(next.as_ref().prev, prev);
}

/// Walk the whole ring anchored at `ghost` and check `n.next.prev == n` for
/// every link.
#[cfg(any(debug_assertions, feature = "ring-check"))]
pub(crate) unsafe fn assert_ring(ghost: NonNull<Link>) {
    let mut link = ghost;
    loop {
        let following = next(link);
        assert_eq!(prev(following), link, "ring is broken after {:p}", link);
        link = following;
        if link == ghost {
            break;
        }
    }
}
