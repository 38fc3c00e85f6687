//! Typed handles to arena allocations.
//!
//! An [`ArenaSlice`] encodes where an allocation lives inside its arena's
//! buffer. It is generation-scoped: the `generation` field allows O(1)
//! staleness checks after a reset without any per-allocation bookkeeping.

use std::fmt;
use std::marker::PhantomData;

/// Borrowed range of `len` elements of `T` inside an [`Arena`](crate::Arena).
///
/// Handles are plain values: copying or dropping one never touches the
/// arena. Resolve them with [`Arena::slice`](crate::Arena::slice) or
/// [`Arena::slice_mut`](crate::Arena::slice_mut).
#[must_use]
pub struct ArenaSlice<T> {
    /// Identity of the arena that issued this handle.
    pub(crate) arena: u32,
    /// Arena generation when this allocation was made.
    pub(crate) generation: u32,
    /// Byte offset of the first element within the arena buffer.
    pub(crate) offset: usize,
    /// Length of the allocation in elements.
    pub(crate) len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArenaSlice<T> {
    pub(crate) fn new(arena: u32, generation: u32, offset: usize, len: usize) -> Self {
        Self {
            arena,
            generation,
            offset,
            len,
            _marker: PhantomData,
        }
    }

    /// Byte offset of the allocation within the arena buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements in the allocation.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The arena generation this handle belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Size of the allocation in bytes.
    pub fn byte_len(&self) -> usize {
        self.len * std::mem::size_of::<T>()
    }

    /// Byte range covered by the allocation.
    pub(crate) fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.byte_len()
    }
}

impl<T> Clone for ArenaSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaSlice<T> {}

impl<T> PartialEq for ArenaSlice<T> {
    fn eq(&self, other: &Self) -> bool {
        self.arena == other.arena
            && self.generation == other.generation
            && self.offset == other.offset
            && self.len == other.len
    }
}

impl<T> Eq for ArenaSlice<T> {}

impl<T> fmt::Debug for ArenaSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaSlice")
            .field("arena", &self.arena)
            .field("generation", &self.generation)
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> fmt::Display for ArenaSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaSlice(arena={}, gen={}, off={}, len={})",
            self.arena, self.generation, self.offset, self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_accessors() {
        let h = ArenaSlice::<u32>::new(1, 3, 64, 10);
        assert_eq!(h.offset(), 64);
        assert_eq!(h.len(), 10);
        assert_eq!(h.generation(), 3);
        assert_eq!(h.byte_len(), 40);
        assert_eq!(h.byte_range(), 64..104);
        assert!(!h.is_empty());
    }

    #[test]
    fn empty_handle() {
        let h = ArenaSlice::<u64>::new(0, 0, 0, 0);
        assert!(h.is_empty());
        assert_eq!(h.byte_range(), 0..0);
    }

    #[test]
    fn handles_are_copy_without_t_copy_bound() {
        struct NotCopy;
        let h = ArenaSlice::<NotCopy>::new(0, 0, 8, 1);
        let g = h;
        assert_eq!(h, g);
    }
}
