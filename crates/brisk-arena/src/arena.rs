//! Fixed-capacity bump arena.
//!
//! An [`Arena`] owns one contiguous buffer and serves every request by
//! advancing a cursor. There is no per-allocation free: [`Arena::reset`]
//! rewinds the cursor and invalidates every outstanding [`ArenaSlice`] in
//! one step. Allocations are zeroed lazily when they are handed out.

use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use bytemuck::Pod;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::ArenaSlice;
use crate::raw::{self, Chunk};

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(0);

/// Linear allocator over a single fixed-size buffer.
///
/// The buffer is acquired once at construction and released on drop. All
/// mutation goes through `&mut self`, so an arena has exactly one owner at
/// a time.
///
/// # Buffer layout
///
/// ```text
/// 0          offset           cursor                   capacity
/// |-- live --|pad|-- live --|------------ free ------------|
/// ```
pub struct Arena {
    /// Backing storage, 16-byte aligned. Never resized after construction.
    data: Vec<Chunk>,
    /// Usable size of `data` in bytes.
    capacity: usize,
    /// Bump pointer: next free byte.
    cursor: usize,
    /// Incremented by every reset that follows an allocation.
    generation: u32,
    /// Whether any handle has been issued in the current generation.
    issued: bool,
    /// Process-unique identity stamped into every handle.
    id: u32,
    /// Alignment used by [`Arena::alloc`].
    default_align: usize,
}

impl Arena {
    /// Create an arena with a zeroed buffer of `capacity` bytes.
    ///
    /// Failing to obtain the buffer is not recoverable: the process aborts
    /// through the global allocation error handler.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "arena capacity must be non-zero");
        Self::build(capacity, ArenaConfig::DEFAULT_ALIGN)
    }

    /// Create an arena from a validated [`ArenaConfig`].
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the config is rejected.
    /// Buffer acquisition failure aborts, as with [`Arena::new`].
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::build(config.capacity, config.default_align))
    }

    fn build(capacity: usize, default_align: usize) -> Self {
        let chunks = raw::chunks_for(capacity);
        let mut data = Vec::new();
        if data.try_reserve_exact(chunks).is_err() {
            tracing::error!(capacity, "failed to acquire arena buffer");
            let layout = Layout::array::<Chunk>(chunks).unwrap_or_else(|_| Layout::new::<Chunk>());
            handle_alloc_error(layout);
        }
        data.resize(chunks, Chunk::ZERO);

        let id = NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(arena = id, capacity, default_align, "arena created");
        Self {
            data,
            capacity,
            cursor: 0,
            generation: 0,
            issued: false,
            id,
            default_align,
        }
    }

    /// Allocate `count` zeroed elements of `T` at the default alignment.
    ///
    /// See [`Arena::alloc_aligned`].
    pub fn alloc<T: Pod>(&mut self, count: usize) -> Result<ArenaSlice<T>, ArenaError> {
        self.alloc_aligned(count, self.default_align)
    }

    /// Allocate `count` zeroed elements of `T` aligned to `align` bytes.
    ///
    /// The effective alignment is the larger of `align` and `T`'s own.
    /// Returns [`ArenaError::CapacityExceeded`] if the aligned request does
    /// not fit in the remaining space; the cursor is left untouched in that
    /// case. Returns [`ArenaError::InvalidAlignment`] if `align` is not a
    /// power of two.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    pub fn alloc_aligned<T: Pod>(
        &mut self,
        count: usize,
        align: usize,
    ) -> Result<ArenaSlice<T>, ArenaError> {
        assert!(
            std::mem::size_of::<T>() != 0,
            "zero-sized element types cannot be arena-allocated"
        );
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }
        let align = align.max(std::mem::align_of::<T>());
        let remaining = self.remaining();

        let Some(size) = count.checked_mul(std::mem::size_of::<T>()) else {
            tracing::debug!(arena = self.id, count, remaining, "allocation size overflow");
            return Err(ArenaError::CapacityExceeded {
                requested: usize::MAX,
                remaining,
            });
        };

        // Pad against the real address so alignments above the chunk size
        // still hold.
        let addr = self.data.as_ptr() as usize + self.cursor;
        let padding = addr.wrapping_neg() & (align - 1);
        let range = self
            .cursor
            .checked_add(padding)
            .and_then(|start| Some(start..start.checked_add(size)?))
            .filter(|range| range.end <= self.capacity);
        let Some(range) = range else {
            tracing::debug!(
                arena = self.id,
                requested = size,
                padding,
                remaining,
                "arena exhausted"
            );
            return Err(ArenaError::CapacityExceeded {
                requested: size,
                remaining,
            });
        };

        raw::bytes_mut(&mut self.data, self.capacity)[range.clone()].fill(0);
        self.cursor = range.end;
        self.issued = true;
        tracing::trace!(arena = self.id, offset = range.start, size, "alloc");
        Ok(ArenaSlice::new(self.id, self.generation, range.start, count))
    }

    /// Allocate a copy of `items`.
    pub fn alloc_slice_copy<T: Pod>(&mut self, items: &[T]) -> Result<ArenaSlice<T>, ArenaError> {
        let handle = self.alloc::<T>(items.len())?;
        self.slice_mut(&handle)?.copy_from_slice(items);
        Ok(handle)
    }

    /// Resolve a handle to its elements.
    ///
    /// Fails with [`ArenaError::StaleHandle`] if the arena was reset after
    /// the handle was issued, or [`ArenaError::ForeignHandle`] if another
    /// arena issued it.
    pub fn slice<T: Pod>(&self, handle: &ArenaSlice<T>) -> Result<&[T], ArenaError> {
        self.check(handle)?;
        let bytes = raw::bytes(&self.data, self.capacity);
        Ok(raw::typed(&bytes[handle.byte_range()]))
    }

    /// Resolve a handle to its elements, mutably.
    pub fn slice_mut<T: Pod>(&mut self, handle: &ArenaSlice<T>) -> Result<&mut [T], ArenaError> {
        self.check(handle)?;
        let bytes = raw::bytes_mut(&mut self.data, self.capacity);
        Ok(raw::typed_mut(&mut bytes[handle.byte_range()]))
    }

    /// Copy the first `count` elements of `src` to the start of `dst`.
    ///
    /// `dst` must have been allocated after `src` in the current generation,
    /// which places it entirely above `src` in the buffer.
    pub(crate) fn copy_prefix<T: Pod>(
        &mut self,
        src: &ArenaSlice<T>,
        dst: &ArenaSlice<T>,
        count: usize,
    ) -> Result<(), ArenaError> {
        self.check(src)?;
        self.check(dst)?;
        assert!(count <= src.len() && count <= dst.len());
        assert!(src.byte_range().end <= dst.offset());

        let bytes = count * std::mem::size_of::<T>();
        let buf = raw::bytes_mut(&mut self.data, self.capacity);
        let (head, tail) = buf.split_at_mut(dst.offset());
        let from: &[T] = raw::typed(&head[src.offset()..src.offset() + bytes]);
        let to: &mut [T] = raw::typed_mut(&mut tail[..bytes]);
        to.copy_from_slice(from);
        Ok(())
    }

    /// Verify that `handle` was issued by this arena in the current generation.
    pub fn check<T>(&self, handle: &ArenaSlice<T>) -> Result<(), ArenaError> {
        if handle.arena != self.id {
            return Err(ArenaError::ForeignHandle {
                handle_arena: handle.arena,
                arena: self.id,
            });
        }
        if handle.generation != self.generation {
            return Err(ArenaError::StaleHandle {
                handle_generation: handle.generation,
                current_generation: self.generation,
            });
        }
        Ok(())
    }

    /// Rewind the cursor to zero without deallocating or zeroing.
    ///
    /// Every handle issued before the reset becomes stale. Resetting an
    /// arena that has issued nothing since the last reset changes nothing.
    pub fn reset(&mut self) {
        if !self.issued {
            return;
        }
        tracing::trace!(
            arena = self.id,
            generation = self.generation,
            used = self.cursor,
            "arena reset"
        );
        self.cursor = 0;
        self.issued = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far in this generation, including padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Current generation. Handles from other generations are stale.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Process-unique identity of this arena.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Alignment used by [`Arena::alloc`].
    pub fn default_align(&self) -> usize {
        self.default_align
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
