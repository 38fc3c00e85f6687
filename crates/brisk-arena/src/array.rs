//! Growable arrays backed by arena allocations.
//!
//! An [`ArenaArray`] never owns memory. Its storage is an [`ArenaSlice`]
//! borrowed from an [`Arena`] that the caller passes to every operation.
//! When the storage fills up, a larger slice is allocated from the same
//! arena and the live elements are copied forward. The old slice is simply
//! abandoned; it is reclaimed with everything else on the next reset.

use bytemuck::Pod;

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::handle::ArenaSlice;

/// Sequence of `T` stored inside an [`Arena`].
///
/// The array starts unallocated. The first growth allocates exactly what is
/// needed; later growth doubles the capacity. After the arena is reset the
/// array is stale: appends return [`ArenaError::StaleHandle`] and element
/// access panics. Rebuild it with [`ArenaArray::new`].
///
/// ```
/// use brisk_arena::{Arena, ArenaArray};
///
/// let mut arena = Arena::new(1024);
/// let mut values = ArenaArray::new();
/// values.push(5i32, &mut arena)?;
/// values.extend_from_slice(&[7, 9], &mut arena)?;
/// assert_eq!(values.as_slice(&arena)?, &[5, 7, 9]);
/// assert_eq!(*values.at(&arena, 1), 7);
/// # Ok::<(), brisk_arena::ArenaError>(())
/// ```
#[derive(Debug)]
pub struct ArenaArray<T> {
    /// Current backing allocation. `None` until the first growth.
    storage: Option<ArenaSlice<T>>,
    /// Number of logically present elements.
    len: usize,
}

impl<T> ArenaArray<T> {
    /// Create an empty, unallocated array.
    pub const fn new() -> Self {
        Self {
            storage: None,
            len: 0,
        }
    }

    /// Number of elements in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current allocation can hold.
    pub fn capacity(&self) -> usize {
        self.storage.map_or(0, |storage| storage.len())
    }

    /// The current backing allocation, if any.
    pub fn storage(&self) -> Option<ArenaSlice<T>> {
        self.storage
    }
}

impl<T: Pod> ArenaArray<T> {
    /// Append one element.
    pub fn push(&mut self, item: T, arena: &mut Arena) -> Result<(), ArenaError> {
        self.extend_from_slice(std::slice::from_ref(&item), arena)
    }

    /// Append every element of `items`, in order.
    ///
    /// Grows the backing allocation when needed. On error the array is left
    /// exactly as it was: a full arena yields
    /// [`ArenaError::CapacityExceeded`], and storage from an earlier arena
    /// generation yields [`ArenaError::StaleHandle`].
    pub fn extend_from_slice(&mut self, items: &[T], arena: &mut Arena) -> Result<(), ArenaError> {
        if let Some(storage) = &self.storage {
            arena.check(storage)?;
        }
        if items.is_empty() {
            return Ok(());
        }

        let Some(required) = self.len.checked_add(items.len()) else {
            return Err(ArenaError::CapacityExceeded {
                requested: usize::MAX,
                remaining: arena.remaining(),
            });
        };
        let storage = match self.storage {
            Some(storage) if required <= storage.len() => storage,
            _ => self.grow(required, arena)?,
        };

        arena.slice_mut(&storage)?[self.len..required].copy_from_slice(items);
        self.storage = Some(storage);
        self.len = required;
        Ok(())
    }

    /// Allocate storage for at least `required` elements and copy the live
    /// prefix into it. Does not modify `self`.
    fn grow(&self, required: usize, arena: &mut Arena) -> Result<ArenaSlice<T>, ArenaError> {
        let old_capacity = self.capacity();
        let new_capacity = if old_capacity == 0 {
            required
        } else {
            // A batch can outrun a single doubling.
            let mut capacity = old_capacity;
            while capacity < required {
                capacity = capacity.checked_mul(2).unwrap_or(required);
            }
            capacity
        };

        let storage = arena.alloc::<T>(new_capacity)?;
        if let Some(old) = &self.storage {
            arena.copy_prefix(old, &storage, self.len)?;
        }
        tracing::debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            offset = storage.offset(),
            "arena array grew"
        );
        Ok(storage)
    }

    /// The live elements.
    pub fn as_slice<'a>(&self, arena: &'a Arena) -> Result<&'a [T], ArenaError> {
        match &self.storage {
            Some(storage) => Ok(&arena.slice(storage)?[..self.len]),
            None => Ok(&[]),
        }
    }

    /// The live elements, mutably.
    pub fn as_mut_slice<'a>(&self, arena: &'a mut Arena) -> Result<&'a mut [T], ArenaError> {
        match &self.storage {
            Some(storage) => Ok(&mut arena.slice_mut(storage)?[..self.len]),
            None => Ok(&mut []),
        }
    }

    /// Reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()` or if the arena was reset since the
    /// array last grew.
    pub fn at<'a>(&self, arena: &'a Arena, index: usize) -> &'a T {
        self.assert_in_bounds(index);
        match self.as_slice(arena) {
            Ok(items) => &items[index],
            Err(err) => panic!("ArenaArray access failed: {err}"),
        }
    }

    /// Mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`ArenaArray::at`].
    pub fn at_mut<'a>(&self, arena: &'a mut Arena, index: usize) -> &'a mut T {
        self.assert_in_bounds(index);
        match self.as_mut_slice(arena) {
            Ok(items) => &mut items[index],
            Err(err) => panic!("ArenaArray access failed: {err}"),
        }
    }

    fn assert_in_bounds(&self, index: usize) {
        assert!(
            index < self.len,
            "index out of bounds: the len is {} but the index is {index}",
            self.len
        );
    }
}

impl<T> Default for ArenaArray<T> {
    fn default() -> Self {
        Self::new()
    }
}
