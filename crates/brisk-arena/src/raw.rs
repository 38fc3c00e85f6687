//! Low-level primitives for arena memory.
//!
//! The arena buffer is a `Vec<Chunk>` so that its base address carries the
//! default alignment. Everything above this module sees it as bytes, and
//! typed views are produced with `bytemuck` casts. The only `unsafe` in the
//! crate is the `Pod` impl below.

#![allow(unsafe_code)]

use bytemuck::{Pod, Zeroable};

/// Alignment and size of one backing chunk.
pub(crate) const CHUNK_BYTES: usize = 16;

/// A 16-byte, 16-aligned block of backing storage.
#[derive(Clone, Copy)]
#[repr(C, align(16))]
pub(crate) struct Chunk([u8; CHUNK_BYTES]);

impl Chunk {
    pub(crate) const ZERO: Chunk = Chunk([0; CHUNK_BYTES]);
}

// SAFETY: `Chunk` is `repr(C)` over a `[u8; 16]` whose size equals its
// alignment, so it has no padding bytes and every bit pattern (including
// all zeroes) is valid.
unsafe impl Zeroable for Chunk {}
// SAFETY: see above; `Chunk` is `Copy + 'static` and padding-free.
unsafe impl Pod for Chunk {}

/// Number of chunks needed to hold `bytes` bytes.
pub(crate) fn chunks_for(bytes: usize) -> usize {
    bytes.div_ceil(CHUNK_BYTES)
}

/// View the first `len` bytes of `chunks`.
pub(crate) fn bytes(chunks: &[Chunk], len: usize) -> &[u8] {
    &bytemuck::cast_slice::<Chunk, u8>(chunks)[..len]
}

/// Mutable view of the first `len` bytes of `chunks`.
pub(crate) fn bytes_mut(chunks: &mut [Chunk], len: usize) -> &mut [u8] {
    &mut bytemuck::cast_slice_mut::<Chunk, u8>(chunks)[..len]
}

/// Reinterpret an aligned byte range as elements of `T`.
///
/// # Panics
///
/// Panics if `bytes` is misaligned for `T` or its length is not a multiple
/// of `size_of::<T>()`. Ranges handed out by the arena satisfy both.
pub(crate) fn typed<T: Pod>(bytes: &[u8]) -> &[T] {
    bytemuck::cast_slice(bytes)
}

/// Mutable counterpart of [`typed`].
pub(crate) fn typed_mut<T: Pod>(bytes: &mut [u8]) -> &mut [T] {
    bytemuck::cast_slice_mut(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_layout() {
        assert_eq!(std::mem::size_of::<Chunk>(), CHUNK_BYTES);
        assert_eq!(std::mem::align_of::<Chunk>(), CHUNK_BYTES);
    }

    #[test]
    fn chunks_for_rounds_up() {
        assert_eq!(chunks_for(1), 1);
        assert_eq!(chunks_for(16), 1);
        assert_eq!(chunks_for(17), 2);
    }

    #[test]
    fn byte_view_is_trimmed_and_aligned() {
        let chunks = vec![Chunk::ZERO; 2];
        let view = bytes(&chunks, 20);
        assert_eq!(view.len(), 20);
        assert_eq!(view.as_ptr() as usize % CHUNK_BYTES, 0);
    }

    #[test]
    fn typed_view_reads_written_bytes() {
        let mut chunks = vec![Chunk::ZERO; 1];
        let raw = bytes_mut(&mut chunks, 16);
        typed_mut::<u32>(&mut raw[4..8])[0] = 0xdead_beef;
        assert_eq!(typed::<u32>(&raw[4..8]), &[0xdead_beef]);
    }
}
