//! Bump arena allocation with arena-backed growable arrays.
//!
//! Built for workloads that create a batch of short-lived values, use them
//! for a while, then throw the whole batch away and rebuild it. Nothing is
//! freed individually; one reset reclaims everything.
//!
//! # Architecture
//!
//! ```text
//! Arena (owns one fixed-size buffer, 16-byte aligned)
//! ├── cursor        bump pointer, rewound by reset()
//! ├── generation    bumped by reset(), stamped into every handle
//! └── ArenaSlice<T> Copy handle: (arena id, generation, offset, len)
//!
//! ArenaArray<T> (no memory of its own)
//! └── Option<ArenaSlice<T>>  current storage; replaced on growth
//! ```
//!
//! Handles are resolved through the arena, so using one after a reset is
//! reported as [`ArenaError::StaleHandle`] instead of reading recycled
//! memory.
//!
//! # Failure policy
//!
//! - Failing to acquire the arena buffer at construction aborts the process.
//! - Running out of space is recoverable: [`ArenaError::CapacityExceeded`].
//! - Out-of-bounds element access panics.
//!
//! # Element types
//!
//! Elements must be [`bytemuck::Pod`]: zero must be a valid value and copies
//! are bitwise. This keeps zero-initialisation and growth copies sound
//! without `unsafe` outside `raw.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod array;
pub mod config;
pub mod error;
pub mod handle;
mod raw;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use array::ArenaArray;
pub use bytemuck::{Pod, Zeroable};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::ArenaSlice;
