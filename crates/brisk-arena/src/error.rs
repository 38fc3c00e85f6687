//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena and array operations.
///
/// Running out of space is the expected, recoverable failure. The handle
/// variants report use of an allocation after its arena was reset, or
/// against the wrong arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The request does not fit in the arena's remaining space.
    CapacityExceeded {
        /// Number of bytes requested, excluding alignment padding.
        requested: usize,
        /// Bytes left between the cursor and the end of the buffer.
        remaining: usize,
    },
    /// The requested alignment is not a power of two.
    InvalidAlignment {
        /// The rejected alignment in bytes.
        align: usize,
    },
    /// An [`ArenaSlice`](crate::ArenaSlice) issued before the last reset.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: u32,
        /// The arena's current generation.
        current_generation: u32,
    },
    /// An [`ArenaSlice`](crate::ArenaSlice) issued by a different arena.
    ForeignHandle {
        /// Identity of the arena that issued the handle.
        handle_arena: u32,
        /// Identity of the arena it was resolved against.
        arena: u32,
    },
    /// Invalid [`ArenaConfig`](crate::ArenaConfig) parameters.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
            Self::StaleHandle {
                handle_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, arena is at generation {current_generation}"
                )
            }
            Self::ForeignHandle {
                handle_arena,
                arena,
            } => {
                write!(
                    f,
                    "handle from arena {handle_arena} resolved against arena {arena}"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
