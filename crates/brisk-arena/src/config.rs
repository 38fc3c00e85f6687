//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Validated at construction by [`Arena::with_config`](crate::Arena::with_config);
/// all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing buffer in bytes.
    ///
    /// Default: 8 MiB. Must be non-zero. The arena never grows, so size it
    /// for the largest batch built between two resets.
    pub capacity: usize,

    /// Alignment used by [`Arena::alloc`](crate::Arena::alloc) in bytes.
    ///
    /// Default: twice the pointer width. Must be a power of two.
    pub default_align: usize,
}

impl ArenaConfig {
    /// Default buffer size: 8 MiB.
    pub const DEFAULT_CAPACITY: usize = 8 * 1024 * 1024;

    /// Default alignment: enough for every primitive and pointer-sized type.
    pub const DEFAULT_ALIGN: usize = 2 * std::mem::size_of::<usize>();

    /// Create a config for a buffer of `capacity` bytes.
    ///
    /// Uses the default alignment.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            default_align: Self::DEFAULT_ALIGN,
        }
    }

    /// Check the parameters, returning [`ArenaError::InvalidConfig`] on the
    /// first violation.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "capacity must be non-zero".to_string(),
            });
        }
        if !self.default_align.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "default_align must be a power of two (got {})",
                    self.default_align
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
