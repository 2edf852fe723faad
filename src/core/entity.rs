//! Card identification.
//!
//! Every physical card instance has a unique `CardGuid`. The guid is stable
//! across clones of the game, zone changes and snapshot round-trips, so a
//! remote peer can refer to the same card the local player sees.
//!
//! ## Allocation
//!
//! Guids come from a `GuidAllocator`. The allocator is external to `Game`:
//! catalog import, card pools and game creation all draw from the same
//! allocator so that guids never collide between the pool and the board.
//!
//! ```
//! use crystal_tactics::core::{CardGuid, GuidAllocator};
//!
//! let mut guids = GuidAllocator::new();
//! let a = guids.alloc();
//! let b = guids.alloc();
//!
//! assert_ne!(a, b);
//! assert_eq!(a, CardGuid(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// Serialized as a bare integer so it can key JSON objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardGuid(pub u32);

impl CardGuid {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardGuid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Monotonic guid source.
///
/// Guid 0 is never handed out, which keeps it free as a sentinel for
/// external collaborators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidAllocator {
    last: u32,
}

impl GuidAllocator {
    /// Create an allocator whose first guid is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator that continues after `last`.
    ///
    /// Used when a snapshot is loaded and new cards must not collide with
    /// the ones it already contains.
    #[must_use]
    pub fn starting_after(last: CardGuid) -> Self {
        Self { last: last.0 }
    }

    /// Allocate a new guid.
    pub fn alloc(&mut self) -> CardGuid {
        self.last += 1;
        CardGuid(self.last)
    }

    /// The most recently allocated guid, if any.
    #[must_use]
    pub fn last(&self) -> Option<CardGuid> {
        (self.last > 0).then_some(CardGuid(self.last))
    }
}
