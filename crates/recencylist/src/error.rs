//! Error types for recencylist

use std::fmt;

/// Result type alias for list validation
pub type Result<T> = std::result::Result<T, Error>;

/// Structural invariant violations found by [`List::validate`](crate::List::validate)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Recorded length differs from the number of nodes reachable from the head
    LengthMismatch {
        /// Length stored in the list
        recorded: usize,
        /// Nodes counted walking `next` from the head
        walked: usize,
    },

    /// A node's `prev` does not point back at its predecessor, or a link
    /// names a vacant slot
    BrokenLink {
        /// Slot where the walk failed
        slot: usize,
    },

    /// Head or tail disagrees with the length or with the end of the walk
    DanglingEnds,

    /// Occupied and free slots do not account for the whole arena
    SlotLeak {
        /// Slots holding a node
        occupied: usize,
        /// Entries in the free list
        free: usize,
        /// Total slots in the arena
        slots: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LengthMismatch { recorded, walked } => {
                write!(f, "Length mismatch: recorded {}, walked {}", recorded, walked)
            }
            Error::BrokenLink { slot } => write!(f, "Broken link at slot {}", slot),
            Error::DanglingEnds => write!(f, "Head/tail inconsistent with list contents"),
            Error::SlotLeak { occupied, free, slots } => write!(
                f,
                "Slot leak: {} occupied + {} free != {} slots",
                occupied, free, slots
            ),
        }
    }
}

impl std::error::Error for Error {}
