//! Progress events emitted by a packing run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single observable step of a packing run.
///
/// Events are emitted in run order: `StripOpened(k)` precedes every
/// `ItemPlaced` on strip `k`, and `RunComplete` is always last.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NestEvent<P> {
    /// A new strip was opened.
    StripOpened {
        /// Zero-based strip index.
        strip_id: usize,
    },
    /// An item was committed to a strip at its final position.
    ItemPlaced {
        /// The placed item, carrying its final placement.
        item: P,
        /// Strip the item landed on.
        strip_id: usize,
    },
    /// Every item has been placed or reported unplaceable.
    RunComplete,
}

impl<P> NestEvent<P> {
    /// Returns the strip index this event refers to, if any.
    pub fn strip_id(&self) -> Option<usize> {
        match self {
            NestEvent::StripOpened { strip_id } | NestEvent::ItemPlaced { strip_id, .. } => {
                Some(*strip_id)
            }
            NestEvent::RunComplete => None,
        }
    }

    /// Returns true for the terminal event.
    pub fn is_complete(&self) -> bool {
        matches!(self, NestEvent::RunComplete)
    }
}
