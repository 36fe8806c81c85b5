//! Positional record slots for the compacted output sequence.
//!
//! A [`Record`] is either the original raw line or a tombstone left behind by
//! a retention-window trigger. The distinction is explicit at the type level
//! so a genuinely blank input line can never be confused with a compacted one.

use serde::{Deserialize, Serialize};

/// One slot in the output sequence, identified by its 0-based position.
///
/// Serializes untagged: a live record becomes its line text, a tombstone
/// becomes JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    /// The original raw line, unchanged.
    Live(String),
    /// Cleared by a compaction trigger. The slot keeps its position forever.
    Tombstone,
}

impl Record {
    /// Returns `true` if the slot still holds its original line.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Returns `true` if the slot was cleared by a trigger.
    #[must_use]
    pub const fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }

    /// The original line text, or `None` for a tombstone.
    #[must_use]
    pub fn as_line(&self) -> Option<&str> {
        match self {
            Self::Live(line) => Some(line),
            Self::Tombstone => None,
        }
    }
}
