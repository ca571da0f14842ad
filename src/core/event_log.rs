//! Append-only event log shared by solo and multiplayer sessions.
//!
//! Entries record either a claimed set or a free-text message. They are
//! never edited, with one exception: a palette change rewrites the cards
//! inside logged sets so the log matches the live board.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, PaletteRemap};

/// One log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntry {
    /// A player claimed a valid set.
    Set {
        /// 1-based claimant index (roster position, or the solo player index).
        player: u32,
        player_name: String,
        cards: [Card; 3],
        timestamp: DateTime<Utc>,
    },
    /// Free-text message.
    Message {
        player: u32,
        player_name: String,
        text: String,
        timestamp: DateTime<Utc>,
    },
}

impl LogEntry {
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LogEntry::Set { timestamp, .. } | LogEntry::Message { timestamp, .. } => *timestamp,
        }
    }

    #[must_use]
    pub fn player(&self) -> u32 {
        match self {
            LogEntry::Set { player, .. } | LogEntry::Message { player, .. } => *player,
        }
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        match self {
            LogEntry::Set { player_name, .. } | LogEntry::Message { player_name, .. } => {
                player_name
            }
        }
    }

    /// Cards of a set entry; empty for messages.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            LogEntry::Set { cards, .. } => cards,
            LogEntry::Message { .. } => &[],
        }
    }
}

/// Ordered log of entries, oldest first in storage.
///
/// Backed by `im::Vector` so session snapshots clone in O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vector<LogEntry>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a claimed set.
    pub fn record_set(
        &mut self,
        player: u32,
        player_name: impl Into<String>,
        cards: [Card; 3],
        timestamp: DateTime<Utc>,
    ) {
        self.entries.push_back(LogEntry::Set {
            player,
            player_name: player_name.into(),
            cards,
            timestamp,
        });
    }

    /// Record a message.
    pub fn record_message(
        &mut self,
        player: u32,
        player_name: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) {
        self.entries.push_back(LogEntry::Message {
            player,
            player_name: player_name.into(),
            text: text.into(),
            timestamp,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries for display: newest timestamp first, later insertion first on ties.
    #[must_use]
    pub fn newest_first(&self) -> Vec<&LogEntry> {
        let mut entries: Vec<_> = self.entries.iter().rev().collect();
        entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        entries
    }

    /// Rewrite cards in logged sets for a palette change.
    pub(crate) fn apply_remap(&mut self, remap: &PaletteRemap) -> usize {
        self.entries
            .iter_mut()
            .map(|entry| match entry {
                LogEntry::Set { cards, .. } => remap.apply_all(cards.iter_mut()),
                LogEntry::Message { .. } => 0,
            })
            .sum()
    }
}
