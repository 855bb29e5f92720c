//! Back-navigation history: one entry per forward move, holding the room the
//! player left and the counter step that move made (if any).

use serde::{Deserialize, Serialize};

use super::counters::CounterDelta;
use super::types::RoomId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub room: RoomId,
    pub delta: Option<CounterDelta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, room: RoomId, delta: Option<CounterDelta>) {
        self.entries.push(HistoryEntry { room, delta });
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
