//! The room graph: every room, its current exits, its artefacts and the NPC
//! standing in it. Exits are one-directional; returns are installed explicitly.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::artefact::Artefact;
use super::types::{Direction, RoomId};

pub type Exits = BTreeMap<Direction, RoomId>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub exits: Exits,
    pub artefacts: Vec<Artefact>,
    /// Index into the session's NPC roster.
    pub npc: Option<usize>,
}

impl Room {
    fn new(id: RoomId) -> Self {
        Room {
            id,
            exits: Exits::new(),
            artefacts: Vec::new(),
            npc: None,
        }
    }
}

/// A single edit to the graph produced by an entry rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitChange {
    Set {
        room: RoomId,
        direction: Direction,
        dest: RoomId,
    },
    Remove {
        room: RoomId,
        direction: Direction,
    },
    Replace {
        room: RoomId,
        exits: Exits,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomGraph {
    /// The labyrinth as it stands before the player walks in.
    pub fn new() -> Self {
        let mut g = RoomGraph {
            rooms: RoomId::ALL.iter().map(|&id| (id, Room::new(id))).collect(),
        };
        use Direction::*;
        use RoomId::*;
        g.set_exit(Entrance, North, MainHall);

        g.set_exit(MainHall, South, Entrance);
        g.set_exit(MainHall, West, PuzzleRoom);
        g.set_exit(MainHall, North, EndlessCorridor);
        g.set_exit(MainHall, East, SpiralStaircase);

        g.set_exit(PuzzleRoom, East, MainHall);
        g.set_exit(Treasury, East, PuzzleRoom);

        g.set_exit(SpiralStaircase, West, MainHall);
        g.set_exit(SpiralStaircase, Up, SpiralStaircase);
        g.set_exit(SpiralStaircase, Down, SpiralStaircase);

        g.set_exit(SecretCorridor, South, Pit);
        g.set_exit(SecretCorridor, North, MainHall);

        g.set_exit(BinaryCorridor, South, MainHall);

        g.set_exit(EndlessCorridor, Forward, EndlessCorridor);
        g.set_exit(EndlessCorridor, Backward, MainHall);

        g.set_exit(MysteryRoom, North, Treasury);
        g
    }

    pub fn room(&self, id: RoomId) -> &Room {
        // Every RoomId is inserted in new(); the map is never shrunk.
        &self.rooms[&id]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        self.rooms
            .entry(id)
            .or_insert_with(|| Room::new(id))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn exit(&self, room: RoomId, direction: Direction) -> Option<RoomId> {
        self.room(room).exits.get(&direction).copied()
    }

    pub fn exits(&self, room: RoomId) -> &Exits {
        &self.room(room).exits
    }

    pub fn set_exit(&mut self, room: RoomId, direction: Direction, dest: RoomId) {
        trace!("exit set: {} {} -> {}", room, direction, dest);
        self.room_mut(room).exits.insert(direction, dest);
    }

    pub fn remove_exit(&mut self, room: RoomId, direction: Direction) -> Option<RoomId> {
        trace!("exit removed: {} {}", room, direction);
        self.room_mut(room).exits.remove(&direction)
    }

    pub fn replace_exits(&mut self, room: RoomId, exits: Exits) {
        trace!("exits replaced: {} {:?}", room, exits);
        self.room_mut(room).exits = exits;
    }

    pub fn apply(&mut self, change: ExitChange) {
        match change {
            ExitChange::Set {
                room,
                direction,
                dest,
            } => self.set_exit(room, direction, dest),
            ExitChange::Remove { room, direction } => {
                self.remove_exit(room, direction);
            }
            ExitChange::Replace { room, exits } => self.replace_exits(room, exits),
        }
    }

    pub fn npc_in(&self, room: RoomId) -> Option<usize> {
        self.room(room).npc
    }

    pub fn clear_npcs(&mut self) {
        for room in self.rooms.values_mut() {
            room.npc = None;
        }
    }
}

impl Default for RoomGraph {
    fn default() -> Self {
        Self::new()
    }
}
