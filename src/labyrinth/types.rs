use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::artefact::Artefact;

pub const STARTING_VITALITY: i32 = 10;
pub const CARRY_CAPACITY: u32 = 15;
pub const EXHAUSTION_INTERVAL: u32 = 5;
pub const BOOTS_EXHAUSTION_INTERVAL: u32 = 8;
pub const THREAD_CODE_LEN: usize = 6;

/// Every location in the labyrinth. The set is closed, so an exit can never
/// point at a room that does not exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomId {
    Entrance,
    MainHall,
    EndlessCorridor,
    PuzzleRoom,
    Treasury,
    SpiralStaircase,
    Pit,
    SecretCorridor,
    Centre,
    BinaryCorridor,
    LionRoom,
    LavaPit,
    MysteryRoom,
}

impl RoomId {
    pub const ALL: [RoomId; 13] = [
        RoomId::Entrance,
        RoomId::MainHall,
        RoomId::EndlessCorridor,
        RoomId::PuzzleRoom,
        RoomId::Treasury,
        RoomId::SpiralStaircase,
        RoomId::Pit,
        RoomId::SecretCorridor,
        RoomId::Centre,
        RoomId::BinaryCorridor,
        RoomId::LionRoom,
        RoomId::LavaPit,
        RoomId::MysteryRoom,
    ];

    /// Rooms the wandering NPCs may be placed in.
    pub const NPC_ROOMS: [RoomId; 7] = [
        RoomId::MainHall,
        RoomId::EndlessCorridor,
        RoomId::PuzzleRoom,
        RoomId::Treasury,
        RoomId::SpiralStaircase,
        RoomId::Pit,
        RoomId::SecretCorridor,
    ];

    /// Rooms the mystery button may send the north door to (everything but itself).
    pub const SCRAMBLE_TARGETS: [RoomId; 12] = [
        RoomId::Entrance,
        RoomId::MainHall,
        RoomId::EndlessCorridor,
        RoomId::PuzzleRoom,
        RoomId::Treasury,
        RoomId::SpiralStaircase,
        RoomId::Pit,
        RoomId::SecretCorridor,
        RoomId::Centre,
        RoomId::BinaryCorridor,
        RoomId::LionRoom,
        RoomId::LavaPit,
    ];

    pub fn kind(self) -> RoomKind {
        match self {
            RoomId::Entrance => RoomKind::Entrance,
            RoomId::MainHall => RoomKind::Hub,
            RoomId::EndlessCorridor => RoomKind::Corridor,
            RoomId::PuzzleRoom => RoomKind::Puzzle,
            RoomId::Treasury => RoomKind::Vault,
            RoomId::SpiralStaircase => RoomKind::Shaft,
            RoomId::Pit => RoomKind::Pit,
            RoomId::SecretCorridor => RoomKind::Passage,
            RoomId::Centre => RoomKind::BossArena,
            RoomId::BinaryCorridor => RoomKind::Branch,
            RoomId::LionRoom => RoomKind::Hazard(HazardKind::Lions),
            RoomId::LavaPit => RoomKind::Hazard(HazardKind::Lava),
            RoomId::MysteryRoom => RoomKind::Mystery,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RoomId::Entrance => "Entrance",
            RoomId::MainHall => "Main Hall",
            RoomId::EndlessCorridor => "Endless Corridor",
            RoomId::PuzzleRoom => "Puzzle Room",
            RoomId::Treasury => "Treasury",
            RoomId::SpiralStaircase => "Spiral Staircase",
            RoomId::Pit => "Pit",
            RoomId::SecretCorridor => "Secret Corridor",
            RoomId::Centre => "Centre",
            RoomId::BinaryCorridor => "Binary Corridor",
            RoomId::LionRoom => "Lion Room",
            RoomId::LavaPit => "Lava Pit",
            RoomId::MysteryRoom => "Mystery Room",
        }
    }

    /// Short description shown whenever the player arrives.
    pub fn description(self) -> &'static str {
        match self {
            RoomId::Entrance => "at the entrance to The Labyrinth of Daedalus.",
            RoomId::MainHall => "in the main hall of the labyrinth.",
            RoomId::EndlessCorridor => {
                "in a very long corridor. You feel exhaustion coming upon you."
            }
            RoomId::PuzzleRoom => "in what appears to be a puzzle room.",
            RoomId::Treasury => "in the labyrinth's treasury.",
            RoomId::SpiralStaircase => {
                "in a room with a spiral staircase in front of you. You can go up or down."
            }
            RoomId::Pit => "in the pit.",
            RoomId::SecretCorridor => "in the secret corridor shown by Ariadna's Thread.",
            RoomId::Centre => "at the centre of the labyrinth.",
            RoomId::BinaryCorridor => {
                "in a room with 2 doors. The one to the left is dark and dim and the one to the right has a bright light above it."
            }
            RoomId::LionRoom => {
                "in a room full of hungry lions. The door closes behind you instantly."
            }
            RoomId::LavaPit => "in a room with a lava pit.",
            RoomId::MysteryRoom => {
                "in a weird room with glowing light everywhere. There is a button on the opposite wall."
            }
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag that turn resolution dispatches on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Entrance,
    Hub,
    Corridor,
    Puzzle,
    Vault,
    Shaft,
    Pit,
    Passage,
    BossArena,
    Branch,
    Hazard(HazardKind),
    Mystery,
}

impl RoomKind {
    /// Whether entering by `go` may leave a freshly generated artefact behind.
    pub fn spawns_artefacts(self) -> bool {
        matches!(
            self,
            RoomKind::Hub | RoomKind::Puzzle | RoomKind::Pit | RoomKind::Passage
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Lions,
    Lava,
}

impl HazardKind {
    pub fn room(self) -> RoomId {
        match self {
            HazardKind::Lions => RoomId::LionRoom,
            HazardKind::Lava => RoomId::LavaPit,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "forward" | "f" => Ok(Direction::Forward),
            "backward" | "b" => Ok(Direction::Backward),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            other => Err(other.to_string()),
        }
    }
}

/// The quest items. The player holds at most one of each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Thread,
    Harpe,
    Aegis,
    Boots,
    Amulet,
}

impl Item {
    pub fn name(self) -> &'static str {
        match self {
            Item::Thread => "Ariadna's Thread",
            Item::Harpe => "The Harpe",
            Item::Aegis => "Zeus's Aegis",
            Item::Boots => "Hermes's Boots",
            Item::Amulet => "Wizard's Amulet",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub vitality: i32,
    pub inventory: BTreeSet<Item>,
    /// Carry weight still available for artefacts.
    pub capacity: u32,
    pub backpack: Vec<Artefact>,
    pub steps: u32,
    /// Every `exhaustion_interval` steps the player loses one vitality.
    pub exhaustion_interval: u32,
}

impl PlayerState {
    pub fn new(vitality: i32, capacity: u32, exhaustion_interval: u32) -> Self {
        PlayerState {
            vitality,
            inventory: BTreeSet::new(),
            capacity,
            backpack: Vec::new(),
            steps: 0,
            exhaustion_interval: exhaustion_interval.max(1),
        }
    }

    pub fn has(&self, item: Item) -> bool {
        self.inventory.contains(&item)
    }

    pub fn is_dead(&self) -> bool {
        self.vitality <= 0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::new(STARTING_VITALITY, CARRY_CAPACITY, EXHAUSTION_INTERVAL)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flags {
    pub riddle_solved: bool,
    pub victory: bool,
    pub button_pressed: bool,
}

/// Six binary digits woven into Ariadna's Thread. Digit `i` names the safe
/// door at branch position `i`: `0` is left, `1` is right.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadCode([bool; THREAD_CODE_LEN]);

impl ThreadCode {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bits = [false; THREAD_CODE_LEN];
        for bit in bits.iter_mut() {
            *bit = rng.gen_bool(0.5);
        }
        ThreadCode(bits)
    }

    /// The door that leads onward at `position`. Positions past the end
    /// wrap, which never happens for a branch counter kept in range.
    pub fn safe_door(&self, position: usize) -> Direction {
        if self.0[position % THREAD_CODE_LEN] {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

impl fmt::Display for ThreadCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for ThreadCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != THREAD_CODE_LEN {
            return Err(format!("expected {} binary digits, got '{}'", THREAD_CODE_LEN, s));
        }
        let mut bits = [false; THREAD_CODE_LEN];
        for (i, c) in s.chars().enumerate() {
            bits[i] = match c {
                '0' => false,
                '1' => true,
                _ => return Err(format!("'{}' is not a binary digit", c)),
            };
        }
        Ok(ThreadCode(bits))
    }
}
