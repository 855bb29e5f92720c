//! Virtual rooms: the spiral staircase, the endless corridor and the binary
//! corridor are each a single room whose exits depend on a counter.
//!
//! Each counter implements [`ReversibleMove`]: a self-loop move through the
//! room yields a [`Step`] that the history stores, and `back` hands the step
//! to `invert` to undo exactly that move. Exit sets are pure functions of the
//! counter value plus whatever player state the room cares about.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::graph::Exits;
use super::types::{Direction, RoomId, ThreadCode, THREAD_CODE_LEN};

pub const SHAFT_MIN: i32 = -5;
pub const SHAFT_MAX: i32 = 5;
/// Staircase level where The Harpe lies.
pub const HARPE_LEVEL: i32 = 3;
/// Corridor position where Hermes's Boots lie.
pub const BOOTS_POSITION: u32 = 15;
pub const BRANCH_MAX: usize = THREAD_CODE_LEN - 1;
/// Exclusive upper bound for the corridor position drawn by the mystery button.
pub const CORRIDOR_SCRAMBLE_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Advance,
    Retreat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    Shaft,
    Corridor,
    Branch,
}

impl CounterKind {
    pub fn for_room(room: RoomId) -> Option<CounterKind> {
        match room {
            RoomId::SpiralStaircase => Some(CounterKind::Shaft),
            RoomId::EndlessCorridor => Some(CounterKind::Corridor),
            RoomId::BinaryCorridor => Some(CounterKind::Branch),
            _ => None,
        }
    }
}

/// A recorded counter move, kept on the history stack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterDelta {
    pub counter: CounterKind,
    pub step: Step,
}

pub trait ReversibleMove {
    /// Move through the virtual room in `direction`. Returns `None` when the
    /// direction does not move this counter.
    fn apply(&mut self, direction: Direction) -> Option<Step>;

    /// Undo a step previously returned by `apply`.
    fn invert(&mut self, step: Step);
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shaft {
    pub level: i32,
}

impl Shaft {
    /// Level the staircase takes when entered from `from`, if that neighbour resets it.
    pub fn entry_level(from: RoomId) -> Option<i32> {
        match from {
            RoomId::MainHall => Some(0),
            RoomId::Pit => Some(SHAFT_MIN),
            RoomId::Centre => Some(SHAFT_MAX),
            _ => None,
        }
    }

    pub fn exits(&self, has_thread: bool, victory: bool) -> Exits {
        let here = RoomId::SpiralStaircase;
        let mut exits = Exits::new();
        match self.level {
            0 => {
                exits.insert(Direction::West, RoomId::MainHall);
                exits.insert(Direction::Up, here);
                exits.insert(Direction::Down, here);
            }
            l if l <= SHAFT_MIN => {
                exits.insert(Direction::North, RoomId::Pit);
                exits.insert(Direction::Up, here);
            }
            l if l >= SHAFT_MAX => {
                exits.insert(Direction::Down, here);
                if has_thread && victory {
                    exits.insert(Direction::Up, RoomId::Centre);
                }
            }
            _ => {
                exits.insert(Direction::Up, here);
                exits.insert(Direction::Down, here);
            }
        }
        exits
    }
}

impl ReversibleMove for Shaft {
    fn apply(&mut self, direction: Direction) -> Option<Step> {
        match direction {
            Direction::Up if self.level < SHAFT_MAX => {
                self.level += 1;
                Some(Step::Advance)
            }
            Direction::Down if self.level > SHAFT_MIN => {
                self.level -= 1;
                Some(Step::Retreat)
            }
            _ => None,
        }
    }

    fn invert(&mut self, step: Step) {
        self.level = match step {
            Step::Advance => (self.level - 1).max(SHAFT_MIN),
            Step::Retreat => (self.level + 1).min(SHAFT_MAX),
        };
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Corridor {
    pub position: u32,
}

impl Corridor {
    pub fn entry_position(from: RoomId) -> Option<u32> {
        match from {
            RoomId::MainHall => Some(0),
            _ => None,
        }
    }

    pub fn exits(&self) -> Exits {
        let here = RoomId::EndlessCorridor;
        let mut exits = Exits::new();
        if self.position == 0 {
            exits.insert(Direction::South, RoomId::MainHall);
        } else {
            exits.insert(Direction::Backward, here);
        }
        exits.insert(Direction::Forward, here);
        exits
    }
}

impl ReversibleMove for Corridor {
    fn apply(&mut self, direction: Direction) -> Option<Step> {
        match direction {
            Direction::Forward => {
                self.position += 1;
                Some(Step::Advance)
            }
            Direction::Backward if self.position > 0 => {
                self.position -= 1;
                Some(Step::Retreat)
            }
            _ => None,
        }
    }

    fn invert(&mut self, step: Step) {
        match step {
            Step::Advance => self.position = self.position.saturating_sub(1),
            Step::Retreat => self.position += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    pub position: usize,
}

impl Branch {
    pub fn entry_position(from: RoomId) -> Option<usize> {
        match from {
            RoomId::MainHall => Some(0),
            RoomId::Centre => Some(BRANCH_MAX),
            _ => None,
        }
    }

    /// `hazard` is where the wrong door leads this time round.
    pub fn exits(&self, code: &ThreadCode, hazard: RoomId) -> Exits {
        let here = RoomId::BinaryCorridor;
        let mut exits = Exits::new();
        if self.position == 0 {
            exits.insert(Direction::South, RoomId::MainHall);
        } else {
            exits.insert(Direction::Backward, here);
        }
        let onward = if self.position >= BRANCH_MAX {
            RoomId::Centre
        } else {
            here
        };
        let safe = code.safe_door(self.position);
        let wrong = if safe == Direction::Left {
            Direction::Right
        } else {
            Direction::Left
        };
        exits.insert(safe, onward);
        exits.insert(wrong, hazard);
        exits
    }
}

impl ReversibleMove for Branch {
    fn apply(&mut self, direction: Direction) -> Option<Step> {
        match direction {
            Direction::Backward if self.position > 0 => {
                self.position -= 1;
                Some(Step::Retreat)
            }
            Direction::Backward => None,
            _ if self.position < BRANCH_MAX => {
                self.position += 1;
                Some(Step::Advance)
            }
            _ => None,
        }
    }

    fn invert(&mut self, step: Step) {
        match step {
            Step::Advance => self.position = self.position.saturating_sub(1),
            Step::Retreat => self.position = (self.position + 1).min(BRANCH_MAX),
        }
    }
}

/// Owner of the three counters. Nothing else writes them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VirtualRooms {
    pub shaft: Shaft,
    pub corridor: Corridor,
    pub branch: Branch,
}

impl VirtualRooms {
    /// Record a self-loop move through `room`. Moves out of the room, and
    /// moves in rooms without a counter, yield nothing.
    pub fn apply(&mut self, room: RoomId, direction: Direction) -> Option<CounterDelta> {
        let counter = CounterKind::for_room(room)?;
        let step = match counter {
            CounterKind::Shaft => self.shaft.apply(direction),
            CounterKind::Corridor => self.corridor.apply(direction),
            CounterKind::Branch => self.branch.apply(direction),
        }?;
        debug!("{:?} counter {:?} via {}", counter, step, direction);
        Some(CounterDelta { counter, step })
    }

    pub fn invert(&mut self, delta: CounterDelta) {
        debug!("{:?} counter undoing {:?}", delta.counter, delta.step);
        match delta.counter {
            CounterKind::Shaft => self.shaft.invert(delta.step),
            CounterKind::Corridor => self.corridor.invert(delta.step),
            CounterKind::Branch => self.branch.invert(delta.step),
        }
    }

    /// Reset the counter of `room` when it is entered from a neighbour that
    /// pins its value. Returns true if a reset happened.
    pub fn reset_on_entry(&mut self, room: RoomId, from: RoomId) -> bool {
        let reset = match CounterKind::for_room(room) {
            Some(CounterKind::Shaft) => match Shaft::entry_level(from) {
                Some(level) => {
                    self.shaft.level = level;
                    true
                }
                None => false,
            },
            Some(CounterKind::Corridor) => match Corridor::entry_position(from) {
                Some(position) => {
                    self.corridor.position = position;
                    true
                }
                None => false,
            },
            Some(CounterKind::Branch) => match Branch::entry_position(from) {
                Some(position) => {
                    self.branch.position = position;
                    true
                }
                None => false,
            },
            None => false,
        };
        if reset {
            debug!("{} counter reset on entry from {}", room, from);
        }
        reset
    }

    /// The mystery button: every counter jumps to a random value in range.
    pub fn scramble<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shaft.level = rng.gen_range(SHAFT_MIN..=SHAFT_MAX);
        self.branch.position = rng.gen_range(0..=BRANCH_MAX);
        self.corridor.position = rng.gen_range(0..CORRIDOR_SCRAMBLE_LIMIT);
        debug!(
            "counters scrambled: shaft {}, corridor {}, branch {}",
            self.shaft.level, self.corridor.position, self.branch.position
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shaft_reset_depends_on_neighbour() {
        let mut v = VirtualRooms::default();
        v.shaft.level = 2;
        assert!(v.reset_on_entry(RoomId::SpiralStaircase, RoomId::Pit));
        assert_eq!(v.shaft.level, SHAFT_MIN);
        assert!(v.reset_on_entry(RoomId::SpiralStaircase, RoomId::Centre));
        assert_eq!(v.shaft.level, SHAFT_MAX);
        assert!(v.reset_on_entry(RoomId::SpiralStaircase, RoomId::MainHall));
        assert_eq!(v.shaft.level, 0);
        v.shaft.level = -2;
        assert!(!v.reset_on_entry(RoomId::SpiralStaircase, RoomId::SpiralStaircase));
        assert_eq!(v.shaft.level, -2);
    }

    #[test]
    fn shaft_stops_at_its_bounds() {
        let mut s = Shaft { level: SHAFT_MAX };
        assert_eq!(s.apply(Direction::Up), None);
        assert_eq!(s.level, SHAFT_MAX);
        let mut s = Shaft { level: SHAFT_MIN };
        assert_eq!(s.apply(Direction::Down), None);
        assert_eq!(s.apply(Direction::West), None);
        assert_eq!(s.level, SHAFT_MIN);
    }

    #[test]
    fn shaft_exits_by_level() {
        let top = Shaft { level: SHAFT_MAX };
        assert!(!top.exits(true, false).contains_key(&Direction::Up));
        assert_eq!(
            top.exits(true, true).get(&Direction::Up),
            Some(&RoomId::Centre)
        );
        assert!(!top.exits(false, true).contains_key(&Direction::Up));
        let bottom = Shaft { level: SHAFT_MIN };
        let exits = bottom.exits(false, false);
        assert_eq!(exits.get(&Direction::North), Some(&RoomId::Pit));
        assert!(!exits.contains_key(&Direction::Down));
        let ground = Shaft { level: 0 }.exits(false, false);
        assert_eq!(ground.len(), 3);
        assert_eq!(ground.get(&Direction::West), Some(&RoomId::MainHall));
    }

    #[test]
    fn round_trip_restores_every_counter() {
        let mut v = VirtualRooms::default();
        let mut log = Vec::new();
        for d in [Direction::Down, Direction::Down, Direction::Up, Direction::Down] {
            log.extend(v.apply(RoomId::SpiralStaircase, d));
        }
        for _ in 0..7 {
            log.extend(v.apply(RoomId::EndlessCorridor, Direction::Forward));
        }
        log.extend(v.apply(RoomId::EndlessCorridor, Direction::Backward));
        for d in [Direction::Left, Direction::Right, Direction::Backward] {
            log.extend(v.apply(RoomId::BinaryCorridor, d));
        }
        assert_eq!(v.shaft.level, -2);
        assert_eq!(v.corridor.position, 6);
        assert_eq!(v.branch.position, 1);
        while let Some(delta) = log.pop() {
            v.invert(delta);
        }
        assert_eq!(v, VirtualRooms::default());
    }

    #[test]
    fn non_virtual_rooms_have_no_counter() {
        let mut v = VirtualRooms::default();
        assert_eq!(v.apply(RoomId::MainHall, Direction::North), None);
        assert!(!v.reset_on_entry(RoomId::Treasury, RoomId::MainHall));
    }

    #[test]
    fn corridor_exits_and_floor() {
        let mut c = Corridor::default();
        assert_eq!(c.apply(Direction::Backward), None);
        let start = c.exits();
        assert_eq!(start.get(&Direction::South), Some(&RoomId::MainHall));
        assert!(!start.contains_key(&Direction::Backward));
        c.apply(Direction::Forward);
        let mid = c.exits();
        assert_eq!(mid.get(&Direction::Backward), Some(&RoomId::EndlessCorridor));
        assert!(!mid.contains_key(&Direction::South));
    }

    #[test]
    fn branch_doors_follow_thread_code() {
        let code: ThreadCode = "100001".parse().unwrap();
        let b = Branch { position: 0 };
        let exits = b.exits(&code, RoomId::LavaPit);
        assert_eq!(exits.get(&Direction::Right), Some(&RoomId::BinaryCorridor));
        assert_eq!(exits.get(&Direction::Left), Some(&RoomId::LavaPit));
        assert_eq!(exits.get(&Direction::South), Some(&RoomId::MainHall));

        let b = Branch { position: 3 };
        let exits = b.exits(&code, RoomId::LionRoom);
        assert_eq!(exits.get(&Direction::Left), Some(&RoomId::BinaryCorridor));
        assert_eq!(exits.get(&Direction::Backward), Some(&RoomId::BinaryCorridor));

        let b = Branch { position: BRANCH_MAX };
        let exits = b.exits(&code, RoomId::LionRoom);
        assert_eq!(exits.get(&Direction::Right), Some(&RoomId::Centre));
    }

    #[test]
    fn scramble_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut v = VirtualRooms::default();
        for _ in 0..200 {
            v.scramble(&mut rng);
            assert!((SHAFT_MIN..=SHAFT_MAX).contains(&v.shaft.level));
            assert!(v.branch.position <= BRANCH_MAX);
            assert!(v.corridor.position < CORRIDOR_SCRAMBLE_LIMIT);
        }
    }
}
