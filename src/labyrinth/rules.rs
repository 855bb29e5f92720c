//! Per-room entry rules.
//!
//! [`on_enter`] runs once every time the player arrives in a room. It reads
//! the session through an [`EntryContext`] and describes what should change
//! (exits, flags, effects) without touching anything itself, so running it
//! twice on the same inputs yields the same outcome.

use super::boss::{self, BossState};
use super::counters::{VirtualRooms, BOOTS_POSITION, HARPE_LEVEL, SHAFT_MAX, SHAFT_MIN};
use super::graph::ExitChange;
use super::types::{Direction, Flags, HazardKind, Item, PlayerState, RoomId, RoomKind, ThreadCode};

/// How the player arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Walked through an exit with `go`.
    Forward,
    /// Retraced a step with `back`.
    Back,
    /// Carried by the wizard.
    Teleport,
}

pub struct EntryContext<'a> {
    pub room: RoomId,
    pub from: RoomId,
    pub mode: EntryMode,
    pub player: &'a PlayerState,
    pub flags: Flags,
    pub counters: &'a VirtualRooms,
    pub boss: BossState,
    pub code: &'a ThreadCode,
    /// Where a wrong branch door leads on this entry.
    pub hazard: HazardKind,
}

impl EntryContext<'_> {
    fn has(&self, item: Item) -> bool {
        self.player.has(item)
    }

    fn walked_in(&self) -> bool {
        self.mode == EntryMode::Forward
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEffect {
    /// Left the labyrinth after slaying the Minotaur.
    VictoryExit,
    /// Entered a lion or lava room.
    Hazard(HazardKind),
    /// Walked into the arena while the Minotaur still lives.
    ConfrontBoss,
    /// Stuck at the bottom of the pit with no way out.
    Trapped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryOutcome {
    pub messages: Vec<String>,
    pub exit_changes: Vec<ExitChange>,
    pub riddle_solved: Option<bool>,
    pub button_pressed: Option<bool>,
    pub effect: Option<EntryEffect>,
    pub spawn_artefact: bool,
}

impl EntryOutcome {
    fn say(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    fn set(&mut self, room: RoomId, direction: Direction, dest: RoomId) {
        self.exit_changes.push(ExitChange::Set {
            room,
            direction,
            dest,
        });
    }

    fn remove(&mut self, room: RoomId, direction: Direction) {
        self.exit_changes
            .push(ExitChange::Remove { room, direction });
    }

    /// Clear the riddle and close the door it opened.
    fn reset_riddle(&mut self) {
        self.riddle_solved = Some(false);
        self.remove(RoomId::PuzzleRoom, Direction::West);
    }
}

pub fn on_enter(ctx: &EntryContext) -> EntryOutcome {
    let mut out = EntryOutcome::default();
    match ctx.room.kind() {
        RoomKind::Entrance => entrance(ctx, &mut out),
        RoomKind::Hub => main_hall(ctx, &mut out),
        RoomKind::Corridor => endless_corridor(ctx, &mut out),
        RoomKind::Puzzle => puzzle_room(ctx, &mut out),
        RoomKind::Vault => treasury(ctx, &mut out),
        RoomKind::Shaft => spiral_staircase(ctx, &mut out),
        RoomKind::Pit => pit(ctx, &mut out),
        RoomKind::Passage => secret_corridor(ctx, &mut out),
        RoomKind::BossArena => centre(ctx, &mut out),
        RoomKind::Branch => binary_corridor(ctx, &mut out),
        RoomKind::Hazard(kind) => out.effect = Some(EntryEffect::Hazard(kind)),
        RoomKind::Mystery => mystery_room(ctx, &mut out),
    }
    out.spawn_artefact = out.spawn_artefact && ctx.room.kind().spawns_artefacts();
    out
}

fn entrance(ctx: &EntryContext, out: &mut EntryOutcome) {
    if !ctx.flags.victory {
        return;
    }
    out.say("Congratulations on winning the game!");
    out.say("You exit the Labyrinth with the following artefacts and equipment:");
    for item in &ctx.player.inventory {
        out.say(item.name());
    }
    for artefact in &ctx.player.backpack {
        out.say(artefact.name.clone());
    }
    out.effect = Some(EntryEffect::VictoryExit);
}

fn main_hall(ctx: &EntryContext, out: &mut EntryOutcome) {
    if ctx.has(Item::Thread) {
        out.say("The hallway before you doesn't look endless anymore. Instead there's a door at its end.");
        out.set(RoomId::MainHall, Direction::North, RoomId::BinaryCorridor);
    } else {
        out.say("It appears endless but has 2 doors to the east and west.");
    }
    if ctx.from == RoomId::PuzzleRoom && !ctx.has(Item::Thread) {
        out.say("You hear the room behind you change.");
        out.reset_riddle();
    } else if ctx.from == RoomId::SecretCorridor && ctx.walked_in() {
        out.say("You had fallen through a hole in the ceiling.");
        if ctx.has(Item::Boots) {
            out.say("You can use Hermes's Boots to fly back up through it.");
            out.set(RoomId::MainHall, Direction::Up, RoomId::SecretCorridor);
        } else {
            out.say("It is too high to reach. You cannot currently go back to the secret corridor through there.");
        }
    }
    out.spawn_artefact = ctx.walked_in();
}

fn endless_corridor(ctx: &EntryContext, out: &mut EntryOutcome) {
    out.say("The hallway seems endless.");
    out.exit_changes.push(ExitChange::Replace {
        room: RoomId::EndlessCorridor,
        exits: ctx.counters.corridor.exits(),
    });
    if ctx.counters.corridor.position == BOOTS_POSITION && !ctx.has(Item::Boots) {
        out.say("You find Hermes's Boots in front of you.");
    }
}

fn puzzle_room(ctx: &EntryContext, out: &mut EntryOutcome) {
    if ctx.has(Item::Thread) {
        out.say("The door at the other end of the room seems open.");
        return;
    }
    if ctx.walked_in() {
        out.say("The puzzle prompt reads: What only gets larger the more you take away from it?");
        if ctx.from == RoomId::Treasury {
            out.say("You see the puzzle room rearrange itself before your eyes into its original form. The door you came through has disappeared.");
            out.reset_riddle();
        }
    }
    out.spawn_artefact = ctx.walked_in();
}

fn treasury(ctx: &EntryContext, out: &mut EntryOutcome) {
    if !ctx.walked_in() {
        return;
    }
    if !ctx.has(Item::Thread) {
        out.say("You find yourself looking at Ariadna's Thread.");
        return;
    }
    out.say("The treasury seems to be empty.");
    if ctx.from == RoomId::PuzzleRoom {
        out.say("Upon reentering the treasury with Ariadna's Thread in hand you find that a door has appeared to the south.");
        out.set(RoomId::Treasury, Direction::South, RoomId::MysteryRoom);
    }
}

fn spiral_staircase(ctx: &EntryContext, out: &mut EntryOutcome) {
    let shaft = ctx.counters.shaft;
    let thread = ctx.has(Item::Thread);
    out.exit_changes.push(ExitChange::Replace {
        room: RoomId::SpiralStaircase,
        exits: shaft.exits(thread, ctx.flags.victory),
    });
    if shaft.level == HARPE_LEVEL && !ctx.has(Item::Harpe) {
        out.say("You see The Harpe, Perseus's weapon, in front of you.");
    } else if shaft.level >= SHAFT_MAX && thread {
        out.say("You feel Ariadna's Thread vibrating. It outlines a hatch on the ceiling of the room.");
        if ctx.flags.victory {
            out.say("It leads to the centre of the Labyrinth.");
        } else {
            out.say("It is locked.");
        }
    } else if shaft.level <= SHAFT_MIN {
        out.say("You find yourself in front of a pit to the north of you. Jump down?");
    }
}

fn pit(ctx: &EntryContext, out: &mut EntryOutcome) {
    let thread = ctx.has(Item::Thread);
    let boots = ctx.has(Item::Boots);
    if !thread && !boots {
        out.say("You have no escape from the pit you jumped into.");
        out.say("You slowly feel your energy run out.");
        out.effect = Some(EntryEffect::Trapped);
        return;
    }
    if !ctx.walked_in() {
        return;
    }
    if thread {
        out.say("You feel Ariadna's Thread getting out of your bag and outlining a door.");
        out.say("The labyrinth shifts and reveals the pathway to the north.");
        out.set(RoomId::Pit, Direction::North, RoomId::SecretCorridor);
    }
    if boots {
        out.say("You can use Hermes's Boots to fly back up the pit.");
        out.set(RoomId::Pit, Direction::Up, RoomId::SpiralStaircase);
    }
    out.spawn_artefact = true;
}

fn secret_corridor(ctx: &EntryContext, out: &mut EntryOutcome) {
    if !ctx.has(Item::Aegis) {
        out.say("Before you lays Zeus's Aegis.");
    }
    out.spawn_artefact = ctx.walked_in();
}

fn centre(ctx: &EntryContext, out: &mut EntryOutcome) {
    if ctx.boss == BossState::Unengaged {
        for line in boss::CONFRONT_MESSAGE.lines() {
            out.say(line);
        }
        out.effect = Some(EntryEffect::ConfrontBoss);
    }
}

fn binary_corridor(ctx: &EntryContext, out: &mut EntryOutcome) {
    if ctx.mode == EntryMode::Teleport {
        return;
    }
    out.exit_changes.push(ExitChange::Replace {
        room: RoomId::BinaryCorridor,
        exits: ctx.counters.branch.exits(ctx.code, ctx.hazard.room()),
    });
}

fn mystery_room(ctx: &EntryContext, out: &mut EntryOutcome) {
    if ctx.walked_in() && ctx.from == RoomId::Treasury {
        out.set(RoomId::MysteryRoom, Direction::North, RoomId::Treasury);
        out.button_pressed = Some(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labyrinth::graph::Exits;

    struct Fixture {
        player: PlayerState,
        flags: Flags,
        counters: VirtualRooms,
        boss: BossState,
        code: ThreadCode,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                player: PlayerState::default(),
                flags: Flags::default(),
                counters: VirtualRooms::default(),
                boss: BossState::Unengaged,
                code: "000000".parse().unwrap(),
            }
        }

        fn enter(&self, room: RoomId, from: RoomId, mode: EntryMode) -> EntryOutcome {
            on_enter(&EntryContext {
                room,
                from,
                mode,
                player: &self.player,
                flags: self.flags,
                counters: &self.counters,
                boss: self.boss,
                code: &self.code,
                hazard: HazardKind::Lions,
            })
        }
    }

    fn replaced(out: &EntryOutcome, room: RoomId) -> Option<&Exits> {
        out.exit_changes.iter().find_map(|c| match c {
            ExitChange::Replace { room: r, exits } if *r == room => Some(exits),
            _ => None,
        })
    }

    #[test]
    fn rules_are_idempotent() {
        let mut fx = Fixture::new();
        fx.player.inventory.insert(Item::Thread);
        for room in RoomId::ALL {
            let a = fx.enter(room, RoomId::MainHall, EntryMode::Forward);
            let b = fx.enter(room, RoomId::MainHall, EntryMode::Forward);
            assert_eq!(a, b, "{} differs between runs", room);
        }
    }

    #[test]
    fn hall_with_thread_opens_the_binary_corridor() {
        let mut fx = Fixture::new();
        let out = fx.enter(RoomId::MainHall, RoomId::Entrance, EntryMode::Forward);
        assert!(out.exit_changes.is_empty());
        assert!(out.spawn_artefact);
        fx.player.inventory.insert(Item::Thread);
        let out = fx.enter(RoomId::MainHall, RoomId::Entrance, EntryMode::Forward);
        assert!(out.exit_changes.contains(&ExitChange::Set {
            room: RoomId::MainHall,
            direction: Direction::North,
            dest: RoomId::BinaryCorridor,
        }));
    }

    #[test]
    fn leaving_puzzle_without_thread_resets_riddle() {
        let fx = Fixture::new();
        let out = fx.enter(RoomId::MainHall, RoomId::PuzzleRoom, EntryMode::Back);
        assert_eq!(out.riddle_solved, Some(false));
        assert!(out.exit_changes.contains(&ExitChange::Remove {
            room: RoomId::PuzzleRoom,
            direction: Direction::West,
        }));
        assert!(!out.spawn_artefact);
    }

    #[test]
    fn pit_without_escape_traps() {
        let mut fx = Fixture::new();
        let out = fx.enter(RoomId::Pit, RoomId::SpiralStaircase, EntryMode::Forward);
        assert_eq!(out.effect, Some(EntryEffect::Trapped));
        fx.player.inventory.insert(Item::Boots);
        let out = fx.enter(RoomId::Pit, RoomId::SpiralStaircase, EntryMode::Forward);
        assert_eq!(out.effect, None);
        assert!(out.exit_changes.contains(&ExitChange::Set {
            room: RoomId::Pit,
            direction: Direction::Up,
            dest: RoomId::SpiralStaircase,
        }));
    }

    #[test]
    fn staircase_messages_by_level() {
        let mut fx = Fixture::new();
        fx.counters.shaft.level = HARPE_LEVEL;
        let out = fx.enter(RoomId::SpiralStaircase, RoomId::SpiralStaircase, EntryMode::Forward);
        assert!(out.messages.iter().any(|m| m.contains("The Harpe")));
        fx.counters.shaft.level = SHAFT_MAX;
        fx.player.inventory.insert(Item::Thread);
        let out = fx.enter(RoomId::SpiralStaircase, RoomId::SpiralStaircase, EntryMode::Forward);
        assert!(out.messages.iter().any(|m| m == "It is locked."));
        let exits = replaced(&out, RoomId::SpiralStaircase).unwrap();
        assert!(!exits.contains_key(&Direction::Up));
    }

    #[test]
    fn centre_confronts_only_once() {
        let mut fx = Fixture::new();
        let out = fx.enter(RoomId::Centre, RoomId::BinaryCorridor, EntryMode::Forward);
        assert_eq!(out.effect, Some(EntryEffect::ConfrontBoss));
        fx.boss = BossState::Victorious;
        let out = fx.enter(RoomId::Centre, RoomId::SpiralStaircase, EntryMode::Forward);
        assert_eq!(out.effect, None);
    }

    #[test]
    fn branch_exits_use_the_drawn_hazard() {
        let mut fx = Fixture::new();
        fx.counters.branch.position = 2;
        let out = fx.enter(RoomId::BinaryCorridor, RoomId::BinaryCorridor, EntryMode::Forward);
        let exits = replaced(&out, RoomId::BinaryCorridor).unwrap();
        assert_eq!(exits.get(&Direction::Right), Some(&RoomId::LionRoom));
        assert_eq!(exits.get(&Direction::Left), Some(&RoomId::BinaryCorridor));
    }

    #[test]
    fn entrance_after_victory_ends_the_game() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.enter(RoomId::Entrance, RoomId::MainHall, EntryMode::Forward).effect,
            None
        );
        fx.flags.victory = true;
        fx.player.inventory.insert(Item::Harpe);
        let out = fx.enter(RoomId::Entrance, RoomId::MainHall, EntryMode::Forward);
        assert_eq!(out.effect, Some(EntryEffect::VictoryExit));
        assert!(out.messages.iter().any(|m| m == "The Harpe"));
    }

    #[test]
    fn treasury_reveals_the_mystery_door() {
        let mut fx = Fixture::new();
        fx.player.inventory.insert(Item::Thread);
        let out = fx.enter(RoomId::Treasury, RoomId::PuzzleRoom, EntryMode::Forward);
        assert!(out.exit_changes.contains(&ExitChange::Set {
            room: RoomId::Treasury,
            direction: Direction::South,
            dest: RoomId::MysteryRoom,
        }));
        let out = fx.enter(RoomId::Treasury, RoomId::MysteryRoom, EntryMode::Back);
        assert!(out.exit_changes.is_empty());
    }

    #[test]
    fn corridor_reveals_the_boots_at_their_position() {
        let mut fx = Fixture::new();
        fx.counters.corridor.position = BOOTS_POSITION - 1;
        let out = fx.enter(RoomId::EndlessCorridor, RoomId::EndlessCorridor, EntryMode::Forward);
        assert!(!out.messages.iter().any(|m| m.contains("Hermes's Boots")));

        fx.counters.corridor.position = BOOTS_POSITION;
        let out = fx.enter(RoomId::EndlessCorridor, RoomId::EndlessCorridor, EntryMode::Forward);
        assert!(out.messages.iter().any(|m| m.contains("Hermes's Boots")));

        fx.player.inventory.insert(Item::Boots);
        let out = fx.enter(RoomId::EndlessCorridor, RoomId::EndlessCorridor, EntryMode::Forward);
        assert!(!out.messages.iter().any(|m| m.contains("Hermes's Boots")));
    }

    #[test]
    fn puzzle_room_rearranges_behind_a_threadless_player() {
        let mut fx = Fixture::new();
        let out = fx.enter(RoomId::PuzzleRoom, RoomId::Treasury, EntryMode::Forward);
        assert_eq!(out.riddle_solved, Some(false));
        assert!(out.exit_changes.contains(&ExitChange::Remove {
            room: RoomId::PuzzleRoom,
            direction: Direction::West,
        }));

        let out = fx.enter(RoomId::PuzzleRoom, RoomId::MainHall, EntryMode::Forward);
        assert_eq!(out.riddle_solved, None);
        assert!(out.exit_changes.is_empty());

        fx.player.inventory.insert(Item::Thread);
        let out = fx.enter(RoomId::PuzzleRoom, RoomId::Treasury, EntryMode::Forward);
        assert_eq!(out.riddle_solved, None);
        assert!(out.exit_changes.is_empty());
    }

    #[test]
    fn hall_opens_the_hatch_for_boots() {
        let mut fx = Fixture::new();
        let hatch = ExitChange::Set {
            room: RoomId::MainHall,
            direction: Direction::Up,
            dest: RoomId::SecretCorridor,
        };
        let out = fx.enter(RoomId::MainHall, RoomId::SecretCorridor, EntryMode::Forward);
        assert!(!out.exit_changes.contains(&hatch));
        assert!(out.messages.iter().any(|m| m.contains("too high")));

        fx.player.inventory.insert(Item::Boots);
        let out = fx.enter(RoomId::MainHall, RoomId::SecretCorridor, EntryMode::Forward);
        assert!(out.exit_changes.contains(&hatch));
        let out = fx.enter(RoomId::MainHall, RoomId::SecretCorridor, EntryMode::Back);
        assert!(!out.exit_changes.contains(&hatch));
    }
}
