//! Wandering NPCs and the hazard rooms.
//!
//! NPCs are shuffled into the candidate rooms after every move. Talking to,
//! fighting or fleeing from one is a pure function of the NPC kind, the
//! action and the items held; only the hazard rooms roll dice.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::graph::RoomGraph;
use super::types::{HazardKind, Item, PlayerState, RoomId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NpcKind {
    Monster,
    Fairy,
    Wizard,
}

impl NpcKind {
    pub fn name(self) -> &'static str {
        match self {
            NpcKind::Monster => "Monster",
            NpcKind::Fairy => "Fairy",
            NpcKind::Wizard => "Wizard",
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            NpcKind::Monster => "I wanna kill ya! Wanna fight?",
            NpcKind::Fairy => "I want to heal you! Do you accept my gift?",
            NpcKind::Wizard => "I wanna teleport ya! Do you accept?",
        }
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => NpcKind::Monster,
            1 => NpcKind::Fairy,
            _ => NpcKind::Wizard,
        }
    }
}

impl fmt::Display for NpcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NpcKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monster" => Ok(NpcKind::Monster),
            "fairy" => Ok(NpcKind::Fairy),
            "wizard" => Ok(NpcKind::Wizard),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Npc {
    pub kind: NpcKind,
    /// Room this NPC was placed in last round; never read as ownership.
    pub last_room: Option<RoomId>,
}

pub fn generate_roster<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Npc> {
    (0..count)
        .map(|_| Npc {
            kind: NpcKind::random(rng),
            last_room: None,
        })
        .collect()
}

/// Redistribute the roster. Each NPC avoids the room it was in last round
/// and rooms already taken this round; if nothing is left it sits out.
pub fn place_npcs<R: Rng + ?Sized>(graph: &mut RoomGraph, roster: &mut [Npc], rng: &mut R) {
    graph.clear_npcs();
    let mut taken: Vec<RoomId> = Vec::new();
    for (idx, npc) in roster.iter_mut().enumerate() {
        let free: Vec<RoomId> = RoomId::NPC_ROOMS
            .iter()
            .copied()
            .filter(|r| !taken.contains(r))
            .collect();
        let fresh: Vec<RoomId> = free
            .iter()
            .copied()
            .filter(|r| Some(*r) != npc.last_room)
            .collect();
        let pick = match fresh.choose(rng) {
            Some(room) => Some(*room),
            None => free.choose(rng).copied(),
        };
        match pick {
            Some(room) => {
                taken.push(room);
                graph.room_mut(room).npc = Some(idx);
                npc.last_room = Some(room);
                debug!("npc {} ({}) placed in {}", idx, npc.kind, room);
            }
            None => {
                npc.last_room = None;
                debug!("npc {} ({}) has no free room this round", idx, npc.kind);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Answer(Reply),
    Fight,
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Yes,
    No,
    Other,
}

impl Reply {
    pub fn from_word(word: &str) -> Self {
        match word.trim().to_lowercase().as_str() {
            "yes" | "y" => Reply::Yes,
            "no" | "n" => Reply::No,
            _ => Reply::Other,
        }
    }
}

/// Narrative tag for an encounter outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Rewarded,
    Wounded,
    Departed,
    Teleported,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub vitality_delta: i32,
    pub removes_npc: bool,
    pub message: &'static str,
    /// Set when the player is whisked to the entrance.
    pub teleport: bool,
    pub gift: Option<Item>,
}

impl Resolution {
    fn new(outcome: Outcome, vitality_delta: i32, message: &'static str) -> Self {
        Resolution {
            outcome,
            vitality_delta,
            removes_npc: outcome != Outcome::Unresolved,
            message,
            teleport: false,
            gift: None,
        }
    }
}

pub fn resolve(kind: NpcKind, action: Action, player: &PlayerState) -> Resolution {
    let harpe = player.has(Item::Harpe);
    let aegis = player.has(Item::Aegis);
    let boots = player.has(Item::Boots);
    match (kind, action) {
        (NpcKind::Monster, Action::Answer(Reply::No)) if harpe => Resolution::new(
            Outcome::Rewarded,
            1,
            "The monster gets intimidated and leaves. You gain 1 vitality.",
        ),
        (NpcKind::Monster, Action::Answer(Reply::No)) => Resolution::new(
            Outcome::Wounded,
            -2,
            "The monster doesn't care about your answer, attacks you, then leaves. You lose 2 vitality.",
        ),
        (NpcKind::Monster, Action::Answer(Reply::Yes)) if harpe || aegis => Resolution::new(
            Outcome::Rewarded,
            1,
            "You fight the monster. You kill the monster and gain 1 vitality.",
        ),
        (NpcKind::Monster, Action::Answer(Reply::Yes)) => Resolution::new(
            Outcome::Wounded,
            -3,
            "You fight the monster. You lose the fight but play dead. The monster is tricked and leaves. You lose 3 vitality.",
        ),
        (NpcKind::Monster, Action::Answer(Reply::Other)) => Resolution::new(
            Outcome::Unresolved,
            0,
            "Answer the monster. It's a simple yes or no question.",
        ),
        (NpcKind::Monster, Action::Fight) if boots || harpe || aegis => Resolution::new(
            Outcome::Rewarded,
            1,
            "You surprise the monster by engaging in combat instead of answering. You defeat it and gain 1 vitality.",
        ),
        (NpcKind::Monster, Action::Fight) => Resolution::new(
            Outcome::Wounded,
            -1,
            "You are not well prepared. The monster blocks your attack and strikes back. A boulder comes flying out of nowhere and kills it. (Lose 1 vitality)",
        ),
        (NpcKind::Monster, Action::Run) if boots => Resolution::new(
            Outcome::Rewarded,
            1,
            "You start running around. The monster cannot catch up to you. It trips, falls and breaks its neck. (Gain 1 vitality)",
        ),
        (NpcKind::Monster, Action::Run) => Resolution::new(
            Outcome::Wounded,
            -2,
            "The monster catches you and strikes. You lose 2 vitality, then play dead until it leaves.",
        ),
        (NpcKind::Fairy, Action::Answer(Reply::Yes)) => Resolution::new(
            Outcome::Rewarded,
            1,
            "The fairy gives you some Ambrosia. You eat it and instantly feel healthier. (Gain 1 vitality) Joyful, the fairy leaves.",
        ),
        (NpcKind::Fairy, Action::Answer(Reply::No)) => Resolution::new(
            Outcome::Departed,
            0,
            "The fairy seems sad. Flying slowly away, it leaves the room.",
        ),
        (NpcKind::Fairy, Action::Answer(Reply::Other)) => Resolution::new(
            Outcome::Unresolved,
            0,
            "Answer the fairy... it's a simple yes or no question.",
        ),
        (NpcKind::Fairy, Action::Fight) => Resolution::new(
            Outcome::Departed,
            0,
            "You lunge at the fairy. It dodges and disappears instantly.",
        ),
        (NpcKind::Wizard, Action::Answer(Reply::Yes)) => Resolution {
            teleport: true,
            gift: Some(Item::Amulet),
            ..Resolution::new(
                Outcome::Teleported,
                0,
                "The wizard teleports you to the entrance of the Maze and gives you an amulet.",
            )
        },
        (NpcKind::Wizard, Action::Answer(Reply::No)) => Resolution::new(
            Outcome::Departed,
            0,
            "The wizard curses at you and teleports himself out of the room.",
        ),
        (NpcKind::Wizard, Action::Answer(Reply::Other)) => Resolution::new(
            Outcome::Unresolved,
            0,
            "Answer the wizard. It's a simple yes or no question.",
        ),
        (NpcKind::Wizard, Action::Fight) => Resolution::new(
            Outcome::Wounded,
            -1,
            "You attack the wizard. He dodges, strikes you with his staff, and teleports away. (Lose 1 vitality)",
        ),
        (NpcKind::Fairy | NpcKind::Wizard, Action::Run) => Resolution::new(
            Outcome::Unresolved,
            0,
            "Why are you running around? Nothing here is chasing you.",
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HazardOutcome {
    Escape(&'static str),
    Death(&'static str),
}

pub fn can_escape(kind: HazardKind, player: &PlayerState) -> bool {
    match kind {
        HazardKind::Lions => player.has(Item::Harpe) && player.has(Item::Aegis),
        HazardKind::Lava => player.has(Item::Boots),
    }
}

/// With the right gear the escape is a fair coin; without it, certain death.
pub fn resolve_hazard<R: Rng + ?Sized>(
    kind: HazardKind,
    player: &PlayerState,
    rng: &mut R,
) -> HazardOutcome {
    let escapable = can_escape(kind, player);
    let escaped = escapable && rng.gen_bool(0.5);
    debug!("hazard {:?}: escapable {}, escaped {}", kind, escapable, escaped);
    match (kind, escapable, escaped) {
        (HazardKind::Lions, true, true) => HazardOutcome::Escape(
            "You pull out the Harpe and the Aegis and kill the lions. The door opens up behind you and you leave.",
        ),
        (HazardKind::Lions, true, false) => {
            HazardOutcome::Death("You don't react in time and get eaten by the lions. Game Over!")
        }
        (HazardKind::Lions, false, _) => {
            HazardOutcome::Death("You cannot fight off the lions. Game Over!")
        }
        (HazardKind::Lava, true, true) => HazardOutcome::Escape(
            "You fly away with Hermes's Boots before falling in the pit. You leave the room.",
        ),
        (HazardKind::Lava, _, _) => HazardOutcome::Death(
            "You don't react in time and fall into the pit of lava. Game Over!",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player(items: &[Item]) -> PlayerState {
        let mut p = PlayerState::default();
        p.inventory.extend(items.iter().copied());
        p
    }

    #[test]
    fn monster_answers() {
        let r = resolve(NpcKind::Monster, Action::Answer(Reply::No), &player(&[]));
        assert_eq!((r.vitality_delta, r.removes_npc), (-2, true));
        let r = resolve(
            NpcKind::Monster,
            Action::Answer(Reply::No),
            &player(&[Item::Harpe]),
        );
        assert_eq!(r.vitality_delta, 1);
        let r = resolve(
            NpcKind::Monster,
            Action::Answer(Reply::Yes),
            &player(&[Item::Aegis]),
        );
        assert_eq!(r.vitality_delta, 1);
        let r = resolve(NpcKind::Monster, Action::Answer(Reply::Yes), &player(&[]));
        assert_eq!(r.vitality_delta, -3);
        let r = resolve(NpcKind::Monster, Action::Answer(Reply::Other), &player(&[]));
        assert!(!r.removes_npc);
        assert_eq!(r.outcome, Outcome::Unresolved);
    }

    #[test]
    fn monster_fight_and_flight() {
        assert_eq!(
            resolve(NpcKind::Monster, Action::Fight, &player(&[Item::Boots])).vitality_delta,
            1
        );
        assert_eq!(
            resolve(NpcKind::Monster, Action::Fight, &player(&[])).vitality_delta,
            -1
        );
        assert_eq!(
            resolve(NpcKind::Monster, Action::Run, &player(&[Item::Harpe])).vitality_delta,
            -2
        );
        assert_eq!(
            resolve(NpcKind::Monster, Action::Run, &player(&[Item::Boots])).vitality_delta,
            1
        );
    }

    #[test]
    fn wizard_yes_teleports_with_a_gift() {
        let r = resolve(NpcKind::Wizard, Action::Answer(Reply::Yes), &player(&[]));
        assert!(r.teleport);
        assert_eq!(r.gift, Some(Item::Amulet));
        assert!(r.removes_npc);
        let r = resolve(NpcKind::Wizard, Action::Fight, &player(&[]));
        assert_eq!(r.vitality_delta, -1);
    }

    #[test]
    fn fairy_is_harmless() {
        let r = resolve(NpcKind::Fairy, Action::Answer(Reply::Yes), &player(&[]));
        assert_eq!(r.vitality_delta, 1);
        let r = resolve(NpcKind::Fairy, Action::Fight, &player(&[]));
        assert_eq!((r.vitality_delta, r.outcome), (0, Outcome::Departed));
        let r = resolve(NpcKind::Fairy, Action::Run, &player(&[]));
        assert!(!r.removes_npc);
    }

    #[test]
    fn hazards_without_gear_always_kill() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(matches!(
                resolve_hazard(HazardKind::Lions, &player(&[Item::Harpe]), &mut rng),
                HazardOutcome::Death(_)
            ));
            assert!(matches!(
                resolve_hazard(HazardKind::Lava, &player(&[Item::Aegis]), &mut rng),
                HazardOutcome::Death(_)
            ));
        }
    }

    #[test]
    fn hazards_with_gear_sometimes_let_you_go() {
        let mut rng = StdRng::seed_from_u64(5);
        let gear = player(&[Item::Harpe, Item::Aegis, Item::Boots]);
        let escapes = (0..200)
            .filter(|_| {
                matches!(
                    resolve_hazard(HazardKind::Lions, &gear, &mut rng),
                    HazardOutcome::Escape(_)
                )
            })
            .count();
        assert!(escapes > 0 && escapes < 200);
    }

    #[test]
    fn placement_avoids_last_room_and_doubling_up() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut graph = RoomGraph::new();
        let mut roster = generate_roster(5, &mut rng);
        for _ in 0..50 {
            let before: Vec<Option<RoomId>> = roster.iter().map(|n| n.last_room).collect();
            place_npcs(&mut graph, &mut roster, &mut rng);
            let occupied = graph.rooms().filter(|r| r.npc.is_some()).count();
            assert_eq!(occupied, 5);
            for (npc, prev) in roster.iter().zip(before) {
                let room = npc.last_room.expect("placed");
                assert!(RoomId::NPC_ROOMS.contains(&room));
                assert_ne!(Some(room), prev);
            }
        }
    }

    #[test]
    fn oversized_roster_leaves_some_out() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut graph = RoomGraph::new();
        let mut roster = generate_roster(9, &mut rng);
        place_npcs(&mut graph, &mut roster, &mut rng);
        let placed = roster.iter().filter(|n| n.last_room.is_some()).count();
        assert_eq!(placed, RoomId::NPC_ROOMS.len());
    }
}
