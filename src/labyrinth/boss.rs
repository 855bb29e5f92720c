//! The Minotaur at the centre of the labyrinth.
//!
//! `Unengaged -> Confronted -> Victorious`. Confronting the boss seals the
//! arena until the player either wins or dies; the outcome is read from an
//! ordered tier table keyed by the items held.

use log::info;
use serde::{Deserialize, Serialize};

use super::types::{Item, PlayerState};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BossState {
    #[default]
    Unengaged,
    Confronted,
    Victorious,
}

impl BossState {
    /// True while the arena is sealed.
    pub fn gates_actions(self) -> bool {
        self == BossState::Confronted
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    Fight,
    Run,
}

struct Tier {
    first: bool,
    second: bool,
    min_vitality: i32,
    message: &'static str,
}

// Fight tiers are keyed on (Harpe, Aegis); run tiers on (Boots, Aegis).
const FIGHT_TIERS: [Tier; 4] = [
    Tier {
        first: false,
        second: false,
        min_vitality: 9,
        message: "You successfully defeat the Minotaur in hand-to-hand combat!",
    },
    Tier {
        first: false,
        second: true,
        min_vitality: 7,
        message: "You successfully defeat the Minotaur using your shield.",
    },
    Tier {
        first: true,
        second: false,
        min_vitality: 5,
        message: "You successfully defeat the Minotaur using your legendary sword.",
    },
    Tier {
        first: true,
        second: true,
        min_vitality: 2,
        message: "You successfully defeat the Minotaur using your combat arms.",
    },
];

const RUN_TIERS: [Tier; 4] = [
    Tier {
        first: false,
        second: false,
        min_vitality: 9,
        message: "You successfully outrun the Minotaur and finish it off when it is tired.",
    },
    Tier {
        first: false,
        second: true,
        min_vitality: 7,
        message: "You successfully defeat the Minotaur by running laps around it and stunning it with your shield.",
    },
    Tier {
        first: true,
        second: false,
        min_vitality: 4,
        message: "You successfully exhaust the Minotaur by flying around with Hermes's Boots and finish him off with ease when he falls down.",
    },
    Tier {
        first: true,
        second: true,
        min_vitality: 1,
        message: "You fly around the Minotaur and bash him with your shield. The great beast stands no chance against you.",
    },
];

impl Approach {
    fn tiers(self) -> &'static [Tier; 4] {
        match self {
            Approach::Fight => &FIGHT_TIERS,
            Approach::Run => &RUN_TIERS,
        }
    }

    fn key_items(self) -> (Item, Item) {
        match self {
            Approach::Fight => (Item::Harpe, Item::Aegis),
            Approach::Run => (Item::Boots, Item::Aegis),
        }
    }

    /// Minimum vitality needed to win with the given key items.
    pub fn required_vitality(self, first: bool, second: bool) -> i32 {
        self.tiers()
            .iter()
            .find(|t| t.first == first && t.second == second)
            .map(|t| t.min_vitality)
            .unwrap_or(i32::MAX)
    }

    fn defeat_message(self) -> &'static str {
        match self {
            Approach::Fight => "You fall to the Minotaur and lose your life. Game Over!",
            Approach::Run => "The Minotaur catches up to you and fells you. Game Over!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BossOutcome {
    Victory(&'static str),
    Defeat(&'static str),
}

/// Resolve a confrontation. Pure: reads the player, decides the outcome.
pub fn resolve(approach: Approach, player: &PlayerState) -> BossOutcome {
    let (a, b) = approach.key_items();
    let (first, second) = (player.has(a), player.has(b));
    let tier = approach
        .tiers()
        .iter()
        .find(|t| t.first == first && t.second == second);
    match tier {
        Some(t) if player.vitality >= t.min_vitality => {
            info!(
                "minotaur defeated by {:?} at vitality {} (needed {})",
                approach, player.vitality, t.min_vitality
            );
            BossOutcome::Victory(t.message)
        }
        _ => {
            info!("minotaur wins against {:?} at vitality {}", approach, player.vitality);
            BossOutcome::Defeat(approach.defeat_message())
        }
    }
}

pub const CONFRONT_MESSAGE: &str = "You face off against the great Minotaur of the Labyrinth.\nThe door behind you closes.\nYou have to choose to fight the Minotaur directly or run until it gets exhausted and you can easily take it down.";

pub const VICTORY_MESSAGE: &str = "The door you came from opens up.\nA hatch also opens at the centre of the arena.\nYour mission has been accomplished and all that's left is to leave the Labyrinth.";

pub const GATE_MESSAGE: &str = "You cannot do that now. The Minotaur blocks your way.";
