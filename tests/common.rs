//! Test utilities & fixtures shared by the integration tests.

use labyrinth::config::GameConfig;
use labyrinth::labyrinth::types::Item;
use labyrinth::labyrinth::{parse_command, Session, TurnReport};

/// A session with no wandering NPCs so walks are not interrupted.
pub fn quiet_session(seed: u64) -> Session {
    let config = GameConfig {
        npc_count: 0,
        ..GameConfig::default()
    };
    Session::new(&config, seed)
}

pub fn turn(s: &mut Session, input: &str) -> TurnReport {
    s.play_turn(&parse_command(input))
}

#[allow(dead_code)]
pub fn give(s: &mut Session, items: &[Item]) {
    s.player.inventory.extend(items.iter().copied());
}
