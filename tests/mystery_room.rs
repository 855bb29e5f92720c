mod common;

use common::{give, quiet_session, turn};
use labyrinth::labyrinth::counters::{BRANCH_MAX, CORRIDOR_SCRAMBLE_LIMIT, SHAFT_MAX, SHAFT_MIN};
use labyrinth::labyrinth::types::{Direction, Item, RoomId};
use labyrinth::labyrinth::{Session, TurnError};

/// Thread in hand, riddle solved, standing in the treasury with the south door open.
fn treasury(seed: u64) -> Session {
    let mut s = quiet_session(seed);
    give(&mut s, &[Item::Thread]);
    s.current = RoomId::PuzzleRoom;
    s.flags.riddle_solved = true;
    s.graph
        .set_exit(RoomId::PuzzleRoom, Direction::West, RoomId::Treasury);
    let r = turn(&mut s, "go west");
    assert_eq!(r.exits.get(&Direction::South), Some(&RoomId::MysteryRoom));
    s
}

#[test]
fn unpressed_room_can_be_revisited_with_back() {
    let mut s = treasury(1);
    let r = turn(&mut s, "go south");
    assert_eq!(r.room, RoomId::MysteryRoom);
    assert_eq!(r.exits.get(&Direction::North), Some(&RoomId::Treasury));
    assert!(!s.flags.button_pressed);

    turn(&mut s, "go north");
    let r = turn(&mut s, "back");
    assert_eq!(r.rejected, None);
    assert_eq!(r.room, RoomId::MysteryRoom);
}

#[test]
fn pressing_the_button_scrambles_and_seals_the_way_back() {
    for seed in 0..30 {
        let mut s = treasury(seed);
        turn(&mut s, "go south");
        let r = turn(&mut s, "press");
        assert_eq!(r.rejected, None);
        assert!(s.flags.button_pressed);

        let shaft = s.counters.shaft.level;
        assert!((SHAFT_MIN..=SHAFT_MAX).contains(&shaft));
        assert!(s.counters.branch.position <= BRANCH_MAX);
        assert!(s.counters.corridor.position < CORRIDOR_SCRAMBLE_LIMIT);

        let target = r.exits[&Direction::North];
        assert_ne!(target, RoomId::MysteryRoom);

        let r = turn(&mut s, "go north");
        assert_eq!(r.room, target);
        assert!(r
            .messages
            .iter()
            .any(|m| m.contains("disappears behind you")));
        if r.status.is_terminal() {
            continue;
        }

        let r = turn(&mut s, "back");
        assert!(
            matches!(r.rejected, Some(TurnError::IllegalBackNavigation(_))),
            "seed {}: back from {} was not refused",
            seed,
            target
        );
        assert_eq!(r.room, target);
    }
}

#[test]
fn button_stays_pressed_after_leaving() {
    let mut s = treasury(3);
    turn(&mut s, "go south");
    turn(&mut s, "press");
    s.graph
        .set_exit(RoomId::MysteryRoom, Direction::North, RoomId::Treasury);
    turn(&mut s, "go north");
    assert!(s.flags.button_pressed);
    let r = turn(&mut s, "back");
    assert!(matches!(r.rejected, Some(TurnError::IllegalBackNavigation(_))));
}

#[test]
fn escaping_a_hazard_returns_into_a_pressed_mystery_room() {
    let mut escaped = 0;
    for seed in 0..40 {
        let mut s = treasury(seed);
        give(&mut s, &[Item::Harpe, Item::Aegis]);
        turn(&mut s, "go south");
        turn(&mut s, "press");
        s.graph
            .set_exit(RoomId::MysteryRoom, Direction::North, RoomId::LionRoom);
        let r = turn(&mut s, "go north");
        if r.status.is_terminal() {
            continue;
        }
        escaped += 1;
        assert_eq!(r.room, RoomId::MysteryRoom);
        assert!(s.flags.button_pressed);

        let r = turn(&mut s, "press");
        assert_eq!(r.rejected, None);
        assert!(s.flags.button_pressed);
        let target = r.exits[&Direction::North];
        let r = turn(&mut s, "go north");
        if r.status.is_terminal() || r.room != target {
            continue;
        }
        let r = turn(&mut s, "back");
        assert!(matches!(r.rejected, Some(TurnError::IllegalBackNavigation(_))));
    }
    assert!(escaped > 0);
}
