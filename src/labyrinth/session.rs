//! The turn controller.
//!
//! A [`Session`] owns everything that changes during a game: the room graph,
//! the virtual-room counters, the back-navigation history, the player, the
//! NPC roster and the seeded RNG. [`Session::play_turn`] resolves one
//! command completely and returns a [`TurnReport`].
//!
//! Every field except the RNG is public so tests can build any position
//! directly instead of replaying a long walk.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::artefact::{Artefact, ArtefactPool};
use super::boss::{self, Approach, BossOutcome, BossState};
use super::commands::{help_text, Command};
use super::counters::{VirtualRooms, BOOTS_POSITION, HARPE_LEVEL};
use super::encounter::{self, Action, HazardOutcome, Npc, NpcKind, Reply, Resolution};
use super::errors::TurnError;
use super::graph::{Exits, RoomGraph};
use super::history::History;
use super::rules::{self, EntryContext, EntryEffect, EntryMode};
use super::types::{Direction, Flags, HazardKind, Item, PlayerState, RoomId, ThreadCode};
use crate::config::GameConfig;

pub const RIDDLE_ANSWER: &str = "hole";
/// Wrong riddle answers before the hint is shown.
pub const RIDDLE_HINT_AFTER: u32 = 3;

const MONSTER_BLOCKS: &str = "The Monster blocks you from just calmly leaving the room!";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Vitality ran out: exhaustion, wounds or the pit.
    VitalityLoss,
    /// Killed outright by the Minotaur, the lions or the lava.
    Encounter,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "cause", rename_all = "snake_case")]
pub enum TurnStatus {
    Continue,
    VictoryExit,
    Death(DeathCause),
    Quit,
}

impl TurnStatus {
    pub fn is_terminal(self) -> bool {
        self != TurnStatus::Continue
    }
}

/// What the player sees after a turn.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TurnReport {
    pub messages: Vec<String>,
    pub rejected: Option<TurnError>,
    pub status: TurnStatus,
    pub room: RoomId,
    pub exits: Exits,
    pub encounter: Option<NpcKind>,
    pub artefacts: Vec<Artefact>,
    /// Never below zero, even on the turn the player dies.
    pub vitality: i32,
    pub capacity: u32,
    pub steps: u32,
}

pub struct Session {
    pub graph: RoomGraph,
    pub counters: VirtualRooms,
    pub history: History,
    pub player: PlayerState,
    pub flags: Flags,
    pub boss: BossState,
    pub npcs: Vec<Npc>,
    pub artefacts: ArtefactPool,
    pub code: ThreadCode,
    pub current: RoomId,
    pub riddle_attempts: u32,
    pub boots_exhaustion_interval: u32,
    pub status: TurnStatus,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let code = ThreadCode::random(&mut rng);
        let mut npcs = encounter::generate_roster(config.npc_count, &mut rng);
        let mut graph = RoomGraph::new();
        encounter::place_npcs(&mut graph, &mut npcs, &mut rng);
        info!(
            "new labyrinth: seed {}, {} npcs, thread code {}",
            seed,
            npcs.len(),
            code
        );
        Session {
            graph,
            counters: VirtualRooms::default(),
            history: History::default(),
            player: PlayerState::new(
                config.starting_vitality,
                config.carry_capacity,
                config.exhaustion_interval,
            ),
            flags: Flags::default(),
            boss: BossState::Unengaged,
            npcs,
            artefacts: ArtefactPool::default(),
            code,
            current: RoomId::Entrance,
            riddle_attempts: 0,
            boots_exhaustion_interval: config.boots_exhaustion_interval.max(1),
            status: TurnStatus::Continue,
            rng,
        }
    }

    /// Opening screen: welcome text plus the entrance.
    pub fn intro(&self) -> TurnReport {
        let messages = vec![
            "Welcome to the Labyrinth of Daedalus!".to_string(),
            "Type 'help' if you need help.".to_string(),
            format!("You are {}", self.current.description()),
        ];
        self.report(messages, None)
    }

    pub fn npc_here(&self) -> Option<NpcKind> {
        if self.current == RoomId::Centre {
            return None;
        }
        self.graph
            .npc_in(self.current)
            .and_then(|idx| self.npcs.get(idx))
            .map(|npc| npc.kind)
    }

    pub fn play_turn(&mut self, cmd: &Command) -> TurnReport {
        if self.status.is_terminal() {
            return self.report(
                Vec::new(),
                Some(TurnError::NoEffect("The game is over.".to_string())),
            );
        }
        let mut msgs = Vec::new();
        let rejected = self.dispatch(cmd, &mut msgs).err();
        if let Some(err) = &rejected {
            debug!("command {:?} rejected: {}", cmd, err);
        }
        if !self.status.is_terminal() && self.player.is_dead() {
            msgs.push(
                "You run out of strength in the labyrinth and lose your life to exhaustion."
                    .to_string(),
            );
            self.status = TurnStatus::Death(DeathCause::VitalityLoss);
        }
        if self.status.is_terminal() {
            info!(
                "game over: {:?} in {} after {} steps",
                self.status, self.current, self.player.steps
            );
        }
        self.report(msgs, rejected)
    }

    fn report(&self, messages: Vec<String>, rejected: Option<TurnError>) -> TurnReport {
        TurnReport {
            messages,
            rejected,
            status: self.status,
            room: self.current,
            exits: self.graph.exits(self.current).clone(),
            encounter: self.npc_here(),
            artefacts: self.graph.room(self.current).artefacts.clone(),
            vitality: self.player.vitality.max(0),
            capacity: self.player.capacity,
            steps: self.player.steps,
        }
    }

    fn dispatch(&mut self, cmd: &Command, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        if let Command::Unknown(word) = cmd {
            return Err(TurnError::UnknownCommand(word.clone()));
        }
        if self.current == RoomId::Centre && self.boss.gates_actions() && !cmd.allowed_in_arena() {
            let msg = boss::GATE_MESSAGE.to_string();
            return Err(if *cmd == Command::Back {
                TurnError::IllegalBackNavigation(msg)
            } else {
                TurnError::BlockedByHazard(msg)
            });
        }
        match cmd {
            Command::Go(dir) => self.go(dir.as_deref(), msgs),
            Command::Back => self.back(false, msgs),
            Command::Take => self.take(msgs),
            Command::Loot { what, index } => self.loot(what.as_deref(), index.as_deref(), msgs),
            Command::Fight(target) => self.confront(Approach::Fight, target.as_deref(), msgs),
            Command::Run(target) => self.confront(Approach::Run, target.as_deref(), msgs),
            Command::Answer(word) => self.answer(word.as_deref(), msgs),
            Command::Press => self.press(msgs),
            Command::Help => {
                msgs.extend(help_text().lines().map(String::from));
                Ok(())
            }
            Command::Quit => {
                msgs.push("Thank you for playing. Good bye.".to_string());
                self.status = TurnStatus::Quit;
                Ok(())
            }
            Command::Unknown(word) => Err(TurnError::UnknownCommand(word.clone())),
        }
    }

    fn monster_here(&self) -> bool {
        self.npc_here() == Some(NpcKind::Monster)
    }

    fn go(&mut self, word: Option<&str>, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        if self.monster_here() {
            return Err(TurnError::BlockedByHazard(MONSTER_BLOCKS.to_string()));
        }
        let word = word.ok_or_else(|| TurnError::MissingArgument("Go where?".to_string()))?;
        let direction: Direction = word
            .parse()
            .map_err(|_| TurnError::InvalidDirection(word.to_string()))?;
        let dest = self
            .graph
            .exit(self.current, direction)
            .ok_or_else(|| TurnError::InvalidDirection(word.to_string()))?;

        let from = self.current;
        let delta = if dest == from {
            self.counters.apply(from, direction)
        } else {
            None
        };
        self.history.push(from, delta);
        debug!("go {} from {} to {} ({:?})", direction, from, dest, delta);

        let effect = self.arrive(dest, EntryMode::Forward, msgs);
        if from == RoomId::MysteryRoom && dest != from && self.flags.button_pressed {
            msgs.push("The doorway you passed through disappears behind you in a flash of light. You cannot go back through there.".to_string());
        }
        self.finish_move(effect, msgs)
    }

    /// Step back along the history. `forced` skips the one-way gates, used
    /// when a hazard room throws the player back out.
    fn back(&mut self, forced: bool, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        if !forced && self.monster_here() {
            return Err(TurnError::BlockedByHazard(MONSTER_BLOCKS.to_string()));
        }
        let target = match self.history.peek() {
            Some(entry) => entry.room,
            None => {
                return Err(TurnError::IllegalBackNavigation(
                    "Back where? You're at the start.".to_string(),
                ))
            }
        };
        if !forced {
            self.check_back_gates(target, msgs)?;
        }
        let Some(entry) = self.history.pop() else {
            return Ok(());
        };
        if let Some(delta) = entry.delta {
            self.counters.invert(delta);
        }
        debug!("back from {} to {}", self.current, entry.room);
        let effect = self.arrive(entry.room, EntryMode::Back, msgs);
        self.finish_move(effect, msgs)
    }

    fn check_back_gates(&self, target: RoomId, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        let boots = self.player.has(Item::Boots);
        match (self.current, target) {
            (here, RoomId::MysteryRoom)
                if here != RoomId::Treasury || self.flags.button_pressed =>
            {
                Err(TurnError::IllegalBackNavigation(
                    "You cannot go back to the mystery room.".to_string(),
                ))
            }
            (RoomId::Pit, RoomId::SpiralStaircase) if !boots => Err(
                TurnError::IllegalBackNavigation("You cannot exit the pit by going back.".to_string()),
            ),
            (RoomId::MainHall, RoomId::SecretCorridor) if !boots => {
                Err(TurnError::IllegalBackNavigation(
                    "You cannot reach the hatch and go back to the secret corridor.".to_string(),
                ))
            }
            (RoomId::Pit, RoomId::SpiralStaircase) | (RoomId::MainHall, RoomId::SecretCorridor) => {
                msgs.push("You take flight with Hermes's Boots.".to_string());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Move the player into `dest` and run its entry rule.
    fn arrive(
        &mut self,
        dest: RoomId,
        mode: EntryMode,
        msgs: &mut Vec<String>,
    ) -> Option<EntryEffect> {
        let from = self.current;
        self.current = dest;
        self.player.steps += 1;
        msgs.push(format!("You are {}", dest.description()));
        if mode != EntryMode::Back {
            self.counters.reset_on_entry(dest, from);
        }
        let hazard = if self.rng.gen_bool(0.5) {
            HazardKind::Lions
        } else {
            HazardKind::Lava
        };
        let outcome = rules::on_enter(&EntryContext {
            room: dest,
            from,
            mode,
            player: &self.player,
            flags: self.flags,
            counters: &self.counters,
            boss: self.boss,
            code: &self.code,
            hazard,
        });
        msgs.extend(outcome.messages);
        for change in outcome.exit_changes {
            self.graph.apply(change);
        }
        if let Some(solved) = outcome.riddle_solved {
            self.flags.riddle_solved = solved;
        }
        if let Some(pressed) = outcome.button_pressed {
            self.flags.button_pressed = pressed;
        }
        if outcome.spawn_artefact {
            if let Some(artefact) = self.artefacts.maybe_draw(&mut self.rng) {
                self.graph.room_mut(dest).artefacts.push(artefact);
            }
        }
        outcome.effect
    }

    /// Resolve what the entered room does to the player, then let the
    /// labyrinth react to the step.
    fn finish_move(
        &mut self,
        effect: Option<EntryEffect>,
        msgs: &mut Vec<String>,
    ) -> Result<(), TurnError> {
        let mut escaped = false;
        match effect {
            Some(EntryEffect::VictoryExit) => {
                info!("player left the labyrinth victorious");
                self.status = TurnStatus::VictoryExit;
            }
            Some(EntryEffect::ConfrontBoss) => {
                info!("minotaur confronted with vitality {}", self.player.vitality);
                self.boss = BossState::Confronted;
            }
            Some(EntryEffect::Trapped) => self.player.vitality = 0,
            Some(EntryEffect::Hazard(kind)) => {
                match encounter::resolve_hazard(kind, &self.player, &mut self.rng) {
                    HazardOutcome::Escape(msg) => {
                        msgs.push(msg.to_string());
                        escaped = true;
                    }
                    HazardOutcome::Death(msg) => {
                        msgs.push(msg.to_string());
                        self.status = TurnStatus::Death(DeathCause::Encounter);
                    }
                }
            }
            None => {}
        }
        if self.status.is_terminal() || self.player.is_dead() {
            return Ok(());
        }
        encounter::place_npcs(&mut self.graph, &mut self.npcs, &mut self.rng);
        self.exhaustion_check(msgs);
        if escaped && !self.player.is_dead() {
            self.back(true, msgs)?;
        }
        Ok(())
    }

    fn exhaustion_check(&mut self, msgs: &mut Vec<String>) {
        if self.player.steps % self.player.exhaustion_interval == 0 {
            self.player.vitality -= 1;
            msgs.push("You've grown weaker from exhaustion while exploring.".to_string());
            msgs.push(format!("Vitality - {}", self.player.vitality.max(0)));
        }
    }

    fn take(&mut self, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        let item = match self.current {
            RoomId::Treasury if !self.player.has(Item::Thread) => Item::Thread,
            RoomId::SpiralStaircase
                if self.counters.shaft.level == HARPE_LEVEL && !self.player.has(Item::Harpe) =>
            {
                Item::Harpe
            }
            RoomId::SecretCorridor if !self.player.has(Item::Aegis) => Item::Aegis,
            RoomId::EndlessCorridor
                if self.counters.corridor.position == BOOTS_POSITION
                    && !self.player.has(Item::Boots) =>
            {
                Item::Boots
            }
            _ => {
                return Err(TurnError::NoEffect(
                    "What are you trying to take? There's nothing there.".to_string(),
                ))
            }
        };
        self.player.inventory.insert(item);
        info!("{} taken after {} steps", item, self.player.steps);
        match item {
            Item::Thread => {
                msgs.push("You have successfully picked up Ariadna's Thread. Now you can navigate the labyrinth more easily.".to_string());
                msgs.push(format!(
                    "The thread weaves itself and you can make out the number {} forming from it.",
                    self.code
                ));
            }
            Item::Harpe => msgs.push(
                "You pick up the legendary sword responsible for killing Medusa.".to_string(),
            ),
            Item::Aegis => msgs.push(
                "You pick up the shield of the King of Olympus. Shield bashes have a chance to stun the enemy.".to_string(),
            ),
            Item::Boots => {
                self.player.exhaustion_interval = self.boots_exhaustion_interval;
                self.player.steps = 0;
                msgs.push("You pick up and put on Hermes's Boots. They allow you to take flight. You will get exhausted less often.".to_string());
            }
            Item::Amulet => {}
        }
        Ok(())
    }

    fn loot(
        &mut self,
        what: Option<&str>,
        index: Option<&str>,
        msgs: &mut Vec<String>,
    ) -> Result<(), TurnError> {
        match what {
            Some("food") => {
                if self.rng.gen_range(0..3) == 2 {
                    self.player.vitality += 1;
                    msgs.push("You find an old moldy sandwich on the floor. You eat it. You gain 1 vitality point.".to_string());
                } else {
                    self.player.steps += 1;
                    msgs.push("You find nothing but dust and echoes. You take a bit to reflect on your misery (step counter increased).".to_string());
                }
                Ok(())
            }
            Some("artefact") => self.loot_artefact(index, msgs),
            _ => Err(TurnError::MissingArgument("Loot what?".to_string())),
        }
    }

    fn loot_artefact(
        &mut self,
        index: Option<&str>,
        msgs: &mut Vec<String>,
    ) -> Result<(), TurnError> {
        let count = self.graph.room(self.current).artefacts.len();
        if count == 0 {
            return Err(TurnError::NoEffect(
                "There are no artefacts in this room.".to_string(),
            ));
        }
        let raw = index
            .ok_or_else(|| TurnError::MissingArgument("Loot what artefact?".to_string()))?;
        let n: usize = raw.parse().map_err(|_| {
            TurnError::MissingArgument("Which artefact? (Use a number)".to_string())
        })?;
        if n == 0 {
            return Err(TurnError::NoEffect("Try a positive number.".to_string()));
        }
        if n > count {
            return Err(TurnError::NoEffect(
                "There aren't that many artefacts in this room.".to_string(),
            ));
        }
        let chosen = &self.graph.room(self.current).artefacts[n - 1];
        if chosen.cursed {
            return Err(TurnError::NoEffect(
                "You cannot pick up a cursed artefact.".to_string(),
            ));
        }
        if chosen.weight > self.player.capacity {
            return Err(TurnError::NoEffect(
                "This artefact is too heavy for you to pick up.".to_string(),
            ));
        }
        let artefact = self.graph.room_mut(self.current).artefacts.remove(n - 1);
        self.player.capacity -= artefact.weight;
        msgs.push(format!(
            "You have successfully picked up the {}. It has been added to your backpack.",
            artefact.name
        ));
        self.player.backpack.push(artefact);
        Ok(())
    }

    /// `fight` and `run`: the Minotaur in the arena, otherwise whoever is here.
    fn confront(
        &mut self,
        approach: Approach,
        target: Option<&str>,
        msgs: &mut Vec<String>,
    ) -> Result<(), TurnError> {
        let verb = match approach {
            Approach::Fight => "fight",
            Approach::Run => "run from",
        };
        if self.current == RoomId::Centre {
            if self.boss == BossState::Victorious {
                return Err(TurnError::NoEffect("The Minotaur lies defeated.".to_string()));
            }
            let target = target
                .ok_or_else(|| TurnError::MissingArgument(format!("Who do you want to {}?", verb)))?;
            if target != "minotaur" {
                return Err(TurnError::NoEffect(format!(
                    "You can only {} the Minotaur here.",
                    verb
                )));
            }
            match boss::resolve(approach, &self.player) {
                BossOutcome::Victory(msg) => {
                    msgs.push(msg.to_string());
                    msgs.extend(boss::VICTORY_MESSAGE.lines().map(String::from));
                    self.graph
                        .set_exit(RoomId::Centre, Direction::Down, RoomId::SpiralStaircase);
                    self.graph
                        .set_exit(RoomId::Centre, Direction::Backward, RoomId::BinaryCorridor);
                    self.flags.victory = true;
                    self.boss = BossState::Victorious;
                }
                BossOutcome::Defeat(msg) => {
                    msgs.push(msg.to_string());
                    self.status = TurnStatus::Death(DeathCause::Encounter);
                }
            }
            return Ok(());
        }

        let Some(kind) = self.npc_here() else {
            return Err(TurnError::NoEffect(format!(
                "There's no one to {} here.",
                verb
            )));
        };
        let target = target
            .ok_or_else(|| TurnError::MissingArgument(format!("Who do you want to {}?", verb)))?;
        if target.parse::<NpcKind>() != Ok(kind) {
            return Err(TurnError::NoEffect(format!("There's no {} here.", target)));
        }
        let action = match approach {
            Approach::Fight => Action::Fight,
            Approach::Run => Action::Run,
        };
        let resolution = encounter::resolve(kind, action, &self.player);
        self.apply_resolution(resolution, msgs)
    }

    fn answer(&mut self, word: Option<&str>, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        let word =
            word.ok_or_else(|| TurnError::MissingArgument("Answer something...".to_string()))?;
        let mut asked = false;

        if self.current == RoomId::PuzzleRoom && !self.player.has(Item::Thread) {
            asked = true;
            self.answer_riddle(word, msgs);
        }
        if let Some(kind) = self.npc_here() {
            asked = true;
            let action = Action::Answer(Reply::from_word(word));
            let resolution = encounter::resolve(kind, action, &self.player);
            self.apply_resolution(resolution, msgs)?;
        }
        if !asked {
            return Err(TurnError::NoEffect(
                "Answer what? No question was asked.".to_string(),
            ));
        }
        Ok(())
    }

    fn answer_riddle(&mut self, word: &str, msgs: &mut Vec<String>) {
        self.riddle_attempts += 1;
        if self.flags.riddle_solved {
            msgs.push("The riddle is solved. The door to the west stands open.".to_string());
            return;
        }
        if word == RIDDLE_ANSWER {
            self.graph
                .set_exit(RoomId::PuzzleRoom, Direction::West, RoomId::Treasury);
            self.flags.riddle_solved = true;
            info!("riddle solved after {} attempts", self.riddle_attempts);
            msgs.push("You see the labyrinth twist and rearrange itself in front of you. A door opens up to the west.".to_string());
            return;
        }
        msgs.push("You hear a voice come from every corner of the room: Wrong Answer! Make sure to answer in 1 word.".to_string());
        if self.riddle_attempts >= RIDDLE_HINT_AFTER {
            msgs.push("Hint: You can dig one with a shovel.".to_string());
        } else {
            msgs.push(format!(
                "A hint will be given in {} tries.",
                RIDDLE_HINT_AFTER - self.riddle_attempts
            ));
        }
        self.player.steps += 1;
        msgs.push(
            "You wait and think until you're ready to guess again. (Step count increased by 1)"
                .to_string(),
        );
    }

    fn apply_resolution(
        &mut self,
        resolution: Resolution,
        msgs: &mut Vec<String>,
    ) -> Result<(), TurnError> {
        debug!("encounter resolved: {:?}", resolution.outcome);
        msgs.push(resolution.message.to_string());
        self.player.vitality += resolution.vitality_delta;
        if resolution.removes_npc {
            self.graph.room_mut(self.current).npc = None;
        }
        if let Some(gift) = resolution.gift {
            self.player.inventory.insert(gift);
        }
        if resolution.teleport {
            self.history.push(self.current, None);
            let effect = self.arrive(RoomId::Entrance, EntryMode::Teleport, msgs);
            if effect == Some(EntryEffect::VictoryExit) {
                info!("player left the labyrinth victorious");
                self.status = TurnStatus::VictoryExit;
            }
        }
        Ok(())
    }

    fn press(&mut self, msgs: &mut Vec<String>) -> Result<(), TurnError> {
        if self.current != RoomId::MysteryRoom {
            return Err(TurnError::NoEffect("There's nothing to press.".to_string()));
        }
        let idx = self.rng.gen_range(0..RoomId::SCRAMBLE_TARGETS.len());
        let target = RoomId::SCRAMBLE_TARGETS[idx];
        self.graph
            .set_exit(RoomId::MysteryRoom, Direction::North, target);
        self.counters.scramble(&mut self.rng);
        self.flags.button_pressed = true;
        info!("mystery button pressed: north now leads to {}", target);
        msgs.push("You can hear the whole labyrinth shift and change. You do not know where you will emerge if you exit the mystery room.".to_string());
        Ok(())
    }
}
