//! Turn a line of player input into a [`Command`].
//!
//! Only the first word picks the command; arguments are kept as written and
//! validated by the session, which owns the state needed to judge them.

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Option<String>),      // go north
    Back,                    // back
    Take,                    // take
    Loot {
        what: Option<String>,  // loot food | loot artefact 2
        index: Option<String>,
    },
    Fight(Option<String>),   // fight monster
    Run(Option<String>),     // run minotaur
    Answer(Option<String>),  // answer hole
    Press,                   // press
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Commands still allowed while the Minotaur seals the arena.
    pub fn allowed_in_arena(&self) -> bool {
        matches!(
            self,
            Command::Fight(_) | Command::Run(_) | Command::Help | Command::Quit
        )
    }
}

pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();

    let Some(&word) = parts.first() else {
        return Command::Unknown(String::new());
    };
    let arg = |i: usize| parts.get(i).map(|s| s.to_string());

    let cmd = match word {
        "go" => Command::Go(arg(1)),
        "back" => Command::Back,
        "take" => Command::Take,
        "loot" => Command::Loot {
            what: arg(1),
            index: arg(2),
        },
        "fight" => Command::Fight(arg(1)),
        "run" => Command::Run(arg(1)),
        "answer" => Command::Answer(arg(1)),
        "press" => Command::Press,
        "help" | "?" => Command::Help,
        "quit" => Command::Quit,
        _ => Command::Unknown(input.trim().to_string()),
    };
    debug!("parsed '{}' as {:?}", input.trim(), cmd);
    cmd
}

pub fn help_text() -> &'static str {
    "You are in Daedalus's Labyrinth.\n\
You need to defeat the Minotaur at the centre and then escape.\n\
\n\
Your command words are:\n\
go <direction> - walk through an exit\n\
back - retrace your last step\n\
take - pick up the quest item in front of you\n\
loot food | loot artefact <n> - search the room\n\
answer <word> - answer a riddle or a question\n\
fight <who> | run <who> - deal with whoever is here\n\
press - press a button, if there is one\n\
help - show this text; quit - leave the game"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_keeps_its_argument() {
        assert_eq!(parse_command("go north"), Command::Go(Some("north".into())));
        assert_eq!(parse_command("  GO   Up "), Command::Go(Some("up".into())));
        assert_eq!(parse_command("go"), Command::Go(None));
    }

    #[test]
    fn loot_takes_two_arguments() {
        assert_eq!(
            parse_command("loot artefact 2"),
            Command::Loot {
                what: Some("artefact".into()),
                index: Some("2".into())
            }
        );
        assert_eq!(
            parse_command("loot"),
            Command::Loot {
                what: None,
                index: None
            }
        );
    }

    #[test]
    fn unknown_and_empty_input() {
        assert_eq!(parse_command("dance wildly"), Command::Unknown("dance wildly".into()));
        assert_eq!(parse_command("   "), Command::Unknown(String::new()));
    }

    #[test]
    fn arena_allows_only_combat_and_meta() {
        assert!(parse_command("fight minotaur").allowed_in_arena());
        assert!(parse_command("quit").allowed_in_arena());
        assert!(!parse_command("back").allowed_in_arena());
        assert!(!parse_command("take").allowed_in_arena());
    }
}
