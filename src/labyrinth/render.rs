//! Plain-text rendering of a [`TurnReport`] for the terminal.

use super::session::{TurnReport, TurnStatus};

const RULE: &str = "------------------------------";

pub fn render(report: &TurnReport) -> String {
    let mut out: Vec<String> = Vec::new();
    if let Some(err) = &report.rejected {
        out.push(err.to_string());
    }
    out.extend(report.messages.iter().cloned());

    if report.status.is_terminal() {
        if report.status != TurnStatus::Quit {
            out.push("Thank you for playing. Good bye.".to_string());
        }
        return out.join("\n");
    }

    if let Some(npc) = report.encounter {
        out.push(String::new());
        out.push(format!("You encounter a {} in the room.", npc));
        out.push(format!("{}: {}", npc, npc.greeting()));
    }

    out.push(String::new());
    out.push(RULE.to_string());
    if !report.artefacts.is_empty() {
        out.push("The room you're in contains the following artefacts:".to_string());
        for (i, a) in report.artefacts.iter().enumerate() {
            out.push(format!("{}: {} | Weight - {}", i + 1, a.name, a.weight));
        }
    }
    out.push(format!("Remaining backpack weight - {}", report.capacity));
    out.push(format!("Vitality - {}", report.vitality));
    out.push(RULE.to_string());
    out.push(String::new());
    out.push(exit_line(report));
    out.join("\n")
}

fn exit_line(report: &TurnReport) -> String {
    let mut line = String::from("Exits:");
    for dir in report.exits.keys() {
        line.push(' ');
        line.push_str(dir.as_str());
    }
    line
}
