// shell.rs — Interactive manual surface: the human actor.
//
// A line-based session over one in-memory state. CRUD goes straight
// through the mutation engine and the shared store (not through the agent
// bridge), mirroring how the form UI binds to the same document the agent
// mutates. Committing walks the two-button confirmation gate: the prompt
// is the affordance, and only an explicit "y" confirms.

use std::io::{self, BufRead, Write};

use okr_bridge::{AgentBridge, ObjectiveIdPayload};
use okr_engine::{
    add_key_result, add_objective, delete_key_result, delete_objective, update_key_result,
    update_objective, KeyResultDraft, KeyResultPatch, ObjectiveDraft, ObjectivePatch, Outcome,
};
use okr_model::Objective;

use crate::commands::build_session;
use crate::config::BuilderConfig;

const HELP: &str = "\
Commands:
  list                              show all objectives
  show <id>                         objective details with key results
  add <summary>                     add a draft objective
  rename <id> <summary>             change an objective's summary
  delete <id>                       delete an objective
  kr add <obj-id> <summary>         add a key result (0 of 100 %)
  kr set <obj-id> <kr-id> <progress> [target]
                                    update a key result's numbers
  kr delete <obj-id> <kr-id>        delete a key result
  period <label>                    set the session's current period
  commit <id>                       request commit confirmation
  help                              this text
  quit                              end the session";

pub fn execute(config: &BuilderConfig) -> anyhow::Result<()> {
    let (mut bridge, _context) = build_session(config);
    let state = bridge.store().get();
    println!(
        "OKR session — period {}, {} objective(s). Type `help` for commands.",
        state.current_period,
        state.objectives.len()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock();
    loop {
        print!("okr> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if lines.read_line(&mut line)? == 0 {
            break; // EOF
        }
        if !run_command(&mut bridge, line.trim(), &mut lines)? {
            break;
        }
    }

    Ok(())
}

/// Execute one shell line. Returns false when the session should end.
fn run_command(
    bridge: &mut AgentBridge,
    line: &str,
    confirm_input: &mut dyn BufRead,
) -> anyhow::Result<bool> {
    let (verb, rest) = split_word(line);
    match verb {
        "" => {}
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(false),
        "list" => list_objectives(bridge),
        "show" => show_objective(bridge, rest.trim()),
        "add" => add(bridge, rest.trim()),
        "rename" => {
            let (id, summary) = split_word(rest.trim());
            rename(bridge, id, summary.trim());
        }
        "delete" => delete(bridge, rest.trim()),
        "kr" => key_result_command(bridge, rest.trim()),
        "period" => set_period(bridge, rest.trim()),
        "commit" => commit(bridge, rest.trim(), confirm_input)?,
        other => eprintln!("Unknown command: {} (try `help`)", other),
    }
    Ok(true)
}

fn split_word(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail),
        None => (line, ""),
    }
}

fn store_objectives(bridge: &mut AgentBridge, next: Vec<Objective>) {
    bridge.store_mut().replace(move |mut s| {
        s.objectives = next;
        s
    });
}

fn list_objectives(bridge: &AgentBridge) {
    let state = bridge.store().get();
    if state.objectives.is_empty() {
        println!("No objectives yet. `add <summary>` creates one.");
        return;
    }

    println!("{:<38} {:<32} {:<10} {:>5} {:>4}", "ID", "SUMMARY", "STATUS", "PROG", "KRS");
    println!("{}", "-".repeat(92));
    for o in &state.objectives {
        println!(
            "{:<38} {:<32} {:<10} {:>4}% {:>4}",
            truncate(&o.id, 36),
            truncate(&o.summary, 30),
            o.status.to_string(),
            o.progress,
            o.key_results.len(),
        );
    }
}

fn show_objective(bridge: &AgentBridge, id: &str) {
    let state = bridge.store().get();
    let Some(o) = state.objective(id) else {
        eprintln!("Objective not found: {}", id);
        return;
    };

    println!("Objective: {}", o.id);
    println!("Summary:   {}", o.summary);
    if let Some(description) = &o.description {
        println!("About:     {}", description);
    }
    if let Some(quarter) = &o.quarter {
        println!("Period:    {}", quarter);
    }
    println!("Status:    {}", o.status);
    println!("Progress:  {}%", o.progress);
    for kr in &o.key_results {
        println!(
            "  [{}] {} — {} / {} {} ({:.0}%){}",
            kr.id,
            kr.summary,
            kr.progress,
            kr.target,
            kr.units,
            kr.percent_complete(),
            if kr.is_completed { " ✓" } else { "" },
        );
    }
}

fn add(bridge: &mut AgentBridge, summary: &str) {
    if summary.is_empty() {
        eprintln!("Usage: add <summary>");
        return;
    }
    let state = bridge.store().get();
    let (next, created) = add_objective(
        &state.objectives,
        ObjectiveDraft::new(summary),
        Some(&state.current_period),
    );
    store_objectives(bridge, next);
    println!("Added \"{}\" ({})", created.summary, created.id);
}

fn rename(bridge: &mut AgentBridge, id: &str, summary: &str) {
    if id.is_empty() || summary.is_empty() {
        eprintln!("Usage: rename <id> <summary>");
        return;
    }
    let state = bridge.store().get();
    let patch = ObjectivePatch {
        summary: Some(summary.to_string()),
        ..ObjectivePatch::for_id(id)
    };
    match update_objective(&state.objectives, &patch) {
        Outcome::NotFound => eprintln!("Objective not found: {}", id),
        Outcome::Applied((next, updated)) => {
            store_objectives(bridge, next);
            println!("Renamed to \"{}\"", updated.summary);
        }
    }
}

fn delete(bridge: &mut AgentBridge, id: &str) {
    let state = bridge.store().get();
    match delete_objective(&state.objectives, id) {
        Outcome::NotFound => eprintln!("Objective not found: {}", id),
        Outcome::Applied(next) => {
            store_objectives(bridge, next);
            println!("Deleted objective {}", id);
        }
    }
}

fn key_result_command(bridge: &mut AgentBridge, rest: &str) {
    let (sub, tail) = split_word(rest);
    match sub {
        "add" => {
            let (obj_id, summary) = split_word(tail.trim());
            kr_add(bridge, obj_id, summary.trim());
        }
        "set" => kr_set(bridge, tail.trim()),
        "delete" => {
            let (obj_id, kr_id) = split_word(tail.trim());
            kr_delete(bridge, obj_id, kr_id.trim());
        }
        _ => eprintln!("Usage: kr add|set|delete ..."),
    }
}

/// Apply an objective-scoped mutation and write the result back.
fn with_objective(
    bridge: &mut AgentBridge,
    obj_id: &str,
    mutate: impl FnOnce(&Objective) -> Outcome<Objective>,
) {
    let state = bridge.store().get();
    let Some(objective) = state.objective(obj_id) else {
        eprintln!("Objective not found: {}", obj_id);
        return;
    };
    match mutate(objective) {
        Outcome::NotFound => eprintln!("Key result not found"),
        Outcome::Applied(updated) => {
            let next: Vec<Objective> = state
                .objectives
                .iter()
                .map(|o| if o.id == obj_id { updated.clone() } else { o.clone() })
                .collect();
            store_objectives(bridge, next);
            let stored = bridge
                .store()
                .get()
                .objective(obj_id)
                .map(|o| o.progress)
                .unwrap_or(0);
            println!("Objective {} is now at {}%", obj_id, stored);
        }
    }
}

fn kr_add(bridge: &mut AgentBridge, obj_id: &str, summary: &str) {
    if obj_id.is_empty() || summary.is_empty() {
        eprintln!("Usage: kr add <obj-id> <summary>");
        return;
    }
    let draft = KeyResultDraft {
        summary: summary.to_string(),
        ..KeyResultDraft::default()
    };
    with_objective(bridge, obj_id, |o| {
        Outcome::Applied(add_key_result(o, draft).0)
    });
}

fn kr_set(bridge: &mut AgentBridge, args: &str) {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let (obj_id, kr_id, progress, target) = match parts.as_slice() {
        [obj, kr, progress] => (*obj, *kr, progress.parse::<f64>(), None),
        [obj, kr, progress, target] => {
            (*obj, *kr, progress.parse::<f64>(), Some(target.parse::<f64>()))
        }
        _ => {
            eprintln!("Usage: kr set <obj-id> <kr-id> <progress> [target]");
            return;
        }
    };
    let Ok(progress) = progress else {
        eprintln!("progress must be a number");
        return;
    };
    let target = match target {
        Some(Ok(t)) => Some(t),
        Some(Err(_)) => {
            eprintln!("target must be a number");
            return;
        }
        None => None,
    };

    let patch = KeyResultPatch {
        progress: Some(progress),
        target,
        ..KeyResultPatch::for_id(kr_id)
    };
    with_objective(bridge, obj_id, |o| update_key_result(o, &patch));
}

fn kr_delete(bridge: &mut AgentBridge, obj_id: &str, kr_id: &str) {
    if obj_id.is_empty() || kr_id.is_empty() {
        eprintln!("Usage: kr delete <obj-id> <kr-id>");
        return;
    }
    with_objective(bridge, obj_id, |o| delete_key_result(o, kr_id));
}

fn set_period(bridge: &mut AgentBridge, label: &str) {
    if label.is_empty() {
        eprintln!("Usage: period <label>");
        return;
    }
    let label = label.to_string();
    bridge.store_mut().replace(move |mut s| {
        s.current_period = label;
        s
    });
    println!("Current period set.");
}

/// The commit gate: request the confirmation, surface the two-button
/// affordance as a prompt, and only commit on an explicit yes.
fn commit(
    bridge: &mut AgentBridge,
    id: &str,
    confirm_input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let payload = ObjectiveIdPayload {
        objective_id: id.to_string(),
    };
    let ack = match bridge.request_commit_confirmation(payload.clone()) {
        Ok(ack) => ack,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };
    print!("{} [y/N] ", ack.narrative.complete);
    io::stdout().flush()?;

    let mut answer = String::new();
    confirm_input.read_line(&mut answer)?;
    let accepted = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

    let result = if accepted {
        bridge.confirm_commit(payload)
    } else {
        bridge.cancel_commit(payload)
    };
    match result {
        Ok(ack) => println!("{}", ack.narrative.complete),
        Err(e) => eprintln!("{}", e),
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
