// demo.rs — Scripted walkthrough over the sample session.
//
// Interleaves the two actors against one shared state: agent payloads go
// through the bridge, a manual edit goes straight through the store, and
// the commit gate runs a cancel and then a confirm. Every step prints the
// narrative the UI would render and ends by showing what the agent's
// context received.

use okr_bridge::{AgentBridge, BridgeRequest, MutationAck};
use okr_model::ObjectiveStatus;

use crate::commands::build_session;
use crate::config::BuilderConfig;

pub fn execute(config: &BuilderConfig) -> anyhow::Result<()> {
    let demo_config = BuilderConfig {
        sample_data: true,
        ..config.clone()
    };
    let (mut bridge, context) = build_session(&demo_config);

    let state = bridge.store().get();
    println!("Session period {} with {} sample objectives:", state.current_period, state.objectives.len());
    for o in &state.objectives {
        println!("  {} — {} ({}%, {})", o.id, o.summary, o.progress, o.status);
    }

    // 1. The agent proposes a new objective with one key result.
    println!("\n[agent] add_objective");
    let ack = apply(
        &mut bridge,
        r#"{"action":"add_objective","objective":{
            "summary":"Expand into the enterprise segment",
            "key_results":[{"summary":"Sign 10 enterprise pilots","progress":2,"target":10,"units":"pilots"}]
        }}"#,
    )?;
    let new_id = match &ack.value {
        okr_bridge::AckValue::Objective { objective } => objective.id.clone(),
        other => anyhow::bail!("unexpected ack: {:?}", other),
    };

    // 2. The agent completes the sample revenue key result.
    println!("\n[agent] update_objective");
    apply(
        &mut bridge,
        r#"{"action":"update_objective","objective":{
            "id":"1",
            "summary":"Increase revenue growth",
            "key_results":[
                {"id":"1-1","summary":"Acquire 100 new enterprise customers","progress":100,"target":100,"units":"customers"},
                {"id":"1-2","summary":"Increase monthly recurring revenue to $500K","progress":380000,"target":500000,"units":"USD"}
            ]
        }}"#,
    )?;

    // 3. The human renames the quality objective through the same store.
    println!("\n[user] rename objective 2");
    bridge.store_mut().replace(|mut s| {
        if let Some(o) = s.objectives.iter_mut().find(|o| o.id == "2") {
            o.summary = "Raise product quality bar".to_string();
        }
        s
    });

    // 4. Commit gate: first a cancel, then a confirm.
    println!("\n[agent] request_commit_confirmation for objective 1");
    let request = id_request("request_commit_confirmation", "1");
    let ack = bridge.handle(serde_json::from_str(&request)?)?;
    println!("  {}", ack.narrative.complete);

    println!("[user] presses No");
    let ack = bridge.handle(serde_json::from_str(&id_request("cancel_commit", "1"))?)?;
    println!("  {}", ack.narrative.complete);
    debug_assert_eq!(
        bridge.store().get().objective("1").map(|o| o.status),
        Some(ObjectiveStatus::Draft)
    );

    println!("[agent] request_commit_confirmation for objective 1, again");
    bridge.handle(serde_json::from_str(&request)?)?;
    println!("[user] presses Yes");
    let ack = bridge.handle(serde_json::from_str(&id_request("confirm_commit", "1"))?)?;
    println!("  {}", ack.narrative.complete);

    // 5. The agent deletes the objective it created.
    println!("\n[agent] delete_objective {}", new_id);
    let ack = bridge.handle(serde_json::from_str(&format!(
        r#"{{"action":"delete_objective","objective_id":"{}"}}"#,
        new_id
    ))?)?;
    println!("  {}", ack.narrative.complete);

    // Final state plus what the agent's context saw along the way.
    let state = bridge.store().get();
    println!("\nFinal session ({} objectives):", state.objectives.len());
    for o in &state.objectives {
        println!("  {} — {} ({}%, {})", o.id, o.summary, o.progress, o.status);
    }

    let messages = context.drain();
    println!(
        "\nThe conversational actor received {} context update(s); each carries the full snapshot.",
        messages.len()
    );
    if let Some(last) = messages.last() {
        let preview: String = last.content.chars().take(120).collect();
        println!("Last update begins: {}...", preview);
    }

    Ok(())
}

fn apply(bridge: &mut AgentBridge, request: &str) -> anyhow::Result<MutationAck> {
    let request: BridgeRequest = serde_json::from_str(request)?;
    let ack = bridge.handle(request)?;
    println!("  {}", ack.narrative.in_progress);
    println!("  {}", ack.narrative.complete);
    Ok(ack)
}

fn id_request(action: &str, id: &str) -> String {
    format!(r#"{{"action":"{}","objective_id":"{}"}}"#, action, id)
}
