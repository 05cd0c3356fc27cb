// bridge.rs — The agent event loop.
//
// Reads one JSON mutation request per stdin line, applies it through the
// AgentBridge, and writes JSONL on stdout: first the ack (or the typed
// rejection), then any context snapshots produced by the change notifier.
// Requests are processed strictly one at a time to completion — the
// sequential application that makes last-applied-wins the whole story.

use std::io::{self, BufRead, Write};

use okr_bridge::{AgentBridge, BridgeError, BridgeRequest, MutationAck};
use okr_notify::{BufferSink, ContextMessage};
use serde::Serialize;

use crate::commands::build_session;
use crate::config::BuilderConfig;

/// One line of bridge output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeOutput {
    /// The mutation applied; the ack value and narrative follow.
    Ack(MutationAck),
    /// The mutation was rejected; the message is the explanatory status.
    Error { message: String },
    /// A context snapshot for the conversational actor.
    Context(ContextMessage),
}

pub fn execute(config: &BuilderConfig) -> anyhow::Result<()> {
    let (mut bridge, context) = build_session(config);
    tracing::info!("bridge event loop started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        for output in process_line(&mut bridge, &context, &line) {
            writeln!(out, "{}", serde_json::to_string(&output)?)?;
        }
        out.flush()?;
    }

    Ok(())
}

/// Apply one request line and collect everything it produced.
fn process_line(
    bridge: &mut AgentBridge,
    context: &BufferSink,
    line: &str,
) -> Vec<BridgeOutput> {
    let result = match serde_json::from_str::<BridgeRequest>(line) {
        Ok(request) => bridge.handle(request),
        Err(e) => Err(BridgeError::MalformedPayload(e.to_string())),
    };

    let mut outputs = vec![match result {
        Ok(ack) => BridgeOutput::Ack(ack),
        Err(e) => BridgeOutput::Error {
            message: e.to_string(),
        },
    }];
    outputs.extend(context.drain().into_iter().map(BridgeOutput::Context));
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (AgentBridge, BufferSink) {
        build_session(&BuilderConfig {
            sample_data: true,
            current_period: None,
            context_log: None,
        })
    }

    #[test]
    fn add_request_yields_ack_then_context() {
        let (mut bridge, context) = session();
        let outputs = process_line(
            &mut bridge,
            &context,
            r#"{"action":"add_objective","objective":{"summary":"Ship the demo"}}"#,
        );

        assert_eq!(outputs.len(), 2);
        assert!(matches!(outputs[0], BridgeOutput::Ack(_)));
        match &outputs[1] {
            BridgeOutput::Context(msg) => assert!(msg.content.contains("Ship the demo")),
            other => panic!("expected context, got {:?}", other),
        }
    }

    #[test]
    fn malformed_line_reports_error_and_no_context() {
        let (mut bridge, context) = session();
        let before = bridge.store().get();

        let outputs = process_line(&mut bridge, &context, "{not json");
        assert_eq!(outputs.len(), 1);
        assert!(matches!(outputs[0], BridgeOutput::Error { .. }));
        assert_eq!(bridge.store().get(), before);
    }

    #[test]
    fn unknown_id_reports_error_without_corrupting_state() {
        let (mut bridge, context) = session();
        let before = bridge.store().get();

        let outputs = process_line(
            &mut bridge,
            &context,
            r#"{"action":"delete_objective","objective_id":"ghost"}"#,
        );
        match &outputs[0] {
            BridgeOutput::Error { message } => assert!(message.contains("not found")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(bridge.store().get(), before);
    }

    #[test]
    fn commit_request_produces_no_context_but_cancel_does() {
        let (mut bridge, context) = session();

        // Requesting the affordance does not change the document.
        let outputs = process_line(
            &mut bridge,
            &context,
            r#"{"action":"request_commit_confirmation","objective_id":"1"}"#,
        );
        assert_eq!(outputs.len(), 1);
        assert!(matches!(outputs[0], BridgeOutput::Ack(_)));

        // Cancelling re-publishes the unchanged snapshot so the affordance
        // visibly disappears.
        let outputs = process_line(
            &mut bridge,
            &context,
            r#"{"action":"cancel_commit","objective_id":"1"}"#,
        );
        assert_eq!(outputs.len(), 2);
        assert!(matches!(outputs[1], BridgeOutput::Context(_)));
    }

    #[test]
    fn output_lines_are_tagged_json() {
        let (mut bridge, context) = session();
        let outputs = process_line(
            &mut bridge,
            &context,
            r#"{"action":"delete_objective","objective_id":"2"}"#,
        );
        let json = serde_json::to_string(&outputs[0]).unwrap();
        assert!(json.contains("\"type\":\"ack\""));
        assert!(json.contains("\"kind\":\"deleted\""));
    }
}
