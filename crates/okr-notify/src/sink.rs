// sink.rs — ContextSink trait and the built-in sink implementations.
//
// A sink is where context messages go: the in-memory buffer feeds the
// bridge event loop (and tests), the JSONL sink keeps an inspectable
// transcript on disk. The transport that would relay messages to a hosted
// model provider is out of scope; it would be one more sink.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::NotifyError;
use crate::message::ContextMessage;

/// Receives context messages destined for the conversational actor.
pub trait ContextSink: Send {
    /// Deliver one message. Errors are reported to the store, logged, and
    /// never fail the mutation that produced the message.
    fn deliver(&mut self, message: &ContextMessage) -> Result<(), NotifyError>;
}

/// In-memory sink backed by a shared buffer.
///
/// Clone the sink to keep a reading handle: the bridge loop drains the
/// buffer after each mutation to emit context updates downstream.
#[derive(Clone, Default)]
pub struct BufferSink {
    messages: Arc<Mutex<Vec<ContextMessage>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered messages, leaving the buffer empty.
    pub fn drain(&self) -> Vec<ContextMessage> {
        let mut guard = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }

    /// Number of messages currently buffered.
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContextSink for BufferSink {
    fn deliver(&mut self, message: &ContextMessage) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
        Ok(())
    }
}

/// Appends each context message as one JSON line (always-on transcript).
pub struct JsonlLogSink {
    path: PathBuf,
}

impl JsonlLogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ContextSink for JsonlLogSink {
    fn deliver(&mut self, message: &ContextMessage) -> Result<(), NotifyError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| NotifyError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| NotifyError::Io {
                path: self.path.clone(),
                source,
            })?;

        let json = serde_json::to_string(message)?;
        writeln!(file, "{}", json).map_err(|source| NotifyError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn buffer_sink_collects_and_drains() {
        let sink = BufferSink::new();
        let mut writer = sink.clone();

        writer.deliver(&ContextMessage::system("one")).unwrap();
        writer.deliver(&ContextMessage::system("two")).unwrap();

        assert_eq!(sink.len(), 2);
        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].content, "one");
        assert!(sink.is_empty());
    }

    #[test]
    fn jsonl_sink_appends_one_line_per_message() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("context.jsonl");
        let mut sink = JsonlLogSink::new(&path);

        sink.deliver(&ContextMessage::system("first")).unwrap();
        sink.deliver(&ContextMessage::system("second")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
    }
}
