//! Port for the structured round transcript.
//!
//! [`ConversationLogger`] records what was asked of each agent, what it
//! answered and what got committed, one structured event at a time.
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! human-readable diagnostics, the transcript is machine-readable (JSONL).

use serde_json::Value;

/// A structured transcript event.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "agent_prompt", "agent_output", "post_committed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible; adapters swallow their own write
/// errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
