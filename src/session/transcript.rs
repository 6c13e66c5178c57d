use crate::types::{ChatMessage, Role};

/// Ordered message log owned by exactly one session.
///
/// The first message is always the base persona `system` message and is
/// never removed. Transient prompts (turn reminders, status directives)
/// are appended and popped strictly from the tail via the
/// `augment`/`rollback` watermark pair, so a middle message can never be
/// skipped and no control message outlives the oracle call it shaped.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Create a transcript rooted at the given persona text.
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(persona)],
        }
    }

    /// Append a durable message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The base persona message.
    pub fn persona(&self) -> &ChatMessage {
        &self.messages[0]
    }

    /// Append transient messages and return the watermark to roll back
    /// to. Callers must pair this with `rollback` on every exit path of
    /// the oracle call in between.
    pub fn augment(&mut self, transient: impl IntoIterator<Item = ChatMessage>) -> usize {
        let watermark = self.messages.len();
        self.messages.extend(transient);
        watermark
    }

    /// Drop everything appended after `watermark`. The persona message
    /// is never dropped, whatever watermark is passed.
    pub fn rollback(&mut self, watermark: usize) {
        self.messages.truncate(watermark.max(1));
    }

    /// Clone of the transcript minus its last entry, for one-off
    /// classification calls that must not see the newest message.
    pub fn snapshot_without_last(&self) -> Vec<ChatMessage> {
        let end = self.messages.len().saturating_sub(1).max(1);
        self.messages[..end].to_vec()
    }

    /// Count of messages with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
