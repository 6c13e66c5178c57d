pub mod transcript;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::types::ChatMessage;
use transcript::Transcript;

/// One conversation's transcript plus turn-scoped scratch state.
///
/// Lives in process memory only; a restart loses in-flight
/// conversations by design.
pub struct Session {
    pub transcript: Transcript,
    /// Raw retrieved blocks already shown, keyed verbatim. Only grows.
    pub seen_events: HashSet<String>,
    /// Distinct questions the assistant has asked, in order.
    asked_questions: Vec<String>,
    /// Consecutive searches that produced nothing new.
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new(persona: String, profile_context: Option<String>) -> Self {
        let mut transcript = Transcript::new(persona);
        if let Some(context) = profile_context.filter(|c| !c.is_empty()) {
            transcript.push(ChatMessage::system(context));
        }
        Self {
            transcript,
            seen_events: HashSet::new(),
            asked_questions: Vec::new(),
            retry_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Record a fingerprint as shown. Returns false if it was already
    /// known (the set never shrinks and never holds duplicates).
    pub fn mark_seen(&mut self, fingerprint: &str) -> bool {
        self.seen_events.insert(fingerprint.to_string())
    }

    pub fn has_seen(&self, fingerprint: &str) -> bool {
        self.seen_events.contains(fingerprint)
    }

    /// Log a question the assistant asked, once. Ordered-set semantics:
    /// a repeated question is dropped, order of first appearance kept.
    pub fn note_question(&mut self, question: &str) {
        if !self.asked_questions.iter().any(|q| q == question) {
            self.asked_questions.push(question.to_string());
        }
    }

    pub fn asked_questions(&self) -> &[String] {
        &self.asked_questions
    }
}

/// Registry of live sessions, keyed by caller-supplied identifier.
///
/// Each entry is wrapped in its own `Mutex` so one turn at a time runs
/// per session while distinct sessions proceed in parallel. The
/// registry is injected into the gateway, never a module global.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the session for `session_id`, creating it if absent.
    ///
    /// On creation the persona becomes the base system message and a
    /// non-empty profile context is injected as one additional leading
    /// system message — exactly once, never on later turns.
    pub async fn get_or_create(
        &self,
        session_id: &str,
        persona: String,
        profile_context: Option<String>,
    ) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(session_id) {
                return Arc::clone(session);
            }
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(session_id.to_string()).or_insert_with(|| {
            info!(session_id, "created session");
            Arc::new(Mutex::new(Session::new(persona, profile_context)))
        }))
    }

    /// Discard the session entirely. Idempotent: resetting an unknown
    /// identifier is a no-op success and creates nothing.
    pub async fn reset(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        debug!(session_id, removed, "session reset");
        removed
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
