pub mod classify;
pub mod persona;
pub mod profile_update;

use std::sync::Arc;

use tracing::info;

use crate::config::{DialogueConfig, RetrievalConfig};
use crate::error::{OracleError, TurnError};
use crate::events::parse_event_block;
use crate::oracle::CompletionOracle;
use crate::profile::ProfileStore;
use crate::retrieval::RecordStore;
use crate::session::Session;
use crate::session::transcript::Transcript;
use crate::types::{ChatMessage, StructuredEvent, TurnOutcome};
use classify::{ClassifierRules, ReplyKind, classify_reply, strip_control_lines};

/// The per-turn state machine.
///
/// Given the user's message and the oracle's reply it decides whether to
/// keep chatting, execute a search, or celebrate completion, mutating
/// the session's transcript accordingly, then runs the profile-update
/// sub-flow for known identities. Collaborators are injected; the
/// controller holds no global state of its own.
pub struct DialogueController {
    oracle: Arc<dyn CompletionOracle>,
    store: Arc<dyn RecordStore>,
    profiles: Arc<ProfileStore>,
    rules: ClassifierRules,
    /// How many blocks to request per search; larger than `show_k` so
    /// dedup filtering still leaves something to show.
    fetch_k: usize,
    /// How many fresh blocks to surface per turn.
    show_k: usize,
}

impl DialogueController {
    pub fn new(
        oracle: Arc<dyn CompletionOracle>,
        store: Arc<dyn RecordStore>,
        profiles: Arc<ProfileStore>,
        dialogue: &DialogueConfig,
        retrieval: &RetrievalConfig,
    ) -> Self {
        Self {
            oracle,
            store,
            profiles,
            rules: ClassifierRules {
                search_token: dialogue.search_token.clone(),
                celebration_tokens: dialogue.celebration_tokens.clone(),
                continuation_tokens: dialogue.continuation_tokens.clone(),
            },
            fetch_k: retrieval.fetch_k,
            show_k: retrieval.show_k,
        }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Run one conversational turn.
    ///
    /// Oracle failure on the primary call is fatal to the turn: there is
    /// no safe fallback text to emit. The profile-update sub-flow can
    /// never fail the turn.
    pub async fn take_turn(
        &self,
        session: &mut Session,
        user_message: &str,
        identity: Option<&str>,
    ) -> Result<TurnOutcome, TurnError> {
        session.transcript.push(ChatMessage::user(user_message));

        let reminder = ChatMessage::system(persona::turn_reminder(&self.rules.search_token));
        let reply =
            complete_with_transient(self.oracle.as_ref(), &mut session.transcript, vec![reminder])
                .await?;

        let mut outcome = match classify_reply(&reply, &self.rules) {
            ReplyKind::Celebration => TurnOutcome {
                text: reply,
                events: Vec::new(),
                mission_complete: true,
                updated_profile_summary: None,
            },
            ReplyKind::Search { query } => self.run_search(session, &query).await?,
            ReplyKind::Conversation => {
                session.transcript.push(ChatMessage::assistant(reply.clone()));
                if reply.contains('?') {
                    session.note_question(reply.trim());
                }
                TurnOutcome::conversational(reply)
            }
        };

        outcome.text = strip_control_lines(&outcome.text, &self.rules.search_token);

        if let Some(identity) = identity {
            outcome.updated_profile_summary = profile_update::run(
                self.oracle.as_ref(),
                &self.profiles,
                session,
                identity,
                user_message,
            )
            .await;
        }

        Ok(outcome)
    }

    /// The search branch: query, dedup against the session's seen set,
    /// surface the first `show_k` survivors, then one follow-up
    /// completion. The two marker messages appended here are permanent
    /// conversational context for future turns.
    async fn run_search(
        &self,
        session: &mut Session,
        query: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let raw = self.store.search(query, self.fetch_k).await?;
        let fetched = raw.len();

        let fresh: Vec<String> = raw
            .into_iter()
            .filter(|block| !session.has_seen(block))
            .take(self.show_k)
            .collect();

        if fresh.is_empty() {
            session.retry_count += 1;
            info!(
                query,
                fetched,
                retry = session.retry_count,
                "search exhausted: nothing new after dedup"
            );
            return Ok(TurnOutcome::conversational(persona::out_of_matches()));
        }

        let shown_before = !session.seen_events.is_empty();
        for block in &fresh {
            session.mark_seen(block);
        }
        session.retry_count = 0;

        let events: Vec<StructuredEvent> = fresh.iter().map(|b| parse_event_block(b)).collect();

        session
            .transcript
            .push(ChatMessage::assistant(persona::SEARCH_EXECUTED));
        session
            .transcript
            .push(ChatMessage::system(persona::search_status(shown_before)));

        let follow_up = self.oracle.complete(session.transcript.messages()).await?;
        session
            .transcript
            .push(ChatMessage::assistant(follow_up.clone()));

        info!(
            query,
            fetched,
            shown = events.len(),
            total_seen = session.seen_events.len(),
            "search executed"
        );

        Ok(TurnOutcome {
            text: follow_up,
            events,
            mission_complete: true,
            updated_profile_summary: None,
        })
    }
}

/// Scoped transcript augmentation: append the transient messages, run
/// one completion over the augmented transcript, then remove exactly
/// those messages — on success and on failure alike.
pub(crate) async fn complete_with_transient(
    oracle: &dyn CompletionOracle,
    transcript: &mut Transcript,
    transient: Vec<ChatMessage>,
) -> Result<String, OracleError> {
    let watermark = transcript.augment(transient);
    let result = oracle.complete(transcript.messages()).await;
    transcript.rollback(watermark);
    result
}
