//! The profile-update sub-flow.
//!
//! Runs after every turn that carries a known identity, whatever branch
//! the turn took. Two sequential oracle calls, never reordered: a
//! relevance gate over the transcript minus its newest entry, then — if
//! the gate opens — a transient summarization directive whose result
//! overwrites the persisted taste summary. Any failure here is logged
//! and swallowed; the parent turn must still succeed.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{complete_with_transient, persona};
use crate::error::{OracleError, ProfileError};
use crate::oracle::CompletionOracle;
use crate::profile::ProfileStore;
use crate::session::Session;
use crate::types::ChatMessage;

#[derive(Debug, Error)]
enum ProfileUpdateError {
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Returns the new taste summary when one was persisted this turn.
pub async fn run(
    oracle: &dyn CompletionOracle,
    profiles: &ProfileStore,
    session: &mut Session,
    identity: &str,
    user_message: &str,
) -> Option<String> {
    match try_update(oracle, profiles, session, identity, user_message).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!(identity, error = %e, "profile update skipped");
            None
        }
    }
}

async fn try_update(
    oracle: &dyn CompletionOracle,
    profiles: &ProfileStore,
    session: &mut Session,
    identity: &str,
    user_message: &str,
) -> Result<Option<String>, ProfileUpdateError> {
    // Relevance gate: a one-off message list, not a transcript mutation.
    let mut gate_messages = session.transcript.snapshot_without_last();
    gate_messages.push(ChatMessage::system(persona::relevance_gate(user_message)));

    let verdict = oracle.complete(&gate_messages).await?;
    if !verdict.to_uppercase().contains("YES") {
        debug!(identity, "relevance gate closed, no profile update");
        return Ok(None);
    }

    // Summarization: transient directive on the real transcript.
    let directive = ChatMessage::system(persona::summarize_directive());
    let raw = complete_with_transient(oracle, &mut session.transcript, vec![directive]).await?;

    let summary = raw.trim().trim_matches('"').trim().to_string();
    profiles.set_taste_summary(identity, &summary).await?;

    info!(identity, "taste profile updated");
    Ok(Some(summary))
}
