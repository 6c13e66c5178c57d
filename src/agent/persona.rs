//! Prompt text for the dialogue controller.
//!
//! One function per prompt so the controller reads as control flow, not
//! as a wall of strings. The oracle may ignore any of this; the
//! classifier treats its output as untrusted either way.

use chrono::Utc;

/// Base persona: the durable system message every transcript starts
/// with. Carries the mission protocol and the search trigger contract.
pub fn base_persona(search_token: &str) -> String {
    let today = Utc::now().format("%Y-%m-%d");
    format!(
        "You are VibeScout, an AI curator for local social events.\n\
         Current date: {today}.\n\
         \n\
         Mission protocol, in order:\n\
         1. VIBE CHECK — ask a few playful questions (one per turn) to read the \
         user's mood and energy. No logistics yet.\n\
         2. LOGISTICS PAUSE — before searching, ask once whether they have \
         location, time, or budget preferences, or should you go with the vibe.\n\
         3. THE REVEAL — once ready, output a line of the form \
         `{search_token}: <concise keywords and area>`.\n\
         \n\
         Never list event names, dates, or prices in your text; the system \
         renders cards. Your text is just the enthusiastic intro."
    )
}

/// Soft-context system message injected once at session creation when
/// the user already has a persisted taste summary.
pub fn profile_context(taste_summary: &str) -> String {
    format!(
        "[USER CONTEXT]\n\
         The user has previously enjoyed: \"{taste_summary}\".\n\
         Use this to guide your tone, but don't obsess over it."
    )
}

/// Transient per-turn reminder. Appended before each primary oracle
/// call and popped right after; it must never persist in the transcript.
pub fn turn_reminder(search_token: &str) -> String {
    format!(
        "[PERSONA REMINDER]\n\
         Be a helpful, excited friend finding events. Start from the vibe, \
         collect details naturally, don't be robotic. When you know enough, \
         output `{search_token}: <query>`.\n\
         \n\
         STOP CONDITION: if the user confirms they like an event, celebrate \
         briefly and stop. No more questions, no `{search_token}`, no further \
         options unless they ask."
    )
}

/// Permanent marker recorded in the transcript when a search ran.
pub const SEARCH_EXECUTED: &str = "SEARCH_EXECUTED";

/// Status message for the follow-up call after showing results. The
/// wording depends on whether earlier results were already on the table.
pub fn search_status(shown_before: bool) -> &'static str {
    if shown_before {
        "SYSTEM: You just showed the user 2 MORE events. Briefly ask if these are better."
    } else {
        "SYSTEM: You just showed the user their first 2 options. Briefly ask for thoughts."
    }
}

/// Fixed reply when dedup filtering leaves nothing new to show.
pub fn out_of_matches() -> &'static str {
    "I've run out of new events matching that vibe! Should we try a different category?"
}

/// One-off relevance-gate prompt for the profile-update sub-flow.
pub fn relevance_gate(user_message: &str) -> String {
    format!(
        "[SYSTEM ANALYSIS]\n\
         Look at the user's latest message: \"{user_message}\"\n\
         Does it reveal anything about their personality, tastes, or mood? \
         Ignore purely logistic content such as places or dates.\n\
         Answer ONLY \"YES\" or \"NO\"."
    )
}

/// Transient summarization directive for the profile-update sub-flow.
pub fn summarize_directive() -> &'static str {
    "[TASTE PROFILE UPDATE]\n\
     Act as a data analyst, not a chatbot. Write exactly one concise, \
     factual sentence summarizing the user's general tastes from this \
     conversation. No location, time, or budget. No conversational filler."
}
