//! Keyword classification of oracle replies.
//!
//! The oracle's output is untrusted text: it may echo partial or
//! malformed control tokens, celebrate and offer more options in the
//! same breath, or do neither. This module keeps the branch decision a
//! pure function over that text so the priority rules are testable
//! without any external service.

/// Token sets driving the classifier. The lists are configuration, not
/// hard-coded behavior: the defaults match the original English keyword
/// heuristic, but deployments with a different persona language can
/// swap them out.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// Literal trigger the oracle emits to request a record-store query.
    pub search_token: String,
    /// Affirmative/closing tokens marking a satisfied user.
    pub celebration_tokens: Vec<String>,
    /// Markers that the conversation wants to continue. A question mark
    /// in the reply always counts as one.
    pub continuation_tokens: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            search_token: "SEARCH_ACTION".into(),
            celebration_tokens: vec![
                "have".into(),
                "great".into(),
                "enjoy".into(),
                "awesome".into(),
            ],
            continuation_tokens: vec!["more".into()],
        }
    }
}

/// Outcome of classifying one oracle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    /// The user is satisfied; stop, celebrate, do not search.
    Celebration,
    /// The oracle requested a record-store query with this string.
    Search { query: String },
    /// Plain conversational turn.
    Conversation,
}

/// Classify a reply. First match wins, in this priority order:
///
/// 1. celebration tokens present and no continuation marker — "stop"
///    semantics deliberately dominate "keep searching" semantics so a
///    reply that celebrates *and* triggers a search cannot loop forever;
/// 2. the search trigger token;
/// 3. everything else is conversation.
pub fn classify_reply(text: &str, rules: &ClassifierRules) -> ReplyKind {
    let has_search_token = find_ci(text, &rules.search_token).is_some();

    let celebrating = rules
        .celebration_tokens
        .iter()
        .any(|t| find_ci(text, t).is_some());
    let continuing = has_search_token
        || text.contains('?')
        || rules
            .continuation_tokens
            .iter()
            .any(|t| find_ci(text, t).is_some());

    if celebrating && !continuing {
        return ReplyKind::Celebration;
    }

    if has_search_token {
        return ReplyKind::Search {
            query: extract_query(text, &rules.search_token),
        };
    }

    ReplyKind::Conversation
}

/// Pull the query string out of a reply carrying the search token.
///
/// The bold-markup variant (`**TOKEN:**`) is normalized first, then
/// everything after the first `TOKEN:` is the query. A bare token with
/// no colon form degrades to the reply with the token removed.
fn extract_query(text: &str, token: &str) -> String {
    let bold = format!("**{token}:**");
    let colon_form = format!("{token}:");
    let cleaned = text.replace(&bold, &colon_form);

    match find_ci(&cleaned, &colon_form) {
        Some(pos) => cleaned[pos + colon_form.len()..].trim().to_string(),
        None => remove_ci(&cleaned, token).trim().to_string(),
    }
}

/// Remove any line containing the search token from outgoing text.
/// Defense against the oracle echoing the control token at the user.
pub fn strip_control_lines(text: &str, token: &str) -> String {
    text.lines()
        .filter(|line| find_ci(line, token).is_none())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// ASCII case-insensitive substring search returning a byte offset.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Remove every ASCII case-insensitive occurrence of `needle`.
fn remove_ci(text: &str, needle: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = find_ci(rest, needle) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
    out
}
