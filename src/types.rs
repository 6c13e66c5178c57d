use serde::{Deserialize, Serialize};

/// Role of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A structured event parsed from a raw record-store block.
///
/// Every field has an independent default; malformed upstream data
/// degrades to defaults rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredEvent {
    pub title: String,
    pub date: String,
    pub location: String,
    pub cost: String,
    pub description: String,
    pub url: String,
}

impl Default for StructuredEvent {
    fn default() -> Self {
        Self {
            title: "Unknown".into(),
            date: "TBD".into(),
            location: "Check Link".into(),
            cost: "Free".into(),
            description: String::new(),
            url: "#".into(),
        }
    }
}

/// The result of one conversational turn, consumed by the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub text: String,
    pub events: Vec<StructuredEvent>,
    pub mission_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_profile_summary: Option<String>,
}

impl TurnOutcome {
    /// A plain conversational outcome with no events attached.
    pub fn conversational(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            events: Vec::new(),
            mission_complete: false,
            updated_profile_summary: None,
        }
    }
}
