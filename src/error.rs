use thiserror::Error;

/// Failure of a language-oracle completion call.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("oracle returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("oracle returned an empty completion")]
    EmptyCompletion,
}

/// Failure of a record-store similarity query.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("record store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("record store returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Fatal failure of a conversational turn.
///
/// Only failures of the primary oracle call and of a search-branch
/// retrieval surface here; the profile-update sub-flow swallows its own
/// errors and never fails the parent turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("oracle unavailable: {0}")]
    Oracle(#[from] OracleError),

    #[error("retrieval unavailable: {0}")]
    Retrieval(#[from] RetrievalError),
}

/// Failure of a profile-store operation.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("email already registered")]
    AlreadyRegistered,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("unknown user")]
    UnknownUser,

    #[error("profile store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile store serialization: {0}")]
    Serde(#[from] serde_json::Error),
}
