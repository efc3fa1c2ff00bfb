use thiserror::Error;

/// Gate-check failure: app entry stays blocked until a credential is
/// activated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no credential entered")]
    Empty,
    #[error("credential could not be persisted: {0}")]
    Persist(String),
}

/// Failure from the generation backend. Always absorbed into the
/// transcript as a visible model turn, never surfaced to the shell.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    Malformed(String),
}
