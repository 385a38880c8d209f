use thiserror::Error;

/// Error type for one submission attempt.
///
/// Every variant is terminal at the Study screen: the participant sees a
/// generic retry message, the detail goes to the log.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Spawning, writing to, or waiting on the backend process failed.
    #[error("failed to run backend process: {0}")]
    Process(#[from] std::io::Error),

    /// The request could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend exited non-zero.
    #[error("backend failed: {detail}")]
    BackendFailed { detail: String },

    /// The backend exited zero but its output was not a valid reply.
    #[error("malformed backend response: {detail}")]
    MalformedResponse { detail: String },
}
