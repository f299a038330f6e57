use thiserror::Error;

/// Failures talking to the remote agent
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timed out: the agent took too long to respond.")]
    Timeout,

    #[error("Cannot reach the backend. Make sure the agent service is running on {base_url}")]
    Unreachable { base_url: String },

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response from agent: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Request(String),

    /// Unclassified failure from a non-HTTP backend
    #[error("{0}")]
    Other(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
