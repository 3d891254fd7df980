//! Downstream failure taxonomy.

use thiserror::Error;

/// Error type for downstream file service calls.
///
/// Timeouts, transport failures, non-2xx responses and undecodable bodies
/// are distinct variants; none of them is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("{}", upstream_display(*status, message.as_deref()))]
    Upstream { status: u16, message: Option<String> },

    #[error("upstream request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("upstream unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// Classify a reqwest error into timeout vs transport failure.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }
}

fn upstream_display(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("upstream request failed with status {status}"),
    }
}

/// Result type for downstream calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
