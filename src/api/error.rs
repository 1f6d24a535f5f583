//! Error taxonomy for the remote clinic service.
//!
//! The envelope convention makes `success: false` a recoverable,
//! application-level outcome, not an exception: callers must be able to
//! show the message and keep the draft intact. Only transport problems and
//! undecodable payloads are "hard" failures, and even those leave local
//! state untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: no connection, timeout, interrupted body.
    #[error("Connection error: {0}")]
    Transport(String),

    /// The backend rejected the session. The session context has already
    /// been notified; the caller should stop and let the shell tear down.
    #[error("Session expired or unauthorized")]
    Unauthorized,

    /// Field-level validation rejection. Display joins every field error
    /// into one consolidated message.
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// `success: false` with a server-provided message.
    #[error("{0}")]
    Application(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failed operation can simply be retried after the user
    /// corrects input or connectivity returns. `Unauthorized` cannot: the
    /// session is gone.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Transport("could not reach the clinic server".into())
        } else if err.is_timeout() {
            Self::Transport("request timed out".into())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
