//! Injected session-context capability.
//!
//! The core never reads ambient storage for credentials. Whoever hosts the
//! library hands the HTTP client a [`SessionContext`]: a token source plus
//! a hook fired when the backend answers 401. The forced logout/redirect
//! that follows is the shell's business; from here a 401 simply means the
//! in-flight operation resolves to [`crate::api::ApiError::Unauthorized`].

use std::sync::RwLock;

/// Capability handed to the remote client: bearer token plus an
/// unauthorized hook. Implementations must be shareable across tasks.
pub trait SessionContext: Send + Sync {
    /// Current bearer token, if a session is active.
    fn token(&self) -> Option<String>;

    /// Called once per request that came back 401, before the error is
    /// returned to the caller.
    fn unauthorized(&self);
}

/// Token holder for hosts without a richer session layer, and for tests.
/// `unauthorized` clears the token so follow-up requests go out anonymous
/// instead of retrying a dead credential.
#[derive(Debug, Default)]
pub struct TokenSession {
    token: RwLock<Option<String>>,
}

impl TokenSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }
}

impl SessionContext for TokenSession {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn unauthorized(&self) {
        tracing::warn!("session rejected by backend, clearing token");
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}
