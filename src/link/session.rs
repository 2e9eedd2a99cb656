//! Login session state machine.
//!
//! Each desktop login attempt mints one ephemeral Session Identifier and
//! tracks it through an explicit state machine: `AwaitingToken` until a
//! device responds, then terminal `Completed` or `Expired`. A session is
//! single-use; terminal states never transition again.

use std::time::Duration;
use uuid::Uuid;

use crate::error::{LinkError, Result};

/// Topic prefix for login channels; the full channel name is this prefix
/// followed by the Session Identifier.
pub const LOGIN_TOPIC_PREFIX: &str = "supplymind/login/";

/// How long a login session waits for a device before expiring.
///
/// The timeout is deliberate: a subscription that never receives a message
/// must end in a user-visible `Expired`, not hang silently.
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// States of one login session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a mobile device to send a token on the channel
    AwaitingToken,
    /// A token arrived; carries the received token
    Completed(String),
    /// The timeout elapsed first; terminal
    Expired,
}

/// One desktop login attempt, keyed by its ephemeral Session Identifier.
///
/// The identifier lives only in memory and in the rendered QR payload.
#[derive(Debug)]
pub struct LinkSession {
    id: String,
    state: SessionState,
}

impl LinkSession {
    /// Mint a fresh session with a random identifier
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state: SessionState::AwaitingToken,
        }
    }

    /// The Session Identifier (the desktop QR payload, verbatim)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Channel name this session listens on
    pub fn topic(&self) -> String {
        format!("{LOGIN_TOPIC_PREFIX}{}", self.id)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Accept the token that completes this session.
    ///
    /// Only legal from `AwaitingToken`; one identifier maps to at most one
    /// completed login.
    pub fn complete(&mut self, token: String) -> Result<()> {
        match self.state {
            SessionState::AwaitingToken => {
                self.state = SessionState::Completed(token);
                Ok(())
            }
            SessionState::Completed(_) => Err(LinkError::AlreadyCompleted.into()),
            SessionState::Expired => Err(LinkError::SessionExpired.into()),
        }
    }

    /// Expire the session. A no-op once completed; expiry is terminal.
    pub fn expire(&mut self) {
        if matches!(self.state, SessionState::AwaitingToken) {
            self.state = SessionState::Expired;
        }
    }
}

impl Default for LinkSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_session_awaits_token() {
        let session = LinkSession::new();
        assert_eq!(*session.state(), SessionState::AwaitingToken);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = LinkSession::new();
        let b = LinkSession::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_topic_carries_prefix_and_id() {
        let session = LinkSession::new();
        let topic = session.topic();
        assert!(topic.starts_with(LOGIN_TOPIC_PREFIX));
        assert!(topic.ends_with(session.id()));
    }

    #[test]
    fn test_complete_is_single_use() {
        let mut session = LinkSession::new();
        session.complete("tok-1".to_string()).unwrap();
        assert_eq!(
            *session.state(),
            SessionState::Completed("tok-1".to_string())
        );

        let err = session.complete("tok-2".to_string()).unwrap_err();
        assert!(matches!(err, Error::Link(LinkError::AlreadyCompleted)));
    }

    #[test]
    fn test_expired_session_rejects_token() {
        let mut session = LinkSession::new();
        session.expire();
        assert_eq!(*session.state(), SessionState::Expired);

        let err = session.complete("tok".to_string()).unwrap_err();
        assert!(matches!(err, Error::Link(LinkError::SessionExpired)));
    }

    #[test]
    fn test_expire_after_complete_is_noop() {
        let mut session = LinkSession::new();
        session.complete("tok".to_string()).unwrap();
        session.expire();
        assert_eq!(*session.state(), SessionState::Completed("tok".to_string()));
    }
}
