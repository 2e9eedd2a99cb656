//! QR device-linking login.
//!
//! The desktop side mints an ephemeral Session Identifier, renders it as a
//! QR code and subscribes to a per-session channel on the realtime
//! endpoint. A mobile device that scans the code, having authenticated on
//! its own, publishes the resulting token on that channel, completing
//! the desktop login. The desktop holds the only transport handle and
//! releases it on every exit path: success, expiry, or error.

pub mod qr;
pub mod session;
pub mod setup;
pub mod transport;

use std::time::Duration;

use log::info;
use serde_json::json;
use tokio::time::Instant;

use crate::auth::TokenStore;
use crate::error::{LinkError, Result};
use session::LinkSession;
use transport::PubSubTransport;

pub use session::{DEFAULT_LOGIN_TIMEOUT, LOGIN_TOPIC_PREFIX};

/// Run the desktop side of the QR login handshake.
///
/// `on_ready` is called once the subscription is open, with the session
/// whose identifier the caller should render as a QR code. Returns the
/// received token after persisting it to `store`. If no device responds
/// within `timeout`, the session expires and the user gets an error rather
/// than a silent hang.
pub async fn desktop_login(
    ws_host: &str,
    store: &dyn TokenStore,
    timeout: Duration,
    on_ready: impl FnOnce(&LinkSession),
) -> Result<String> {
    let mut session = LinkSession::new();
    let topic = session.topic();

    let mut transport = PubSubTransport::connect(ws_host).await?;
    if let Err(e) = transport.subscribe(&topic).await {
        transport.close().await;
        return Err(e);
    }

    on_ready(&session);

    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            session.expire();
            transport.close().await;
            return Err(LinkError::SessionExpired.into());
        }

        let next = tokio::time::timeout(remaining, transport.next_message()).await;
        match next {
            Err(_elapsed) => {
                session.expire();
                transport.close().await;
                return Err(LinkError::SessionExpired.into());
            }
            Ok(Err(e)) => {
                transport.close().await;
                return Err(e);
            }
            Ok(Ok(None)) => {
                transport.close().await;
                return Err(LinkError::Transport("Connection closed by server".into()).into());
            }
            Ok(Ok(Some(message))) => {
                // Stray traffic on other channels is not ours to judge
                if message.topic != topic {
                    continue;
                }
                let Some(token) = message.payload.get("token").and_then(|t| t.as_str()) else {
                    transport.close().await;
                    return Err(LinkError::BadMessage(
                        "login message without a token field".into(),
                    )
                    .into());
                };

                // The subscription is released whether or not the token
                // can be accepted and persisted
                let accepted = session
                    .complete(token.to_string())
                    .and_then(|_| store.save(token));
                transport.close().await;
                accepted?;

                info!("Desktop login completed for session {}", session.id());
                return Ok(token.to_string());
            }
        }
    }
}

/// Run the mobile side: publish this device's token on the session channel
/// decoded from a desktop's QR code.
pub async fn approve_login(ws_host: &str, session_id: &str, token: &str) -> Result<()> {
    let topic = format!("{LOGIN_TOPIC_PREFIX}{session_id}");

    let mut transport = PubSubTransport::connect(ws_host).await?;
    let result = transport.publish(&topic, &json!({ "token": token })).await;
    transport.close().await;
    result?;

    info!("Approved desktop login session {session_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryTokenStore, TokenStore};
    use crate::error::Error;
    use futures::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    /// Bind a throwaway broker that answers the first subscribe on a
    /// connection with one message built by `reply`.
    async fn spawn_broker(
        reply: impl Fn(&str) -> Option<String> + Send + 'static,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();

            while let Some(Ok(frame)) = ws.next().await {
                let WsMessage::Text(text) = frame else { continue };
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                if value["action"] == "subscribe" {
                    let topic = value["topic"].as_str().unwrap();
                    if let Some(response) = reply(topic) {
                        ws.send(WsMessage::Text(response.into())).await.unwrap();
                    }
                }
            }
        });

        format!("ws://{addr}")
    }

    #[tokio::test]
    async fn test_desktop_login_completes_and_persists_token() {
        let url = spawn_broker(|topic| {
            Some(format!(
                r#"{{"topic": "{topic}", "payload": {{"token": "tok-mobile"}}}}"#
            ))
        })
        .await;

        let store = MemoryTokenStore::new(None);
        let mut rendered_id = String::new();
        let token = desktop_login(&url, &store, Duration::from_secs(5), |session| {
            rendered_id = session.id().to_string();
        })
        .await
        .unwrap();

        assert_eq!(token, "tok-mobile");
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-mobile"));
        assert!(!rendered_id.is_empty());
    }

    #[tokio::test]
    async fn test_desktop_login_expires_when_no_device_responds() {
        let url = spawn_broker(|_topic| None).await;

        let store = MemoryTokenStore::new(None);
        let err = desktop_login(&url, &store, Duration::from_millis(100), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Link(LinkError::SessionExpired)));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_desktop_login_rejects_message_without_token() {
        let url = spawn_broker(|topic| {
            Some(format!(r#"{{"topic": "{topic}", "payload": {{}}}}"#))
        })
        .await;

        let store = MemoryTokenStore::new(None);
        let err = desktop_login(&url, &store, Duration::from_secs(5), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Link(LinkError::BadMessage(_))));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_desktop_login_ignores_other_channels() {
        let url = spawn_broker(|_topic| {
            // A message for someone else's session
            Some(r#"{"topic": "supplymind/login/other", "payload": {"token": "wrong"}}"#.to_string())
        })
        .await;

        let store = MemoryTokenStore::new(None);
        let err = desktop_login(&url, &store, Duration::from_millis(200), |_| {})
            .await
            .unwrap_err();

        // The stray message is skipped; the session then times out
        assert!(matches!(err, Error::Link(LinkError::SessionExpired)));
    }

    struct RejectingStore;

    impl TokenStore for RejectingStore {
        fn load(&self) -> crate::error::Result<Option<String>> {
            Ok(None)
        }

        fn save(&self, _token: &str) -> crate::error::Result<()> {
            Err(Error::Other("token store unavailable".to_string()))
        }

        fn clear(&self) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_token_save_still_releases_subscription() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            let mut tx = Some(tx);

            while let Some(Ok(frame)) = ws.next().await {
                let WsMessage::Text(text) = frame else { continue };
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                if value["action"] == "subscribe" {
                    let topic = value["topic"].as_str().unwrap();
                    let reply =
                        format!(r#"{{"topic": "{topic}", "payload": {{"token": "tok"}}}}"#);
                    ws.send(WsMessage::Text(reply.into())).await.unwrap();
                } else if value["action"] == "unsubscribe" {
                    if let Some(tx) = tx.take() {
                        tx.send(value["topic"].as_str().unwrap().to_string()).unwrap();
                    }
                }
            }
        });

        let err = desktop_login(
            &format!("ws://{addr}"),
            &RejectingStore,
            Duration::from_secs(5),
            |_| {},
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Other(_)));

        // The channel must be released even though the login failed
        let unsubscribed = rx.await.unwrap();
        assert!(unsubscribed.starts_with(LOGIN_TOPIC_PREFIX));
    }

    #[tokio::test]
    async fn test_approve_login_publishes_token_on_session_channel() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            while let Some(Ok(frame)) = ws.next().await {
                let WsMessage::Text(text) = frame else { continue };
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                if value["action"] == "publish" {
                    tx.send(value).unwrap();
                    break;
                }
            }
        });

        approve_login(&format!("ws://{addr}"), "sess-1", "tok-approver")
            .await
            .unwrap();

        let frame = rx.await.unwrap();
        assert_eq!(frame["topic"], "supplymind/login/sess-1");
        assert_eq!(frame["payload"]["token"], "tok-approver");
    }
}
