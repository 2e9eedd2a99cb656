//! Pub/sub transport over a broker-fronting WebSocket.
//!
//! One underlying socket per transport; subscribe/publish are JSON frames.
//! Message ordering on a channel is the broker's guarantee, not enforced
//! here, and this client registers at most one handler per channel. The
//! connection is an owned resource: every exit path of the owning flow
//! must call [`PubSubTransport::close`].

use futures::{SinkExt, StreamExt};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::{LinkError, Result};

/// Outbound control frames understood by the broker gateway
#[derive(Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum OutboundFrame<'a> {
    Subscribe { topic: &'a str },
    Unsubscribe { topic: &'a str },
    Publish { topic: &'a str, payload: &'a Value },
}

/// A message delivered on a subscribed channel
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Value,
}

/// Pub/sub connection for the login handshake
pub struct PubSubTransport {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    subscribed: Vec<String>,
}

impl PubSubTransport {
    /// Open the underlying socket
    pub async fn connect(url: &str) -> Result<Self> {
        debug!("Connecting to realtime endpoint {url}");
        let (ws, _response) = connect_async(url)
            .await
            .map_err(|e| LinkError::Transport(format!("Failed to connect: {e}")))?;
        Ok(Self {
            ws,
            subscribed: Vec::new(),
        })
    }

    /// Subscribe to a channel
    pub async fn subscribe(&mut self, topic: &str) -> Result<()> {
        self.send_frame(&OutboundFrame::Subscribe { topic }).await?;
        self.subscribed.push(topic.to_string());
        debug!("Subscribed to {topic}");
        Ok(())
    }

    /// Publish a payload on a channel
    pub async fn publish(&mut self, topic: &str, payload: &Value) -> Result<()> {
        self.send_frame(&OutboundFrame::Publish { topic, payload })
            .await?;
        debug!("Published to {topic}");
        Ok(())
    }

    /// Wait for the next message on any subscribed channel.
    ///
    /// Returns `None` when the server closes the connection.
    pub async fn next_message(&mut self) -> Result<Option<InboundMessage>> {
        while let Some(frame) = self.ws.next().await {
            let frame = frame.map_err(|e| LinkError::Transport(e.to_string()))?;
            match frame {
                WsMessage::Text(text) => {
                    let message: InboundMessage = serde_json::from_str(&text)
                        .map_err(|e| LinkError::BadMessage(e.to_string()))?;
                    return Ok(Some(message));
                }
                WsMessage::Close(_) => return Ok(None),
                // Ping/pong handled by tungstenite; binary frames are not
                // part of this protocol
                _ => continue,
            }
        }
        Ok(None)
    }

    /// Release subscriptions and close the socket.
    ///
    /// Send failures are ignored; the connection is going away either way.
    pub async fn close(mut self) {
        for topic in std::mem::take(&mut self.subscribed) {
            let _ = self
                .send_frame(&OutboundFrame::Unsubscribe { topic: &topic })
                .await;
        }
        let _ = self.ws.close(None).await;
        debug!("Realtime connection closed");
    }

    async fn send_frame(&mut self, frame: &OutboundFrame<'_>) -> Result<()> {
        let json = serde_json::to_string(frame)?;
        self.ws
            .send(WsMessage::Text(json.into()))
            .await
            .map_err(|e| LinkError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_frame_shape() {
        let frame = OutboundFrame::Subscribe {
            topic: "supplymind/login/abc",
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["action"], "subscribe");
        assert_eq!(json["topic"], "supplymind/login/abc");
    }

    #[test]
    fn test_publish_frame_shape() {
        let payload = serde_json::json!({ "token": "tok-1" });
        let frame = OutboundFrame::Publish {
            topic: "supplymind/login/abc",
            payload: &payload,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["action"], "publish");
        assert_eq!(json["payload"]["token"], "tok-1");
    }

    #[test]
    fn test_inbound_message_parses() {
        let message: InboundMessage = serde_json::from_str(
            r#"{"topic": "supplymind/login/abc", "payload": {"token": "tok-1"}}"#,
        )
        .unwrap();
        assert_eq!(message.topic, "supplymind/login/abc");
        assert_eq!(message.payload["token"], "tok-1");
    }
}
