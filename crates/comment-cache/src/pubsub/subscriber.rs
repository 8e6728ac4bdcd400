//! Redis Pub/Sub subscriber.
//!
//! Listens on the shared comments channel and re-broadcasts received events
//! in-process for the gateway to fan out to WebSocket clients. Reconnects
//! with a fixed delay if the Redis connection drops.

use futures_util::StreamExt;
use tokio::sync::broadcast;

use crate::pubsub::{PubSubChannel, PubSubEvent, COMMENTS_CHANNEL};

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to parse event: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Received message from Pub/Sub
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Channel the message was received on
    pub channel: PubSubChannel,
    /// Parsed event (if valid JSON)
    pub event: Option<PubSubEvent>,
    /// Raw payload, forwarded verbatim to WebSocket clients
    pub payload: String,
}

impl ReceivedMessage {
    fn from_redis(channel_name: &str, payload: String) -> Self {
        let channel = PubSubChannel::parse(channel_name);
        let event = serde_json::from_str(&payload).ok();

        Self {
            channel,
            event,
            payload,
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Channel buffer size for broadcast
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Redis Pub/Sub subscriber for the comments channel
pub struct Subscriber {
    broadcast_tx: broadcast::Sender<ReceivedMessage>,
}

impl Subscriber {
    /// Create a new subscriber and start the background listener
    #[must_use]
    pub fn spawn(config: SubscriberConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_buffer);
        let tx = broadcast_tx.clone();

        tokio::spawn(Self::listener_loop(config, tx));

        Self { broadcast_tx }
    }

    /// Get a receiver for re-broadcast messages
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ReceivedMessage> {
        self.broadcast_tx.subscribe()
    }

    /// Number of in-process receivers currently attached
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.broadcast_tx.receiver_count()
    }

    async fn listener_loop(config: SubscriberConfig, tx: broadcast::Sender<ReceivedMessage>) {
        loop {
            if let Err(e) = Self::run_listener(&config, &tx).await {
                tracing::error!(error = %e, "Subscriber connection lost, reconnecting...");
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(config.reconnect_delay_ms))
                .await;
        }
    }

    async fn run_listener(
        config: &SubscriberConfig,
        tx: &broadcast::Sender<ReceivedMessage>,
    ) -> SubscriberResult<()> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;
        pubsub.subscribe(COMMENTS_CHANNEL).await?;

        tracing::info!(channel = COMMENTS_CHANNEL, "Subscribed to comment events");

        let mut stream = pubsub.on_message();
        while let Some(msg) = stream.next().await {
            let channel_name = msg.get_channel_name().to_string();
            let payload: String = msg.get_payload()?;

            let received = ReceivedMessage::from_redis(&channel_name, payload);
            // Send fails only when no receiver is attached; that's fine
            let _ = tx.send(received);
        }

        Err(SubscriberError::Connection(
            "message stream ended".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_received_message_parses_event() {
        let payload = r#"{"type":"new_comment","comment":{"id":"1"}}"#.to_string();
        let msg = ReceivedMessage::from_redis("comments", payload);

        assert_eq!(msg.channel, PubSubChannel::Comments);
        let event = msg.event.expect("payload should parse");
        assert_eq!(event.event_type, "new_comment");
    }

    #[test]
    fn test_received_message_tolerates_junk() {
        let msg = ReceivedMessage::from_redis("comments", "not json".to_string());
        assert!(msg.event.is_none());
        assert_eq!(msg.payload, "not json");
    }

    #[test]
    fn test_default_config() {
        let config = SubscriberConfig::default();
        assert_eq!(config.broadcast_buffer, 1024);
        assert_eq!(config.reconnect_delay_ms, 1000);
    }
}
