//! Redis Pub/Sub publisher.
//!
//! Publishes comment stream events to Redis for distribution to connected
//! WebSocket clients.

use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Wire event for the comment stream.
///
/// This is exactly the payload subscribers receive:
/// `{"type": "new_comment", "comment": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "new_comment")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Serialized comment
    pub comment: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, comment: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            comment,
        }
    }

    /// Create a `new_comment` event
    #[must_use]
    pub fn new_comment(comment: serde_json::Value) -> Self {
        Self::new("new_comment", comment)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel, returning the receiver count
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a `new_comment` event to the shared stream
    pub async fn publish_new_comment(&self, comment: serde_json::Value) -> RedisResult<u32> {
        let event = PubSubEvent::new_comment(comment);
        self.publish(&PubSubChannel::comments(), &event).await
    }
}
