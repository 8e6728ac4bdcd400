//! Notifier port implementation over Redis Pub/Sub

use async_trait::async_trait;

use comment_core::traits::{GatewayError, Notifier};

use crate::pubsub::Publisher;

/// `Notifier` implementation that publishes to the shared comments channel
#[derive(Clone)]
pub struct PubSubNotifier {
    publisher: Publisher,
}

impl PubSubNotifier {
    /// Create a new notifier over the given publisher
    #[must_use]
    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl Notifier for PubSubNotifier {
    async fn publish_new_comment(&self, comment: &serde_json::Value) -> Result<(), GatewayError> {
        self.publisher
            .publish_new_comment(comment.clone())
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::Publish(e.to_string()))
    }
}
