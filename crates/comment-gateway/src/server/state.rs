//! Gateway state

use std::sync::Arc;

use comment_cache::Subscriber;

/// Shared state for the gateway: the Redis subscriber feeding all
/// connections
#[derive(Clone)]
pub struct GatewayState {
    subscriber: Arc<Subscriber>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(subscriber: Arc<Subscriber>) -> Self {
        Self { subscriber }
    }

    /// Get the event subscriber
    pub fn subscriber(&self) -> &Subscriber {
        &self.subscriber
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("receivers", &self.subscriber.receiver_count())
            .finish()
    }
}
