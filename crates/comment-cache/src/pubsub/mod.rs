//! Pub/Sub fan-out for live comment updates

mod channels;
mod notifier;
mod publisher;
mod subscriber;

pub use channels::{PubSubChannel, COMMENTS_CHANNEL};
pub use notifier::PubSubNotifier;
pub use publisher::{PubSubEvent, Publisher};
pub use subscriber::{ReceivedMessage, Subscriber, SubscriberConfig, SubscriberError, SubscriberResult};
