//! # comment-cache
//!
//! Redis layer for the comment stream: the paged-listing read cache and the
//! pub/sub channel that fans `new_comment` events out to gateway instances.
//!
//! The cache is an injectable service with explicit get/set/clear and a TTL;
//! nothing in here is a process-global. Cache failures are surfaced as
//! errors and the caller decides whether to degrade (the read path does).

pub mod pages;
pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export page cache types
pub use pages::PageCache;

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, PubSubNotifier, Publisher, ReceivedMessage, Subscriber,
    SubscriberConfig, SubscriberError, SubscriberResult, COMMENTS_CHANNEL,
};
