//! Pub/Sub channel definitions.
//!
//! The service has exactly one broadcast group: every connected client
//! subscribes to the shared comment stream. No per-user or per-thread
//! filtering exists.

/// Channel carrying all comment stream events
pub const COMMENTS_CHANNEL: &str = "comments";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// The shared comment stream (all connected clients)
    Comments,
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Create the comments channel
    #[must_use]
    pub fn comments() -> Self {
        Self::Comments
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Comments => COMMENTS_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == COMMENTS_CHANNEL {
            Self::Comments
        } else {
            Self::Custom(name.to_string())
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(PubSubChannel::comments().name(), "comments");
        assert_eq!(PubSubChannel::custom("test").name(), "test");
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(PubSubChannel::parse("comments"), PubSubChannel::Comments);
        assert_eq!(
            PubSubChannel::parse("other"),
            PubSubChannel::Custom("other".to_string())
        );
    }
}
