mod console;
mod error;
mod mastodon;

#[cfg(test)]
mod tests;

pub use console::ConsolePublisher;
pub use error::PublishError;
pub use mastodon::{MastodonClient, StatusRequest, Visibility};

use async_trait::async_trait;

/// A destination that accepts one bounded message at a time
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Longest message, in characters, this publisher accepts
    fn max_length(&self) -> usize;

    /// Post a single message.
    ///
    /// Fails with [`PublishError::TooLong`] without sending anything when
    /// `text` is longer than [`Publisher::max_length`].
    async fn publish(&self, text: &str) -> Result<(), PublishError>;
}

/// Shared precondition check for publishers
pub(crate) fn check_length(text: &str, max: usize) -> Result<(), PublishError> {
    let length = text.chars().count();
    if length > max {
        return Err(PublishError::TooLong { length, max });
    }
    Ok(())
}
