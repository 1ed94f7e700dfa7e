//! the seam between the plugin and the chat framework hosting it
use {
    crate::{error::Result, format::DisplayPayload},
    async_trait::async_trait,
};

/// A chat framework that can deliver messages to a group
#[async_trait]
pub trait ChatHost: Send + Sync {
    /// deliver a message to `group`
    ///
    /// an error means the message (or its image) couldn't be delivered
    async fn send(&self, group: &str, payload: &DisplayPayload) -> Result<()>;
}
