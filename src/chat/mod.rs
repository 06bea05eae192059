pub mod terminal;

pub use terminal::{OutputFormat, TerminalSink};

use async_trait::async_trait;
use thiserror::Error;

use crate::attachment::Attachment;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write chat output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize chat output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outbound side of the chat framework the listener is plugged into.
/// Must be Send + Sync so pipelines for several links can share it.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Post a plain text message to the channel the message came from.
    async fn send_text(&self, text: &str) -> Result<(), SinkError>;

    /// Post a structured attachment to the same channel.
    async fn send_attachment(&self, attachment: &Attachment) -> Result<(), SinkError>;
}
