use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

/// A raw user message received from a channel.
///
/// `received_at` carries millisecond resolution; the dispatcher's debounce
/// window is measured against it.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

/// Presentation channel — implement for any surface that can read user
/// text and print bot turns. The core only needs these two primitives.
pub trait Channel: Send + Sync {
    /// Human-readable channel name
    fn name(&self) -> &str;

    /// Send one rendered line through this channel
    fn send<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    /// Start listening for incoming messages (long-running)
    fn listen<'a>(
        &'a self,
        tx: tokio::sync::mpsc::Sender<InboundMessage>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}
