use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use uuid::Uuid;

use super::traits::{Channel, InboundMessage};

/// Terminal channel — stdin/stdout, always available, zero deps
pub struct TerminalChannel;

impl TerminalChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Channel for TerminalChannel {
    fn name(&self) -> &str {
        "terminal"
    }

    fn send<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            println!("{message}");
            Ok(())
        })
    }

    fn listen<'a>(
        &'a self,
        tx: tokio::sync::mpsc::Sender<InboundMessage>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                let msg = InboundMessage {
                    id: Uuid::new_v4().to_string(),
                    sender: "user".to_string(),
                    content: line,
                    received_at: Utc::now(),
                };

                if tx.send(msg).await.is_err() {
                    break;
                }
            }
            Ok(())
        })
    }
}
