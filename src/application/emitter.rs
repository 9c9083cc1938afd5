//! # Response Emitter
//!
//! Formats mention-prefixed replies and queues them for delivery.
//! Handlers never wait on the network: `emit` only enqueues, and a separate
//! delivery task (`deliver`) hands each response to the chat provider.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::traits::ChatProvider;
use crate::domain::types::{Member, OutgoingResponse};

pub type ResponseReceiver = mpsc::UnboundedReceiver<OutgoingResponse>;

#[derive(Debug, Clone)]
pub struct ResponseEmitter {
    tx: mpsc::UnboundedSender<OutgoingResponse>,
}

impl ResponseEmitter {
    pub fn channel() -> (Self, ResponseReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue `"{mention} {body}"` for the channel.
    pub fn emit(&self, channel: &str, author: &Member, body: &str) {
        let response = OutgoingResponse {
            channel: channel.to_string(),
            text: format!("{} {}", author.mention(), body),
        };
        if self.tx.send(response).is_err() {
            tracing::warn!("Delivery task is gone, dropping reply to {}", channel);
        }
    }
}

/// Drains the queue until every emitter is dropped.
pub async fn deliver(mut rx: ResponseReceiver, chat: Arc<dyn ChatProvider>) {
    while let Some(response) = rx.recv().await {
        if let Err(e) = chat.send_message(&response.channel, &response.text).await {
            tracing::warn!("Failed to deliver reply to {}: {}", response.channel, e);
        }
    }
    tracing::debug!("Response queue closed");
}
