//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (chat connector, ticketing board).
//! Allows for pluggable implementations in the Infrastructure layer and fakes in tests.

use crate::domain::types::Member;
use async_trait::async_trait;
use thiserror::Error;

/// Abstract interface for a Chat Provider (e.g., Matrix)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a markdown message to a room, returning the event id
    async fn send_message(&self, channel: &str, content: &str) -> Result<String, String>;
}

/// Failures talking to the ticketing service.
#[derive(Debug, Error)]
pub enum TicketingError {
    #[error("request to ticketing service failed: {0}")]
    Http(String),
    #[error("ticketing service timed out")]
    Timeout,
    #[error("ticketing service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode board lists: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of board list data for the history command.
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Fetch the raw JSON body of the configured board's lists
    async fn fetch_board_lists(&self) -> Result<String, TicketingError>;
}

/// Roster lookup used by the coverage check.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Joined members of a room, with their held roles
    async fn joined_members(&self, channel: &str) -> Result<Vec<Member>, String>;
}
