//! # History Command
//!
//! Handles `history` / `ia`.
//! Fetches the ticketing board's lists and logs each record. Nothing is sent to the chat,
//! on success or on failure.

use crate::domain::traits::{BoardSource, TicketingError};
use crate::domain::types::BoardList;

pub fn decode_board_lists(body: &str) -> Result<Vec<BoardList>, TicketingError> {
    Ok(serde_json::from_str(body)?)
}

pub async fn fetch_history(source: &dyn BoardSource) -> Result<Vec<BoardList>, TicketingError> {
    let body = source.fetch_board_lists().await?;
    decode_board_lists(&body)
}

/// Returns the number of records logged. Failures are logged and swallowed here.
pub async fn handle_history(source: &dyn BoardSource) -> usize {
    match fetch_history(source).await {
        Ok(lists) => {
            for list in &lists {
                tracing::info!("{}", list);
            }
            lists.len()
        }
        Err(e) => {
            tracing::error!("{}", crate::strings::logs::history_failed(&e.to_string()));
            0
        }
    }
}
