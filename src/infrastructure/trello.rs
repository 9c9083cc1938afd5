//! # Trello Client
//!
//! Implements `BoardSource` against the Trello REST API:
//! `GET {base_url}/boards/{board_id}/lists?key=..&token=..`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::config::TrelloConfig;
use crate::domain::traits::{BoardSource, TicketingError};

pub struct TrelloClient {
    http: Client,
    lists_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(config: &TrelloConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            lists_url: lists_url(&config.base_url, &config.board_id),
            key: config.resolve_key()?,
            token: config.resolve_token()?,
        })
    }
}

fn lists_url(base_url: &str, board_id: &str) -> String {
    format!("{}/boards/{}/lists", base_url.trim_end_matches('/'), board_id)
}

/// Strips the URL so credentials in the query string never reach the logs.
fn request_error(e: reqwest::Error) -> TicketingError {
    if e.is_timeout() {
        TicketingError::Timeout
    } else {
        TicketingError::Http(e.without_url().to_string())
    }
}

#[async_trait]
impl BoardSource for TrelloClient {
    async fn fetch_board_lists(&self) -> Result<String, TicketingError> {
        tracing::debug!("Fetching board lists from {}", self.lists_url);
        let response = self
            .http
            .get(&self.lists_url)
            .query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;
        if !status.is_success() {
            return Err(TicketingError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
