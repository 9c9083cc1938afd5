//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, BoardSource, RosterProvider).

pub mod matrix;
pub mod trello;
