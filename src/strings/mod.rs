//! # Strings Module
//!
//! Centralizes user-facing strings, help text and shared log lines.
//! Ensures consistency in messaging and easier updates.

pub mod help;
pub mod logs;
pub mod messages;
