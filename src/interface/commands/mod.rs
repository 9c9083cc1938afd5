//! # Command Handlers
//!
//! Contains the handler for each recognized command.
//! These handlers are invoked by the Dispatcher and own all side effects of their command.

pub mod coverage_timer;
pub mod help;
pub mod history;
pub mod unknown;
