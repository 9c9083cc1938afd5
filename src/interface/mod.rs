//! # Interface Layer
//!
//! Command handlers invoked by the dispatcher.

pub mod commands;
