//! # Application Layer
//!
//! Contains the core logic of the bot: role resolution, the command grammar,
//! dispatch, reply emission and the supervisor coverage check.

pub mod coverage;
pub mod dispatcher;
pub mod emitter;
pub mod grammar;
pub mod roles;
pub mod settings;
