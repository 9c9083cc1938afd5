//! # Help Command
//!
//! Handles `help` / `?`.
//! Replies with the help banner, mentioning the author.

use crate::application::emitter::ResponseEmitter;
use crate::domain::types::IncomingMessage;

pub fn handle_help(emitter: &ResponseEmitter, message: &IncomingMessage, prefix: &str) {
    emitter.emit(
        &message.channel,
        &message.author,
        &crate::strings::help::main(prefix),
    );
}
