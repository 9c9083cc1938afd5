//! # Unknown Command
//!
//! Reply for gated messages that match none of the author's tier commands.

use crate::application::emitter::ResponseEmitter;
use crate::domain::types::IncomingMessage;

pub fn handle_unknown(emitter: &ResponseEmitter, message: &IncomingMessage, prefix: &str) {
    emitter.emit(
        &message.channel,
        &message.author,
        &crate::strings::messages::unknown_command(prefix),
    );
}
