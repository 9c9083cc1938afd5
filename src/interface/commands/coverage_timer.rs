//! # Coverage Timer Command
//!
//! Handles `set_coverage_timer <minutes>` (opt-in, management only).
//! Updates the supervisor coverage check interval; takes effect on the next check.

use crate::application::emitter::ResponseEmitter;
use crate::application::settings::CoverageSettings;
use crate::domain::types::IncomingMessage;
use crate::strings::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerArgError {
    /// Missing, non-numeric or outside the `i32` range.
    Invalid,
    /// Zero or negative.
    TooSmall,
}

/// Minutes from the second whitespace-separated token.
pub fn parse_minutes(text: &str) -> Result<i32, TimerArgError> {
    let minutes: i32 = text
        .split_whitespace()
        .nth(1)
        .ok_or(TimerArgError::Invalid)?
        .parse()
        .map_err(|_| TimerArgError::Invalid)?;
    if minutes > 0 {
        Ok(minutes)
    } else {
        Err(TimerArgError::TooSmall)
    }
}

pub fn handle_set_coverage_timer(
    emitter: &ResponseEmitter,
    settings: &CoverageSettings,
    message: &IncomingMessage,
    prefix: &str,
) {
    let reply = match parse_minutes(&message.text) {
        Ok(minutes) => {
            settings.set_interval_minutes(minutes as u64);
            messages::coverage_timer_set(minutes)
        }
        Err(TimerArgError::TooSmall) => messages::coverage_timer_too_small(prefix),
        Err(TimerArgError::Invalid) => messages::coverage_timer_invalid(prefix),
    };
    emitter.emit(&message.channel, &message.author, &reply);
}
