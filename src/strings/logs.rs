//! # Log Messages
//!
//! Operator-facing log lines that are shared between modules.

pub const STARTING: &str = "Starting RDSS bot...";

pub fn login_success(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn command_received(author: &str, text: &str) -> String {
    format!("Command received from authorized user {author}: {text}")
}

pub fn history_failed(err: &str) -> String {
    format!("History lookup failed: {err}")
}

pub fn coverage_low(room: &str, count: usize, minimum: usize) -> String {
    format!("Supervisor coverage low in {room}: {count} on duty, minimum {minimum}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}
