//! # Messages
//!
//! Contains constant strings and format functions for user-facing replies.
//! Every reply is sent prefixed with the author's mention.

pub fn unknown_command(prefix: &str) -> String {
    format!("Sorry, I don't know that command.\n*Use {prefix}? or {prefix}help for assistance.*")
}

pub fn coverage_timer_set(minutes: i32) -> String {
    format!("Supervisor Monitoring check interval set to {minutes} minutes. Effective on next check.")
}

pub fn coverage_timer_too_small(prefix: &str) -> String {
    format!(
        "Supervisor Monitoring check interval must be at least 1 minute.\n[SYNTAX: `{prefix}set_coverage_timer 1-9999`]"
    )
}

pub fn coverage_timer_invalid(prefix: &str) -> String {
    format!("Incorrect value. SYNTAX: `{prefix}set_coverage_timer 1-9999`")
}
