//! # Help Text
//!
//! Help banner displayed to management via the `help` / `?` commands.

pub const BANNER: &str = "**Roblox Discord Services | Help**";

pub fn main(prefix: &str) -> String {
    format!("{BANNER}\nPrefix for all commands: `{prefix}<command>`\nNothing to see here...")
}
