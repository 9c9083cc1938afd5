//! # Domain Types
//!
//! Shared data structures used across the application:
//! privilege tiers, members and their roles, inbound/outbound messages,
//! and the board list records fetched from the ticketing service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Privilege tier derived from role membership.
///
/// Variants are declared lowest first so the derived `Ord` follows rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeTier {
    None,
    TrialSupervisor,
    Supervisor,
    SeniorSupervisor,
    InternalAffairs,
    Management,
}

impl PrivilegeTier {
    /// All tiers, highest rank first.
    pub const DESCENDING: [PrivilegeTier; 6] = [
        PrivilegeTier::Management,
        PrivilegeTier::InternalAffairs,
        PrivilegeTier::SeniorSupervisor,
        PrivilegeTier::Supervisor,
        PrivilegeTier::TrialSupervisor,
        PrivilegeTier::None,
    ];

    pub fn rank(self) -> i8 {
        match self {
            PrivilegeTier::Management => 4,
            PrivilegeTier::InternalAffairs => 3,
            PrivilegeTier::SeniorSupervisor => 2,
            PrivilegeTier::Supervisor => 1,
            PrivilegeTier::TrialSupervisor => 0,
            PrivilegeTier::None => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrivilegeTier::Management => "management",
            PrivilegeTier::InternalAffairs => "internal_affairs",
            PrivilegeTier::SeniorSupervisor => "senior_supervisor",
            PrivilegeTier::Supervisor => "supervisor",
            PrivilegeTier::TrialSupervisor => "trial_supervisor",
            PrivilegeTier::None => "none",
        }
    }
}

impl fmt::Display for PrivilegeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a role a member may hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of the message author, built per event by the connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: String,
    pub display_name: Option<String>,
    pub roles: HashSet<RoleId>,
}

impl Member {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            roles: HashSet::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[cfg(test)]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(RoleId::new(role));
        self
    }

    /// Name used in log lines.
    pub fn effective_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }

    /// Markdown pill that Matrix clients render as a user mention.
    ///
    /// The display name is user-controlled, so its markdown is escaped.
    pub fn mention(&self) -> String {
        format!(
            "[{}](https://matrix.to/#/{})",
            escape_markdown(self.effective_name()),
            self.user_id
        )
    }
}

fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '(' | ')' | '*' | '_' | '`' | '~' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A text message delivered by the chat connector.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author: Member,
    pub text: String,
    pub channel: String,
    pub timestamp: DateTime<Utc>,
    /// True when the bot itself sent the message.
    pub from_self: bool,
}

/// A reply queued for delivery. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingResponse {
    pub channel: String,
    pub text: String,
}

/// A list on a ticketing board (`GET /boards/{id}/lists`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub pos: Option<f64>,
    #[serde(default)]
    pub id_board: Option<String>,
}

impl fmt::Display for BoardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoardList [id={}, name={}, closed={}, idBoard={}]",
            self.id,
            self.name,
            self.closed,
            self.id_board.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering_follows_rank() {
        assert!(PrivilegeTier::Management > PrivilegeTier::InternalAffairs);
        assert!(PrivilegeTier::TrialSupervisor > PrivilegeTier::None);
        for pair in PrivilegeTier::DESCENDING.windows(2) {
            assert!(pair[0] > pair[1]);
            assert!(pair[0].rank() > pair[1].rank());
        }
        assert_eq!(PrivilegeTier::None.rank(), -1);
    }

    #[test]
    fn test_mention_uses_display_name() {
        let member = Member::new("@alice:example.org").with_display_name("Alice");
        assert_eq!(
            member.mention(),
            "[Alice](https://matrix.to/#/@alice:example.org)"
        );
        assert_eq!(Member::new("@bob:example.org").effective_name(), "@bob:example.org");
    }

    #[test]
    fn test_mention_escapes_display_name() {
        let member = Member::new("@eve:example.org").with_display_name("Eve](http://evil)");
        assert_eq!(
            member.mention(),
            r"[Eve\]\(http://evil\)](https://matrix.to/#/@eve:example.org)"
        );

        let member = Member::new("@mal:example.org").with_display_name("*bold* _x_ `c` <b>");
        assert_eq!(
            member.mention(),
            r"[\*bold\* \_x\_ \`c\` \<b\>](https://matrix.to/#/@mal:example.org)"
        );
    }

    #[test]
    fn test_board_list_ignores_unknown_fields() {
        let json = r#"{"id":"a1","name":"Reports","closed":false,"idBoard":"b","subscribed":true}"#;
        let list: BoardList = serde_json::from_str(json).unwrap();
        assert_eq!(list.name, "Reports");
        assert_eq!(list.id_board.as_deref(), Some("b"));
    }
}
