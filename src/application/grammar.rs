//! # Command Grammar
//!
//! The tier-independent command gate plus, for each privilege tier, the ordered list of
//! command patterns that tier may use. Patterns are full-text, case-sensitive matches.

use regex::Regex;
use std::collections::HashMap;

use crate::domain::types::PrivilegeTier;

/// Handler a matched command is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    History,
    SetCoverageTimer,
}

/// What happens when a gated message matches none of the tier's patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmatched {
    Reply,
    Ignore,
}

#[derive(Debug, Clone)]
pub struct Command {
    pattern: Regex,
    kind: CommandKind,
}

#[derive(Debug, Clone)]
struct TierGrammar {
    commands: Vec<Command>,
    unmatched: Unmatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarMatch {
    Command(CommandKind),
    /// Passed the gate, no pattern matched.
    Unknown,
    /// Passed the gate in a tier without commands.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct CommandGrammar {
    prefix: String,
    gate: Regex,
    tiers: HashMap<PrivilegeTier, TierGrammar>,
}

impl CommandGrammar {
    pub fn new(prefix: &str, coverage_timer: bool) -> Result<Self, regex::Error> {
        let p = regex::escape(prefix);
        let command = |pattern: String, kind| -> Result<Command, regex::Error> {
            Ok(Command {
                pattern: Regex::new(&pattern)?,
                kind,
            })
        };

        let mut management = Vec::new();
        if coverage_timer {
            management.push(command(
                format!(r"(?s)^{p}set_coverage_timer(\s.*)?$"),
                CommandKind::SetCoverageTimer,
            )?);
        }
        management.push(command(format!("^{p}help$"), CommandKind::Help)?);
        management.push(command(format!(r"^{p}\?$"), CommandKind::Help)?);

        let internal_affairs = vec![command(
            format!("^{p}(history|ia)$"),
            CommandKind::History,
        )?];

        let mut tiers = HashMap::new();
        for tier in PrivilegeTier::DESCENDING {
            let grammar = match tier {
                PrivilegeTier::Management => TierGrammar {
                    commands: management.clone(),
                    unmatched: Unmatched::Reply,
                },
                PrivilegeTier::InternalAffairs => TierGrammar {
                    commands: internal_affairs.clone(),
                    unmatched: Unmatched::Reply,
                },
                // No commands defined for the lower tiers.
                _ => TierGrammar {
                    commands: Vec::new(),
                    unmatched: Unmatched::Ignore,
                },
            };
            tiers.insert(tier, grammar);
        }

        Ok(Self {
            prefix: prefix.to_string(),
            gate: Regex::new(&format!("(?s)^{p}.+$"))?,
            tiers,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the text is shaped like a command at all.
    pub fn passes_gate(&self, text: &str) -> bool {
        self.gate.is_match(text)
    }

    /// Tier-scoped match. First pattern in declaration order wins.
    pub fn match_tier(&self, tier: PrivilegeTier, text: &str) -> GrammarMatch {
        let Some(grammar) = self.tiers.get(&tier) else {
            return GrammarMatch::Ignored;
        };
        if let Some(cmd) = grammar.commands.iter().find(|c| c.pattern.is_match(text)) {
            return GrammarMatch::Command(cmd.kind);
        }
        match grammar.unmatched {
            Unmatched::Reply => GrammarMatch::Unknown,
            Unmatched::Ignore => GrammarMatch::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl CommandGrammar {
        /// Gate then tier match; `None` when the gate fails.
        fn match_command(&self, tier: PrivilegeTier, text: &str) -> Option<GrammarMatch> {
            self.passes_gate(text).then(|| self.match_tier(tier, text))
        }

        fn commands_for(&self, tier: PrivilegeTier) -> Vec<CommandKind> {
            self.tiers
                .get(&tier)
                .map(|g| g.commands.iter().map(|c| c.kind).collect())
                .unwrap_or_default()
        }
    }

    fn grammar() -> CommandGrammar {
        CommandGrammar::new("rdss:", false).unwrap()
    }

    #[test]
    fn test_gate() {
        let g = grammar();
        assert!(g.passes_gate("rdss:help"));
        assert!(g.passes_gate("rdss:anything at all"));
        assert!(!g.passes_gate("rdss:"));
        assert!(!g.passes_gate("hello rdss:help"));
        assert!(!g.passes_gate("RDSS:help"));
        assert!(!g.passes_gate(""));
    }

    #[test]
    fn test_management_commands() {
        let g = grammar();
        let m = PrivilegeTier::Management;
        assert_eq!(g.match_command(m, "rdss:help"), Some(GrammarMatch::Command(CommandKind::Help)));
        assert_eq!(g.match_command(m, "rdss:?"), Some(GrammarMatch::Command(CommandKind::Help)));
        assert_eq!(g.match_command(m, "rdss:help me"), Some(GrammarMatch::Unknown));
        assert_eq!(g.match_command(m, "rdss:ia"), Some(GrammarMatch::Unknown));
        assert_eq!(g.match_command(m, "rdss:frobnicate"), Some(GrammarMatch::Unknown));
        assert_eq!(g.match_command(m, "not a command"), None);
    }

    #[test]
    fn test_internal_affairs_commands() {
        let g = grammar();
        let ia = PrivilegeTier::InternalAffairs;
        assert_eq!(g.match_command(ia, "rdss:ia"), Some(GrammarMatch::Command(CommandKind::History)));
        assert_eq!(g.match_command(ia, "rdss:history"), Some(GrammarMatch::Command(CommandKind::History)));
        // Tier buckets are exact: management's help is not visible here.
        assert_eq!(g.match_command(ia, "rdss:help"), Some(GrammarMatch::Unknown));
    }

    #[test]
    fn test_lower_tiers_ignore_everything() {
        let g = grammar();
        for tier in [
            PrivilegeTier::SeniorSupervisor,
            PrivilegeTier::Supervisor,
            PrivilegeTier::TrialSupervisor,
            PrivilegeTier::None,
        ] {
            assert!(g.commands_for(tier).is_empty());
            for text in ["rdss:help", "rdss:ia", "rdss:whatever"] {
                assert_eq!(g.match_command(tier, text), Some(GrammarMatch::Ignored));
            }
        }
    }

    #[test]
    fn test_coverage_timer_opt_in() {
        let m = PrivilegeTier::Management;
        assert_eq!(grammar().match_command(m, "rdss:set_coverage_timer 5"), Some(GrammarMatch::Unknown));

        let enabled = CommandGrammar::new("rdss:", true).unwrap();
        assert_eq!(
            enabled.match_command(m, "rdss:set_coverage_timer 5"),
            Some(GrammarMatch::Command(CommandKind::SetCoverageTimer))
        );
        assert_eq!(
            enabled.match_command(m, "rdss:set_coverage_timer"),
            Some(GrammarMatch::Command(CommandKind::SetCoverageTimer))
        );
        assert_eq!(
            enabled.commands_for(m),
            vec![CommandKind::SetCoverageTimer, CommandKind::Help, CommandKind::Help]
        );
        assert_eq!(
            enabled.match_command(PrivilegeTier::InternalAffairs, "rdss:set_coverage_timer 5"),
            Some(GrammarMatch::Unknown)
        );
    }

    #[test]
    fn test_prefix_is_escaped() {
        let g = CommandGrammar::new("!bot.", false).unwrap();
        assert_eq!(
            g.match_command(PrivilegeTier::Management, "!bot.help"),
            Some(GrammarMatch::Command(CommandKind::Help))
        );
        assert_eq!(g.match_command(PrivilegeTier::Management, "!botxhelp"), None);
    }
}
