//! # Command Dispatcher
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! Applies the command gate, resolves the author's privilege tier, matches the tier's
//! grammar and invokes at most one handler. Dispatch itself never fails.

use std::sync::Arc;

use crate::application::emitter::ResponseEmitter;
use crate::application::grammar::{CommandGrammar, CommandKind, GrammarMatch};
use crate::application::roles::RoleResolver;
use crate::application::settings::CoverageSettings;
use crate::domain::config::AppConfig;
use crate::domain::traits::BoardSource;
use crate::domain::types::IncomingMessage;
use crate::interface::commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SelfAuthored,
    NotACommand,
    NoCommandsForTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Handled(CommandKind),
    UnknownCommand,
}

pub struct CommandDispatcher {
    grammar: CommandGrammar,
    resolver: RoleResolver,
    emitter: ResponseEmitter,
    board: Arc<dyn BoardSource>,
    settings: CoverageSettings,
}

impl CommandDispatcher {
    pub fn new(
        grammar: CommandGrammar,
        resolver: RoleResolver,
        emitter: ResponseEmitter,
        board: Arc<dyn BoardSource>,
        settings: CoverageSettings,
    ) -> Self {
        Self {
            grammar,
            resolver,
            emitter,
            board,
            settings,
        }
    }

    pub fn from_config(
        config: &AppConfig,
        emitter: ResponseEmitter,
        board: Arc<dyn BoardSource>,
        settings: CoverageSettings,
    ) -> Result<Self, regex::Error> {
        let grammar = CommandGrammar::new(&config.commands.prefix, config.commands.coverage_timer)?;
        if config.commands.coverage_timer {
            tracing::info!("set_coverage_timer command enabled");
        }
        Ok(Self::new(
            grammar,
            RoleResolver::new(&config.roles),
            emitter,
            board,
            settings,
        ))
    }

    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    /// Cheap pre-check so connectors can skip role lookups for ordinary chatter.
    pub fn is_candidate(&self, message: &IncomingMessage) -> bool {
        !message.from_self && self.grammar.passes_gate(&message.text)
    }

    pub async fn dispatch(&self, message: &IncomingMessage) -> DispatchOutcome {
        if message.from_self {
            return DispatchOutcome::Ignored(IgnoreReason::SelfAuthored);
        }

        let text = message.text.as_str();
        if !self.grammar.passes_gate(text) {
            return DispatchOutcome::Ignored(IgnoreReason::NotACommand);
        }

        let tier = self.resolver.resolve(&message.author.roles);
        tracing::debug!(
            "Message received from {} (tier {}, rank {}) at {}",
            message.author.user_id,
            tier,
            tier.rank(),
            message.timestamp.to_rfc3339()
        );
        tracing::info!(
            "{}",
            crate::strings::logs::command_received(message.author.effective_name(), text)
        );

        let prefix = self.grammar.prefix();
        match self.grammar.match_tier(tier, text) {
            GrammarMatch::Command(kind) => {
                match kind {
                    CommandKind::Help => {
                        commands::help::handle_help(&self.emitter, message, prefix);
                    }
                    CommandKind::History => {
                        commands::history::handle_history(self.board.as_ref()).await;
                    }
                    CommandKind::SetCoverageTimer => {
                        commands::coverage_timer::handle_set_coverage_timer(
                            &self.emitter,
                            &self.settings,
                            message,
                            prefix,
                        );
                    }
                }
                DispatchOutcome::Handled(kind)
            }
            GrammarMatch::Unknown => {
                commands::unknown::handle_unknown(&self.emitter, message, prefix);
                DispatchOutcome::UnknownCommand
            }
            GrammarMatch::Ignored => {
                DispatchOutcome::Ignored(IgnoreReason::NoCommandsForTier)
            }
        }
    }
}
