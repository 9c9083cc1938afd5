//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix login, ticketing credentials, the privilege role table,
//! command options and the coverage check.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::types::PrivilegeTier;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`. Built once at startup, read-only afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    /// Ordered privilege role table.
    #[serde(default)]
    pub roles: Vec<RoleBinding>,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;
        if config.commands.prefix.is_empty() {
            bail!("commands.prefix must not be empty");
        }
        Ok(config)
    }
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
    pub trello: TrelloConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Ticketing (Trello) credentials and board selection.
#[derive(Debug, Deserialize, Clone)]
pub struct TrelloConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub key_env: Option<String>, // e.g. "TRELLO_KEY"
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_env: Option<String>, // e.g. "TRELLO_ACCESS_TOKEN"
    #[serde(default = "default_board_id")]
    pub board_id: String,
    #[serde(default = "default_trello_base_url")]
    pub base_url: String,
    #[serde(default = "default_trello_timeout")]
    pub timeout_secs: Option<u64>,
}

impl TrelloConfig {
    pub fn resolve_key(&self) -> Result<String> {
        resolve_secret("services.trello.key", &self.key, &self.key_env)
    }

    pub fn resolve_token(&self) -> Result<String> {
        resolve_secret("services.trello.token", &self.token, &self.token_env)
    }
}

/// Inline value wins; otherwise read the named environment variable.
fn resolve_secret(field: &str, inline: &Option<String>, env: &Option<String>) -> Result<String> {
    if let Some(value) = inline.as_ref().filter(|v| !v.is_empty()) {
        return Ok(value.clone());
    }
    if let Some(var) = env {
        return std::env::var(var)
            .with_context(|| format!("{field}: environment variable {var} is not set"));
    }
    bail!("{field} is not configured")
}

fn default_board_id() -> String {
    "5ed7949d405d7d6fd00c201c".to_string()
}

fn default_trello_base_url() -> String {
    "https://api.trello.com/1".to_string()
}

fn default_trello_timeout() -> Option<u64> {
    Some(30)
}

/// Binds a role to exactly one privilege tier.
///
/// A member holds the role when listed in `users`, or when joined to the role's `room`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RoleBinding {
    pub id: String,
    pub tier: PrivilegeTier,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Enables `set_coverage_timer` for management.
    #[serde(default)]
    pub coverage_timer: bool,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            coverage_timer: false,
        }
    }
}

fn default_prefix() -> String {
    "rdss:".to_string()
}

/// Supervisor coverage check.
#[derive(Debug, Deserialize, Clone)]
pub struct CoverageConfig {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    /// Room whose members are counted. Check disabled when unset.
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default = "default_minimum_supervisors")]
    pub minimum_supervisors: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            room: None,
            minimum_supervisors: default_minimum_supervisors(),
        }
    }
}

fn default_interval_minutes() -> u64 {
    10
}

fn default_minimum_supervisors() -> usize {
    1
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
