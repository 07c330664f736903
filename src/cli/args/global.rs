//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Consolidates the global flags into one unit so handler signatures stay
/// small. Precedence for most options: CLI flag > environment variable >
/// config file > default; this struct captures the CLI/env layer and the
/// config layer is resolved in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format from flag/env; `None` falls back to the config
    /// preference, then the default
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.glueop/config.yaml)
    pub config: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,

    /// Authenticate interactively with username/password instead of the
    /// configured API key
    pub login: bool,
}

impl GlobalOptions {
    /// Build from a parsed CLI struct; called once in main.rs.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
            login: cli.login,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
