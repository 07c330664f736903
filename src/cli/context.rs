//! Command execution context
//!
//! Unified setup for command handlers: config loading, credential
//! resolution, and client construction in one place.

use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{Credential, ItGlueClient, RetryPolicy};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Context for command execution: loaded config, connected client, and
/// output format.
pub struct CommandContext {
    /// Loaded configuration (default when `--login` is used without one)
    pub config: Config,
    /// Connected API client with its auth context derived
    pub client: ItGlueClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a context with the default retry policy.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        Self::with_retry(opts, RetryPolicy::default()).await
    }

    /// Create a context with an explicit retry policy.
    ///
    /// Resolves the credential (`--login` prompts interactively; otherwise
    /// the configured API key is required), applies the host override, and
    /// performs authentication. The two-step bearer exchange happens here
    /// when `--login` is used.
    pub async fn with_retry(opts: &GlobalOptions, retry: RetryPolicy) -> Result<Self> {
        // --login works without a config file; key auth requires one.
        let config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound)) if opts.login => Config::default(),
            Err(err) => return Err(err),
        };

        let credential = if opts.login {
            prompt_credentials()?
        } else {
            match config.api_key.clone() {
                Some(key) => Credential::ApiKey(key),
                None => return Err(ConfigError::MissingApiKey.into()),
            }
        };

        let api_host = opts
            .api_host
            .clone()
            .or_else(|| config.api_host.clone());

        let client = ItGlueClient::connect(&credential, api_host.as_deref())
            .await?
            .with_retry(retry);

        let format = OutputFormat::resolve(opts.format, config.preferences.format.as_deref());

        Ok(Self {
            config,
            client,
            format,
        })
    }

    /// Default page size from preferences.
    pub fn page_size(&self) -> u32 {
        self.config.preferences.page_size
    }
}

fn prompt_credentials() -> Result<Credential> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("IT Glue email")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    Ok(Credential::UserPassword { email, password })
}
