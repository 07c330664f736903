//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::client::DEFAULT_API_BASE_URL;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;

    println!("{}", "glueop Configuration".bold());
    println!();
    println!("  Config file: {}", config_path.display());

    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("  API key:     {}", "not configured".yellow());
            println!();
            println!("Run {} to get started.", "glueop init".cyan());
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    match &config.api_key {
        Some(key) => println!("  API key:     configured ({})", redact(key)),
        None => println!("  API key:     {}", "not configured".yellow()),
    }

    let api_host = opts
        .api_host_ref()
        .or(config.api_host.as_deref())
        .unwrap_or(DEFAULT_API_BASE_URL);
    println!("  API host:    {api_host}");
    println!("  Page size:   {}", config.preferences.page_size);

    Ok(())
}

/// Show just enough of the key to recognize it.
fn redact(key: &str) -> String {
    let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_keeps_only_the_tail() {
        let out = redact("ITG.0123456789abcdef");
        assert_eq!(out, "…cdef");
        assert!(!out.contains("0123"));
    }

    #[test]
    fn test_redact_short_key() {
        assert_eq!(redact("abc"), "…abc");
    }
}
