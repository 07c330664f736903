//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{Credential, ItGlueApi, ItGlueClient, PageQuery};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Interactive setup uses the production API by default. Custom API hosts
/// can be passed with `--api-host` or edited into the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to glueop!".bold().green());
    println!("Let's set up your IT Glue configuration.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your IT Glue API key")
        .interact()?;

    // Verify the key with a real listing before saving anything
    println!("\n{}", "Verifying credentials...".cyan());
    let credential = Credential::ApiKey(api_key.clone());
    let client = ItGlueClient::connect(&credential, opts.api_host_ref()).await?;
    let orgs = client.list_organizations(PageQuery::default()).await?;

    println!("{}", "✓ Authentication successful!".green());
    println!("  {} organization(s) accessible", orgs.len());

    let config = Config {
        api_key: Some(api_key),
        api_host: opts.api_host.clone(),
        preferences: Default::default(),
    };
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "glueop status".cyan());
    println!("  {} - List organizations", "glueop org list".cyan());

    Ok(())
}
