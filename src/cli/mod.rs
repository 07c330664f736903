//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod asset;
pub mod configuration;
pub mod context;
pub mod init;
pub mod org;
pub mod status;

pub use args::{
    AssetFilterArgs, ConfigFilterArgs, GlobalOptions, OrgFilterArgs, OutputFormat, PaginationArgs,
};
pub use context::CommandContext;

/// glueop - CLI companion for the IT Glue documentation platform
#[derive(Parser, Debug)]
#[command(name = "glueop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json; defaults to the configured preference)
    #[arg(
        long,
        global = true,
        env = "GLUEOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "GLUEOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override API host
    #[arg(long, global = true, env = "GLUEOP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Authenticate with username/password instead of the configured API key
    #[arg(long, global = true)]
    pub login: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "GLUEOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize glueop configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// List organizations
    #[command(subcommand)]
    Org(OrgCommands),

    /// List device configurations
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Manage flexible asset records
    #[command(subcommand)]
    Asset(AssetCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Organization subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// List all accessible organizations
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            glueop org list                      # All organizations\n  \
            glueop org list --name acme          # Name substring match\n  \
            glueop org list --name-regex '^Acme' # Name regex match\n  \
            glueop org list --id 42              # One organization by ID"
    )]
    List {
        #[command(flatten)]
        filters: OrgFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// Device configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// List device configurations
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            glueop config list                     # All configurations\n  \
            glueop config list --hostname fw01     # Hostname substring match\n  \
            glueop config list --org-id 42         # One customer's devices"
    )]
    List {
        #[command(flatten)]
        filters: ConfigFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// Flexible asset subcommands
#[derive(Subcommand, Debug)]
pub enum AssetCommands {
    /// List flexible assets of one asset type
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            glueop asset list --type-id 7                # All assets of type 7\n  \
            glueop asset list --type-id 7 --org-id 42    # Scoped to a customer\n  \
            glueop asset list --type-id 7 --name backup  # Name substring match"
    )]
    List {
        /// Flexible asset type ID
        #[arg(long = "type-id")]
        type_id: u64,

        #[command(flatten)]
        filters: AssetFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Get a single flexible asset by ID
    Get {
        /// Flexible asset ID
        id: u64,
    },

    /// Create a flexible asset
    #[command(after_help = "EXAMPLES:\n  \
        glueop asset create --type-id 7 --org-id 42 \\\n      \
            --traits '{\"hostname\": \"srv-01\", \"role\": \"backup\"}'")]
    Create {
        /// Flexible asset type ID
        #[arg(long = "type-id")]
        type_id: u64,

        /// Owning organization ID
        #[arg(long = "org-id")]
        org_id: u64,

        /// Asset traits as a JSON object
        #[arg(long)]
        traits: String,
    },

    /// Update a flexible asset's traits
    Update {
        /// Flexible asset ID
        id: u64,

        /// Replacement traits as a JSON object
        #[arg(long)]
        traits: String,
    },

    /// Delete a flexible asset
    Delete {
        /// Flexible asset ID
        id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
