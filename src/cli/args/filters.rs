//! Filter argument types for CLI commands

use clap::Args;

/// Filters for `org list`.
#[derive(Args, Debug, Default, Clone)]
pub struct OrgFilterArgs {
    /// Filter by organization name (substring match, case-insensitive)
    #[arg(long, conflicts_with = "name_regex")]
    pub name: Option<String>,

    /// Filter by organization name (case-insensitive regex)
    #[arg(long = "name-regex")]
    pub name_regex: Option<String>,

    /// Filter by organization ID (server-side)
    #[arg(long)]
    pub id: Option<u64>,
}

/// Filters for `config list` (device configurations).
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigFilterArgs {
    /// Filter by configuration name (substring match, case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by hostname (substring match, case-insensitive)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Scope to one organization ID (server-side)
    #[arg(long = "org-id")]
    pub org_id: Option<u64>,
}

/// Filters for `asset list`.
#[derive(Args, Debug, Default, Clone)]
pub struct AssetFilterArgs {
    /// Filter by asset name (substring match, case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Scope to one organization ID (server-side)
    #[arg(long = "org-id")]
    pub org_id: Option<u64>,
}
