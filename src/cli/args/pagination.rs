//! Pagination argument types for CLI commands

use std::time::Duration;

use clap::Args;

use crate::client::{PageQuery, RetryPolicy};

/// Shared pagination/retry arguments for list commands.
///
/// Flatten into any command that aggregates pages:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Items requested per page (shrinks automatically on server timeouts)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Attempts per page before giving up
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seconds to wait before each retry
    #[arg(long)]
    pub backoff: Option<u64>,
}

impl PaginationArgs {
    /// Build the initial page query, falling back to the given default size.
    pub fn to_query(&self, default_page_size: u32) -> PageQuery {
        PageQuery::new(self.page_size.unwrap_or(default_page_size))
    }

    /// Build the retry policy, keeping defaults where flags are absent.
    pub fn to_retry_policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::default();
        if let Some(max) = self.max_attempts {
            policy.max_attempts = max.max(1);
        }
        if let Some(secs) = self.backoff {
            policy.backoff = Duration::from_secs(secs);
        }
        policy
    }
}
