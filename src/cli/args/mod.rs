//! Shared CLI argument types
//!
//! Reusable argument structs that commands pull in with `#[command(flatten)]`.

mod common;
mod filters;
mod global;
mod pagination;

pub use common::OutputFormat;
pub use filters::{AssetFilterArgs, ConfigFilterArgs, OrgFilterArgs};
pub use global::GlobalOptions;
pub use pagination::PaginationArgs;
