//! IT Glue API client
//!
//! Control flow for every read operation: authenticate once, drive the
//! paginated fetch engine across the endpoint, then apply any client-side
//! result filters before handing records back to the caller.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod auth;
pub mod filter;
pub mod itglue;
pub mod models;
pub mod pagination;
pub mod paginator;

pub use auth::{Credential, DEFAULT_API_BASE_URL};
pub use itglue::ItGlueClient;
pub use models::Resource;
pub use pagination::PageQuery;
pub use paginator::RetryPolicy;

/// IT Glue API operation surface.
///
/// List operations aggregate all pages before returning; records come back
/// in page order, then in-page order, unvalidated and unmodified.
#[async_trait]
pub trait ItGlueApi: Send + Sync {
    /// List all accessible organizations
    async fn list_organizations(&self, query: PageQuery) -> Result<Vec<Resource>>;

    /// List device configurations
    async fn list_configurations(&self, query: PageQuery) -> Result<Vec<Resource>>;

    /// List flexible asset records of one asset type
    async fn list_flexible_assets(&self, type_id: u64, query: PageQuery) -> Result<Vec<Resource>>;

    /// Fetch a single flexible asset by ID
    async fn get_flexible_asset(&self, id: u64) -> Result<Resource>;

    /// Create a flexible asset (see [`models::flexible_asset_create_body`])
    async fn create_flexible_asset(&self, body: &Value) -> Result<Resource>;

    /// Update a flexible asset's traits
    async fn update_flexible_asset(&self, id: u64, body: &Value) -> Result<Resource>;

    /// Delete a flexible asset by ID
    async fn delete_flexible_asset(&self, id: u64) -> Result<()>;
}
