//! Device configuration command implementations

use tabled::Tabled;

use crate::cli::args::{ConfigFilterArgs, GlobalOptions, PaginationArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{ItGlueApi, Resource, filter};
use crate::error::Result;
use crate::output::{json, table};

/// Device configuration for table display
#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "HOSTNAME")]
    hostname: String,
    #[tabled(rename = "ORG ID")]
    org_id: String,
}

impl From<&Resource> for ConfigRow {
    fn from(record: &Resource) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name().unwrap_or("-").to_string(),
            hostname: record.hostname().unwrap_or("-").to_string(),
            org_id: record
                .organization_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Run the config list command
///
/// Organization scoping goes to the server as `filter[organization_id]`;
/// name and hostname narrowing happen client-side on the aggregate.
pub async fn list(
    opts: &GlobalOptions,
    filters: &ConfigFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::with_retry(opts, pagination.to_retry_policy()).await?;

    let mut query = pagination.to_query(ctx.page_size());
    if let Some(org_id) = filters.org_id {
        query = query.filter("organization_id", org_id.to_string());
    }

    let mut configs = ctx.client.list_configurations(query).await?;

    if let Some(needle) = &filters.name {
        configs = filter::by_name_contains(configs, needle);
    }
    if let Some(needle) = &filters.hostname {
        configs = filter::by_hostname_contains(configs, needle);
    }

    print_records(&configs, ctx.format)
}

fn print_records(records: &[Resource], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<ConfigRow> = records.iter().map(ConfigRow::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(records)?);
        }
    }
    Ok(())
}
