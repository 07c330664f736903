//! Organization command implementations

use tabled::Tabled;

use crate::cli::args::{GlobalOptions, OrgFilterArgs, PaginationArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{ItGlueApi, Resource, filter};
use crate::error::Result;
use crate::output::{json, table};

/// Organization for table display
#[derive(Tabled)]
struct OrgRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    org_type: String,
}

impl From<&Resource> for OrgRow {
    fn from(record: &Resource) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name().unwrap_or("-").to_string(),
            org_type: record
                .attr_str("organization-type-name")
                .unwrap_or("-")
                .to_string(),
        }
    }
}

/// Run the org list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &OrgFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::with_retry(opts, pagination.to_retry_policy()).await?;

    let mut query = pagination.to_query(ctx.page_size());
    if let Some(id) = filters.id {
        query = query.filter("id", id.to_string());
    }

    let mut orgs = ctx.client.list_organizations(query).await?;

    if let Some(needle) = &filters.name {
        orgs = filter::by_name_contains(orgs, needle);
    }
    if let Some(pattern) = &filters.name_regex {
        orgs = filter::by_name_regex(orgs, pattern)?;
    }

    print_records(&orgs, ctx.format)
}

fn print_records(records: &[Resource], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<OrgRow> = records.iter().map(OrgRow::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(records)?);
        }
    }
    Ok(())
}
