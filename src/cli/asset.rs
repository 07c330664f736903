//! Flexible asset command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use serde_json::Value;
use tabled::Tabled;

use crate::cli::args::{AssetFilterArgs, GlobalOptions, PaginationArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{ItGlueApi, Resource, filter, models};
use crate::error::{Error, Result};
use crate::output::{json, table};

/// Flexible asset for table display
#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ORG ID")]
    org_id: String,
}

impl From<&Resource> for AssetRow {
    fn from(record: &Resource) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name().unwrap_or("-").to_string(),
            org_id: record
                .organization_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Run the asset list command
pub async fn list(
    opts: &GlobalOptions,
    type_id: u64,
    filters: &AssetFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::with_retry(opts, pagination.to_retry_policy()).await?;

    let mut query = pagination.to_query(ctx.page_size());
    if let Some(org_id) = filters.org_id {
        query = query.filter("organization_id", org_id.to_string());
    }

    let mut assets = ctx.client.list_flexible_assets(type_id, query).await?;

    if let Some(needle) = &filters.name {
        assets = filter::by_name_contains(assets, needle);
    }

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<AssetRow> = assets.iter().map(AssetRow::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&assets)?);
        }
    }
    Ok(())
}

/// Run the asset get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let asset = ctx.client.get_flexible_asset(id).await?;
    print_record(&asset, ctx.format)
}

/// Run the asset create command
pub async fn create(opts: &GlobalOptions, type_id: u64, org_id: u64, traits: &str) -> Result<()> {
    let traits = parse_traits(traits)?;
    let ctx = CommandContext::new(opts).await?;

    let body = models::flexible_asset_create_body(org_id, type_id, &traits);
    let asset = ctx.client.create_flexible_asset(&body).await?;

    println!("{} Created flexible asset {}", "✓".green(), asset.id.bold());
    print_record(&asset, ctx.format)
}

/// Run the asset update command
pub async fn update(opts: &GlobalOptions, id: u64, traits: &str) -> Result<()> {
    let traits = parse_traits(traits)?;
    let ctx = CommandContext::new(opts).await?;

    let body = models::flexible_asset_update_body(&traits);
    let asset = ctx.client.update_flexible_asset(id, &body).await?;

    println!("{} Updated flexible asset {}", "✓".green(), asset.id.bold());
    print_record(&asset, ctx.format)
}

/// Run the asset delete command
pub async fn delete(opts: &GlobalOptions, id: u64, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete flexible asset {id}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.delete_flexible_asset(id).await?;

    println!("{} Deleted flexible asset {id}", "✓".green());
    Ok(())
}

/// The upstream API requires traits to be a JSON object.
fn parse_traits(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::Other(format!("--traits is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(Error::Other("--traits must be a JSON object".to_string()));
    }
    Ok(value)
}

fn print_record(record: &Resource, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("  ID:   {}", record.id);
            println!("  Type: {}", record.kind);
            if let Some(name) = record.name() {
                println!("  Name: {name}");
            }
            println!(
                "  Attributes:\n{}",
                serde_json::to_string_pretty(&record.attributes)?
            );
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(record)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_traits_accepts_objects() {
        let traits = parse_traits(r#"{ "hostname": "srv-01" }"#).unwrap();
        assert_eq!(traits["hostname"], "srv-01");
    }

    #[test]
    fn test_parse_traits_rejects_non_objects() {
        assert!(parse_traits("[1, 2, 3]").is_err());
        assert!(parse_traits("\"string\"").is_err());
        assert!(parse_traits("not json at all").is_err());
    }
}
