//! Storage commands

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use karia_api_client::endpoints::storage::resolve_image_url;
use karia_cli::output::{format_count, format_size};
use karia_cli::progress;
use owo_colors::OwoColorize;

/// List objects in a bucket
pub async fn list(
    ctx: &AppContext,
    bucket: &str,
    prefix: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let client = ctx.client()?;
    let spinner = progress::spinner(&format!("Listing {bucket}/{prefix}..."));
    let objects = client.storage().list(bucket, prefix, limit).await;
    progress::finish_clear(&spinner);
    let objects = objects.map_err(karia_core::Error::from)?;

    if format == OutputFormat::Json {
        return super::print_json(&objects);
    }

    for object in &objects {
        if object.is_folder() {
            println!("  {}/", object.name.blue());
        } else {
            let size = object.size().map(format_size).unwrap_or_default();
            println!("  {:<48} {:>10}", object.name, size.dimmed());
        }
    }
    println!("{}", format_count(objects.len(), "entry", "entries").dimmed());
    Ok(())
}

/// Print the public URL of an object
pub fn url(ctx: &AppContext, bucket: &str, path: &str, format: OutputFormat) -> Result<()> {
    let url = resolve_image_url(&ctx.client_config, bucket, path);
    if format == OutputFormat::Json {
        return super::print_json(&serde_json::json!({ "url": url }));
    }
    println!("{url}");
    Ok(())
}
