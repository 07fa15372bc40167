//! Browse command

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use karia_cli::output::{format_duration, print_items, Status};
use karia_cli::progress;
use std::time::Instant;

/// List up to `search.browse_limit` records of one resource
pub async fn run(ctx: &AppContext, resource: &str, format: OutputFormat) -> Result<()> {
    let spinner = progress::spinner(&format!("Loading {resource}..."));
    let start = Instant::now();
    let engine = ctx.engine(ctx.search_config()).await?;
    let items = engine.browse(resource).await.map_err(karia_core::Error::from);
    progress::finish_clear(&spinner);
    let items = items?;

    if format == OutputFormat::Json {
        return super::print_json(&items);
    }

    let label = engine
        .resource(resource)
        .map_or(resource, |r| r.descriptor.display_label.as_str());
    Status::header(label);
    print_items(&items);
    tracing::debug!(elapsed = %format_duration(start.elapsed()), "Browse done");
    Ok(())
}
