//! Resources command

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use karia_cli::output::{format_count, format_resource, Status};
use karia_cli::progress;
use serde_json::json;

/// Probe the catalog and list what answered
pub async fn run(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let spinner = progress::spinner("Probing resources...");
    let engine = ctx.engine(ctx.search_config()).await?;
    let count = format_count(engine.available().len(), "resource", "resources");
    progress::finish_success(&spinner, &format!("{count} available"));

    if format == OutputFormat::Json {
        let resources: Vec<_> = engine
            .available()
            .iter()
            .map(|r| {
                json!({
                    "name": r.descriptor.name,
                    "label": r.descriptor.display_label,
                    "icon": r.descriptor.icon,
                    "color": r.descriptor.color_tag,
                    "columns": r.columns,
                })
            })
            .collect();
        return super::print_json(&resources);
    }

    Status::header("Available resources");
    for resource in engine.available() {
        println!("  {}", format_resource(resource));
    }
    println!();
    Status::info(&count);
    Ok(())
}
