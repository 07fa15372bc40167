//! Update check command

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use karia_cli::output::Status;
use owo_colors::OwoColorize;
use serde_json::json;

/// Compare the newest active release with the installed version code
pub async fn run(ctx: &AppContext, installed: Option<u32>, format: OutputFormat) -> Result<()> {
    let session = ctx.session(installed)?;
    let update = session
        .check_for_update()
        .await
        .map_err(karia_core::Error::from)?;
    let installed_code = session.installed_version_code();
    session.close();

    if format == OutputFormat::Json {
        return super::print_json(&json!({
            "installed_version_code": installed_code,
            "update": update,
        }));
    }

    match update {
        Some(update) => {
            Status::success(&format!(
                "Version {} is available (build {}, installed {})",
                update.version_label.bold(),
                update.version_code,
                installed_code
            ));
            println!("  {}", update.download_url.cyan());
            if !update.release_notes.is_empty() {
                println!();
                for line in update.release_notes.lines() {
                    println!("  {}", line.dimmed());
                }
            }
        }
        None => Status::info(&format!(
            "Up to date ({} build {installed_code})",
            ctx.config.schema.app.version
        )),
    }
    Ok(())
}
