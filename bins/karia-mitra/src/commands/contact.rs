//! Contact command

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use clap::ValueEnum;
use karia_api_client::{DataStore, Query};
use karia_cli::output::Status;
use karia_contact::Channel;
use karia_search::SearchResultItem;
use serde_json::json;

/// `--via` values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViaArg {
    /// Phone call
    Call,
    /// WhatsApp message
    Whatsapp,
}

impl From<ViaArg> for Channel {
    fn from(arg: ViaArg) -> Self {
        match arg {
            ViaArg::Call => Self::Call,
            ViaArg::Whatsapp => Self::WhatsApp,
        }
    }
}

/// Look up one record and print its contact link
pub async fn run(
    ctx: &AppContext,
    resource: &str,
    id: &str,
    via: Option<ViaArg>,
    format: OutputFormat,
) -> Result<()> {
    let engine = ctx.engine(ctx.search_config()).await?;
    let available = engine.resource(resource).map_err(karia_core::Error::from)?;

    let query = Query::from(resource).eq("id", id).limit(1);
    let rows = engine
        .store()
        .select(&query)
        .await
        .map_err(karia_core::Error::from)?;
    let Some(record) = rows.into_iter().next() else {
        return Err(karia_core::Error::validation(format!("No {resource} record with id {id}")).into());
    };
    let item = SearchResultItem::decorate(&available.descriptor, record);

    if via.is_none() && item.phone.is_none() {
        Status::warning("No phone number listed, falling back to the mediator on WhatsApp");
    }

    let planner = ctx.planner();
    let action = match via {
        Some(via) => planner.via(&item, via.into()),
        None => planner.for_item(&item),
    }
    .map_err(karia_core::Error::from)?;

    if format == OutputFormat::Json {
        return super::print_json(&json!({
            "key": item.key,
            "name": item.name,
            "action": action,
            "uri": action.uri(),
        }));
    }

    Status::info(&format!("{} ({})", item.display_name(), item.source_display));
    println!("{}", action.uri());
    Ok(())
}
