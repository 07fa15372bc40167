//! Search command

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use clap::ValueEnum;
use karia_cli::output::{format_duration, print_items, Status};
use karia_cli::progress;
use karia_core::config::{ResultOrder, SearchStrategy};
use karia_search::SearchResultItem;
use std::time::Instant;

/// `--strategy` values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// One query per field name, first match per field group
    FieldByField,
    /// One OR query per resource
    Combined,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FieldByField => Self::FieldByField,
            StrategyArg::Combined => Self::Combined,
        }
    }
}

/// `--order` values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    /// By resource name
    Resource,
    /// By match quality
    Relevance,
}

impl From<OrderArg> for ResultOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Resource => Self::Resource,
            OrderArg::Relevance => Self::Relevance,
        }
    }
}

/// Run a keyword search
pub async fn run(
    ctx: &AppContext,
    query: &str,
    strategy: Option<StrategyArg>,
    order: Option<OrderArg>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = ctx.search_config();
    if let Some(strategy) = strategy {
        config.strategy = strategy.into();
    }
    if let Some(order) = order {
        config.order = order.into();
    }

    let spinner = progress::spinner(&format!("Searching for \"{}\"...", query.trim()));
    let start = Instant::now();
    let engine = ctx.engine(config).await?;
    let items = engine.search(query).await;
    progress::finish_clear(&spinner);

    tracing::debug!(
        elapsed = %format_duration(start.elapsed()),
        resources = engine.available().len(),
        "Search done"
    );
    print_results(&items, format)
}

/// Print a result list in the requested format
pub fn print_results(items: &[SearchResultItem], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return super::print_json(items);
    }
    if items.is_empty() {
        Status::info("No results");
        return Ok(());
    }
    print_items(items);
    Ok(())
}
