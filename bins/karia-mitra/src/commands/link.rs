//! Link command: deep links from configured numbers, no store access

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use karia_contact::ContactAction;

fn print_actions(actions: &[ContactAction], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let values: Vec<_> = actions
            .iter()
            .map(|a| serde_json::json!({ "action": a, "uri": a.uri() }))
            .collect();
        return super::print_json(&values);
    }
    for action in actions {
        println!("{action}");
    }
    Ok(())
}

/// Dial link, support number by default
pub fn call(ctx: &AppContext, number: Option<&str>, format: OutputFormat) -> Result<()> {
    let action = match number {
        Some(number) => ContactAction::dial(number),
        None => ctx.planner().support_call(),
    };
    print_actions(&[action], format)
}

/// WhatsApp link, mediator number by default
pub fn whatsapp(ctx: &AppContext, message: &str, number: Option<&str>, format: OutputFormat) -> Result<()> {
    let number = number.unwrap_or(&ctx.config.schema.contact.mediator_whatsapp);
    let action = ContactAction::whatsapp(number, message).map_err(karia_core::Error::from)?;
    print_actions(&[action], format)
}

/// Support call and WhatsApp links
pub fn support(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let planner = ctx.planner();
    let whatsapp = planner.support_whatsapp().map_err(karia_core::Error::from)?;
    print_actions(&[planner.support_call(), whatsapp], format)
}
