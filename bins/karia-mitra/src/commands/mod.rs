//! CLI command implementations

pub mod browse;
pub mod contact;
pub mod link;
pub mod resources;
pub mod search;
pub mod storage;
pub mod update;
pub mod whoami;

use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
