//! Configuration loading and schema definitions
//!
//! Build-time defaults (store endpoint, mediator numbers, app version) live in
//! the schema; a TOML file can override any of them.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
