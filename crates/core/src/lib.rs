//! Core utilities for the Karia Mitra marketplace client
//!
//! This crate provides functionality shared by the data-access client, the
//! search component and the CLI:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Retry policy**: backoff configuration consumed by the store client
//!
//! # Example
//!
//! ```rust,no_run
//! use karia_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("store: {}", config.schema.store.url);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::RetryConfig;
}
