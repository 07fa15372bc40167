//! Data-access client for the Karia Mitra marketplace store
//!
//! The marketplace keeps professionals, shops, items and release metadata in
//! a hosted Supabase project. This crate is the thin, stable interface the
//! rest of the workspace consumes:
//!
//! - **Query model**: filter/order/limit over named resources ([`Query`])
//! - **Store seam**: the [`DataStore`] trait, implemented over HTTP by
//!   [`StoreClient`] and in process by [`MemoryStore`]
//! - **Auth and storage**: session retrieval, password sign-in, object
//!   listing and public URLs
//! - **Update check**: newest active `app_updates` row vs. installed build
//! - **Session**: explicit holder of client, user and installed version
//!
//! # Example
//!
//! ```rust,no_run
//! use karia_api_client::{ClientConfig, DataStore, Query, StoreClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StoreClient::with_config(ClientConfig::from_env()?)?;
//!
//!     let rows = client
//!         .select(&Query::from("builders").ilike("name", "%shree%").limit(50))
//!         .await?;
//!     println!("{} builders", rows.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod memory;
pub mod query;
pub mod session;
pub mod store;

pub use client::StoreClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use memory::MemoryStore;
pub use query::{contains_pattern, Filter, Query};
pub use session::Session;
pub use store::{DataStore, Record};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::StoreClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{AppUpdatesApi, AuthApi, StorageApi, UpdateDescriptor};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::memory::MemoryStore;
    pub use crate::query::Query;
    pub use crate::session::Session;
    pub use crate::store::{DataStore, Record};
}
