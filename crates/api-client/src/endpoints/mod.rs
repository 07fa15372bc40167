//! Endpoint-specific API implementations
//!
//! | Module | Backend surface | Description |
//! |--------|-----------------|-------------|
//! | `auth` | `/auth/v1` | Session retrieval and password sign-in |
//! | `storage` | `/storage/v1` | Object listing and public URLs |
//! | `app_updates` | `app_updates` resource | Update-check contract |

pub mod app_updates;
pub mod auth;
pub mod storage;

pub use app_updates::{AppRelease, AppUpdatesApi, UpdateDescriptor};
pub use auth::{AuthApi, AuthSession, AuthUser};
pub use storage::{StorageApi, StorageObject};
