//! Explicit client session
//!
//! Holds what the app would otherwise keep as ambient module state: the store
//! client, the signed-in user and the locally installed version counter.
//! Auth changes are published on a `watch` channel so views can subscribe.

use crate::client::StoreClient;
use crate::config::ClientConfig;
use crate::endpoints::{AppUpdatesApi, AuthUser, UpdateDescriptor};
use crate::error::ApiResult;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Client session with defined start and close
pub struct Session {
    client: StoreClient,
    user_tx: watch::Sender<Option<AuthUser>>,
    installed_version_code: AtomicU32,
}

impl Session {
    /// Start a session without a signed-in user
    pub fn start(config: ClientConfig, installed_version_code: u32) -> ApiResult<Self> {
        let client = StoreClient::with_config(config)?;
        let (user_tx, _) = watch::channel(None);
        debug!(base_url = %client.base_url(), installed_version_code, "Session started");

        Ok(Self {
            client,
            user_tx,
            installed_version_code: AtomicU32::new(installed_version_code),
        })
    }

    /// Store client bound to this session
    #[must_use]
    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    /// Currently signed-in user
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.user_tx.borrow().clone()
    }

    /// Receive every auth state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.user_tx.subscribe()
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthUser> {
        let session = self.client.auth().sign_in_with_password(email, password).await?;
        self.client.set_access_token(Some(session.access_token));
        info!(user_id = %session.user.id, "Signed in");
        self.publish(Some(session.user.clone()));
        Ok(session.user)
    }

    /// Resume a session from a previously issued access token
    pub async fn restore(&self, access_token: impl Into<String>) -> ApiResult<AuthUser> {
        self.client.set_access_token(Some(access_token.into()));
        match self.client.auth().user().await {
            Ok(user) => {
                debug!(user_id = %user.id, "Session restored");
                self.publish(Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Stored access token rejected");
                self.sign_out();
                Err(e)
            }
        }
    }

    /// Drop the access token and publish the signed-out state
    pub fn sign_out(&self) {
        self.client.set_access_token(None);
        self.publish(None);
    }

    /// Locally installed version counter
    #[must_use]
    pub fn installed_version_code(&self) -> u32 {
        self.installed_version_code.load(Ordering::Relaxed)
    }

    /// Record that a newer build has been installed
    pub fn record_installed(&self, version_code: u32) {
        self.installed_version_code
            .fetch_max(version_code, Ordering::Relaxed);
    }

    /// Ask the store whether a newer release than the installed one exists
    pub async fn check_for_update(&self) -> ApiResult<Option<UpdateDescriptor>> {
        AppUpdatesApi::new(&self.client)
            .check(self.installed_version_code())
            .await
    }

    /// End the session
    pub fn close(self) {
        self.sign_out();
        debug!("Session closed");
    }

    fn publish(&self, user: Option<AuthUser>) {
        self.user_tx.send_replace(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::start(ClientConfig::development(), 4).unwrap()
    }

    #[test]
    fn test_session_starts_signed_out() {
        let session = session();
        assert!(session.current_user().is_none());
        assert!(!session.client().has_access_token());
        assert_eq!(session.installed_version_code(), 4);
    }

    #[test]
    fn test_record_installed_never_goes_backwards() {
        let session = session();
        session.record_installed(7);
        session.record_installed(5);
        assert_eq!(session.installed_version_code(), 7);
    }

    #[test]
    fn test_subscribers_see_sign_out() {
        let session = session();
        let mut rx = session.subscribe();
        session.client().set_access_token(Some("jwt".to_string()));

        session.sign_out();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
        assert!(!session.client().has_access_token());
    }
}
