//! Auth endpoints

use crate::client::StoreClient;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Auth API interface
#[derive(Clone)]
pub struct AuthApi {
    client: StoreClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Fetch the user owning the installed access token
    ///
    /// GET /auth/v1/user
    pub async fn user(&self) -> ApiResult<AuthUser> {
        if !self.client.has_access_token() {
            return Err(ApiError::NotSignedIn);
        }
        let url = self.client.config().auth_url("user");
        self.client.get_url(&url).await
    }

    /// Exchange email and password for a session
    ///
    /// POST /auth/v1/token?grant_type=password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let url = self
            .client
            .config()
            .auth_url("token?grant_type=password");
        let body = PasswordGrant { email, password };
        self.client.post_url(&url, &body).await
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id
    pub id: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Account creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-form profile metadata
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    /// Display name from metadata, falling back to email or phone
    #[must_use]
    pub fn display_name(&self) -> String {
        ["full_name", "name"]
            .iter()
            .find_map(|key| self.user_metadata.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| self.email.clone())
            .or_else(|| self.phone.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Tokens returned by a successful sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Token used to obtain a new access token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// The signed-in user
    pub user: AuthUser,
}
