//! Credentials types for Sensu Go authentication.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::{ApiKeyAuth, AuthProvider, UserPassAuth};
use crate::transport::TransportClient;

/// Username/password credentials.
///
/// The password is exchanged for an access token on the first request made
/// through the client (`GET /auth` with basic credentials). The token is then
/// reused for the lifetime of the client.
///
/// ## Example
///
/// ```rust
/// use sensu_go::UserPassCredentialsConfig;
///
/// let config = UserPassCredentialsConfig::new("admin", "P@ssw0rd!");
/// assert_eq!(config.username(), "admin");
/// ```
#[derive(Clone)]
pub struct UserPassCredentialsConfig {
    pub(crate) username: String,
    pub(crate) password: Zeroizing<String>,
}

impl UserPassCredentialsConfig {
    /// Creates a new username/password configuration.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for UserPassCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassCredentialsConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// API key credentials.
///
/// Sent as `Authorization: Key <key>` with no login call.
#[derive(Clone)]
pub struct ApiKeyCredentialsConfig {
    key: Arc<str>,
}

impl ApiKeyCredentialsConfig {
    /// Creates a new API key configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sensu_go::ApiKeyCredentialsConfig;
    ///
    /// let config = ApiKeyCredentialsConfig::new("83abef1e-e7d7-4beb-91fc-79ad90084d5b");
    /// ```
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Arc::from(key.into()),
        }
    }

    /// Returns the API key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ApiKeyCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyCredentialsConfig")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl<S: Into<String>> From<S> for ApiKeyCredentialsConfig {
    fn from(key: S) -> Self {
        Self::new(key)
    }
}

/// Authentication credentials for the Sensu Go client.
///
/// - `UserPass`: username and password exchanged for a bearer token
/// - `ApiKey`: a static API key
/// - `Provider`: any custom [`AuthProvider`]
///
/// ## Example
///
/// ```rust
/// use sensu_go::{ApiKeyCredentialsConfig, Credentials, UserPassCredentialsConfig};
///
/// let creds: Credentials = UserPassCredentialsConfig::new("admin", "P@ssw0rd!").into();
/// assert!(creds.is_user_pass());
///
/// let creds: Credentials = ApiKeyCredentialsConfig::new("key").into();
/// assert!(creds.is_api_key());
/// ```
#[derive(Clone)]
pub enum Credentials {
    /// Username and password.
    UserPass(UserPassCredentialsConfig),

    /// Static API key.
    ApiKey(ApiKeyCredentialsConfig),

    /// Caller-supplied provider.
    Provider(Arc<dyn AuthProvider>),
}

impl Credentials {
    /// Returns `true` if this is username/password authentication.
    pub fn is_user_pass(&self) -> bool {
        matches!(self, Credentials::UserPass(_))
    }

    /// Returns `true` if this is API key authentication.
    pub fn is_api_key(&self) -> bool {
        matches!(self, Credentials::ApiKey(_))
    }

    /// Turns the credentials into the provider the client authenticates with.
    ///
    /// `address` and `transport` are only used by the username/password
    /// variant, which needs them for its login call.
    pub(crate) fn into_provider(
        self,
        address: &str,
        transport: Arc<dyn TransportClient>,
    ) -> Arc<dyn AuthProvider> {
        match self {
            Credentials::UserPass(config) => Arc::new(UserPassAuth::new(address, config, transport)),
            Credentials::ApiKey(config) => Arc::new(ApiKeyAuth::new(config.key())),
            Credentials::Provider(provider) => provider,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::UserPass(config) => f.debug_tuple("UserPass").field(config).finish(),
            Credentials::ApiKey(config) => f.debug_tuple("ApiKey").field(config).finish(),
            Credentials::Provider(_) => f.debug_tuple("Provider").finish_non_exhaustive(),
        }
    }
}

impl From<UserPassCredentialsConfig> for Credentials {
    fn from(config: UserPassCredentialsConfig) -> Self {
        Credentials::UserPass(config)
    }
}

impl From<ApiKeyCredentialsConfig> for Credentials {
    fn from(config: ApiKeyCredentialsConfig) -> Self {
        Credentials::ApiKey(config)
    }
}

impl From<Arc<dyn AuthProvider>> for Credentials {
    fn from(provider: Arc<dyn AuthProvider>) -> Self {
        Credentials::Provider(provider)
    }
}
