//! Auth providers: the source of the `Authorization` header value.

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use tokio::sync::OnceCell;
use zeroize::Zeroizing;

use super::UserPassCredentialsConfig;
use crate::Error;
use crate::error::ErrorKind;
use crate::transport::{Method, Request, TransportClient, build_url};

/// A type alias for the boxed future returned by auth providers.
pub type AuthFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// Produces the `Authorization` header value sent with every request.
///
/// Implementations compute the value lazily and may cache it; the client
/// asks for it once per request.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn AuthProvider>`.
///
/// ## Example: Token from the environment
///
/// ```rust
/// use sensu_go::{AuthFuture, AuthProvider, Error};
///
/// struct EnvToken;
///
/// impl AuthProvider for EnvToken {
///     fn auth_header(&self) -> AuthFuture<'_> {
///         Box::pin(async {
///             std::env::var("SENSU_TOKEN")
///                 .map(|token| format!("Bearer {}", token))
///                 .map_err(|_| Error::configuration("SENSU_TOKEN not set"))
///         })
///     }
/// }
/// ```
pub trait AuthProvider: Send + Sync {
    /// Returns a future resolving to the full header value, scheme included
    /// (e.g. `"Bearer eyJ..."` or `"Key 83ab..."`).
    ///
    /// # Errors
    ///
    /// Whatever prevents the value from being produced, typically an
    /// [`ErrorKind::Authentication`] failure from a login call.
    fn auth_header(&self) -> AuthFuture<'_>;
}

impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    fn auth_header(&self) -> AuthFuture<'_> {
        (**self).auth_header()
    }
}

impl<T: AuthProvider + ?Sized> AuthProvider for Box<T> {
    fn auth_header(&self) -> AuthFuture<'_> {
        (**self).auth_header()
    }
}

// ============================================================================
// API key
// ============================================================================

/// Static API key authentication: `Key <key>`, no network call.
#[derive(Clone)]
pub struct ApiKeyAuth {
    header: Arc<str>,
}

impl ApiKeyAuth {
    /// Creates a provider for the given API key.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self {
            header: Arc::from(format!("Key {}", key.as_ref())),
        }
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth").field("key", &"[REDACTED]").finish()
    }
}

impl AuthProvider for ApiKeyAuth {
    fn auth_header(&self) -> AuthFuture<'_> {
        let header = self.header.to_string();
        Box::pin(async move { Ok(header) })
    }
}

// ============================================================================
// Username / password
// ============================================================================

/// Tokens returned by a successful login.
struct Tokens {
    access: Zeroizing<String>,
    refresh: Zeroizing<String>,
}

/// Username/password authentication.
///
/// The first call to [`auth_header`](AuthProvider::auth_header) performs
/// `GET <address>/auth` with basic credentials. The returned access token is
/// cached, so at most one successful login happens per provider. Concurrent
/// first callers wait on the same login.
///
/// The refresh token is kept and exposed through
/// [`refresh_token`](Self::refresh_token), but expired access tokens are not
/// renewed automatically.
pub struct UserPassAuth {
    address: String,
    username: String,
    password: Zeroizing<String>,
    transport: Arc<dyn TransportClient>,
    tokens: OnceCell<Tokens>,
}

impl UserPassAuth {
    /// Creates a provider logging in against `address` through `transport`.
    pub fn new(
        address: impl Into<String>,
        config: UserPassCredentialsConfig,
        transport: Arc<dyn TransportClient>,
    ) -> Self {
        let UserPassCredentialsConfig { username, password } = config;
        Self {
            address: address.into(),
            username,
            password,
            transport,
            tokens: OnceCell::new(),
        }
    }

    /// Returns `true` once a login has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.initialized()
    }

    /// Returns the refresh token from the login, if one has happened.
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.get().map(|t| t.refresh.as_str())
    }

    async fn login(&self) -> Result<Tokens, Error> {
        let url = build_url(&self.address, "/auth", &[])?;
        tracing::debug!(url = %url, username = %self.username, "Logging in");

        let request = Request::new(Method::Get, url)
            .with_basic_auth(self.username.as_str(), self.password.as_str());
        let response = self.transport.send(request).await?;

        if response.status() != 200 {
            tracing::debug!(status = response.status(), "Login rejected");
            return Err(Error::from_response(
                ErrorKind::Authentication,
                "Authentication failed. Verify your credentials.",
                &response,
            ));
        }

        let body: Value = response.json()?;
        let token = |key: &str| body.get(key).and_then(Value::as_str);
        match (token("access_token"), token("refresh_token")) {
            (Some(access), Some(refresh)) => {
                tracing::debug!("Login succeeded");
                Ok(Tokens {
                    access: Zeroizing::new(access.to_string()),
                    refresh: Zeroizing::new(refresh.to_string()),
                })
            }
            _ => Err(Error::from_response(
                ErrorKind::Authentication,
                "Authentication call did not return required tokens",
                &response,
            )),
        }
    }
}

impl fmt::Debug for UserPassAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassAuth")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AuthProvider for UserPassAuth {
    fn auth_header(&self) -> AuthFuture<'_> {
        Box::pin(async move {
            let tokens = self.tokens.get_or_try_init(|| self.login()).await?;
            Ok(format!("Bearer {}", tokens.access.as_str()))
        })
    }
}
