//! Main error type for the Sensu Go client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;
use crate::transport::Response;

/// The primary error type for Sensu Go client operations.
///
/// `Error` provides context for debugging and error handling:
/// - [`kind()`](Error::kind): Categorization for `match` statements
/// - [`url()`](Error::url), [`status()`](Error::status), [`body()`](Error::body):
///   the backend exchange that triggered the error, when there was one
/// - [`is_not_found()`](Error::is_not_found): Quick check for a `404`
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── url: Option              (request URL)
/// ├── status: Option           (HTTP status of the reply)
/// ├── body: Option             (raw reply text)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use sensu_go::{Error, ErrorKind};
///
/// fn handle_error(err: Error) {
///     match err.kind() {
///         ErrorKind::Authentication => eprintln!("check your credentials"),
///         ErrorKind::UnexpectedStatus if err.is_not_found() => eprintln!("gone"),
///         kind if kind.is_transport() => eprintln!("backend unreachable: {}", err),
///         _ => eprintln!("{}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// URL of the request that produced the error.
    url: Option<String>,

    /// HTTP status of the offending response.
    status: Option<u16>,

    /// Raw body of the offending response.
    body: Option<String>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sensu_go::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidArgument, "metadata needs a name");
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            url: None,
            status: None,
            body: None,
            source: None,
        }
    }

    /// Creates an error describing a backend reply.
    pub(crate) fn from_response(
        kind: ErrorKind,
        message: impl Into<Cow<'static, str>>,
        response: &Response,
    ) -> Self {
        Self::new(kind, message).with_http_context(
            response.url(),
            response.status(),
            response.text(),
        )
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the HTTP context.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the URL of the request that failed, if the error came from a
    /// backend reply.
    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the HTTP status of the reply, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the raw response body, if any.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns `true` if the backend answered with `404 Not Found`.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Attaches the URL, status and body of a backend exchange.
    #[must_use]
    pub fn with_http_context(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.url = Some(url.into());
        self.status = Some(status);
        self.body = Some(body.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for errors raised without a backend reply

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates an already-exists error.
    pub fn already_exists(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a generic transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref url) = self.url {
            write!(f, "\n  url: {}", url)?;
        }
        if let Some(status) = self.status {
            write!(f, "\n  status: {}", status)?;
        }
        if let Some(ref body) = self.body {
            write!(f, "\n  text: {}", body)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::InvalidResponse, format!("JSON error: {}", err)).with_source(err)
    }
}
