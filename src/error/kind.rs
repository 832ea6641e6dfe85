//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types. None of
/// the kinds are retried by the client; every failure is surfaced to the
/// immediate caller.
///
/// | ErrorKind          | Raised when                                          |
/// |--------------------|------------------------------------------------------|
/// | `Connection`       | The backend cannot be reached                        |
/// | `Timeout`          | The transport gave up waiting for the backend        |
/// | `Authentication`   | Login was rejected or returned no tokens             |
/// | `UnexpectedStatus` | A response status is outside the expected set        |
/// | `InvalidResponse`  | A body that should be JSON could not be decoded      |
/// | `AlreadyExists`    | `create()` found a resource at the target path       |
/// | `InvalidArgument`  | A resource failed local shape validation             |
/// | `Configuration`    | Bad URL, unreadable CA bundle, dropped client        |
/// | `Transport`        | Any other transport-level failure                    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Connection error (DNS, TLS handshake, refused connection).
    #[error("connection error")]
    Connection,

    /// The request timed out before the backend answered.
    #[error("timeout")]
    Timeout,

    /// Authentication failed (bad credentials or malformed token response).
    ///
    /// HTTP: any non-200 from `GET /auth`.
    #[error("authentication failed")]
    Authentication,

    /// The backend answered with a status outside the operation's expected set.
    ///
    /// Use [`Error::status()`](crate::Error::status) to inspect the status;
    /// [`Error::is_not_found()`](crate::Error::is_not_found) is the common check.
    #[error("unexpected status")]
    UnexpectedStatus,

    /// The response body could not be decoded or had the wrong shape.
    #[error("invalid response")]
    InvalidResponse,

    /// A resource already exists at the path `create()` targets.
    ///
    /// Raised locally; no write request is issued.
    #[error("already exists")]
    AlreadyExists,

    /// Invalid argument, typically a resource failing local validation.
    #[error("invalid argument")]
    InvalidArgument,

    /// Configuration error (invalid URL, missing TLS material, dropped client).
    #[error("configuration error")]
    Configuration,

    /// Generic transport error that fits none of the other categories.
    #[error("transport error")]
    Transport,
}

impl ErrorKind {
    /// Returns `true` if this error originates from the network layer rather
    /// than from a backend reply.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::Transport
        )
    }

    /// Returns `true` if this error was raised because of a backend reply.
    #[inline]
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            ErrorKind::Authentication | ErrorKind::UnexpectedStatus | ErrorKind::InvalidResponse
        )
    }
}
