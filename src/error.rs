/// Errors produced by the DriveEasy API client.
///
/// Every backend call resolves to exactly one success payload or one of
/// these variants. The client never recovers an error on its own; callers
/// decide whether to surface, log, or retry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A credential was required but none is present. Raised before any
    /// network I/O happens.
    #[error("not authenticated")]
    Unauthenticated,

    /// The server rejected the request. `message` is the error text from
    /// the response body.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport failure: no usable response was received.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Not a valid email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the server answered with the given status code.
    #[must_use]
    pub fn is_status(&self, status: u16) -> bool {
        matches!(self, Self::Http { status: s, .. } if *s == status)
    }
}
