//! Error types for soonerchat.
//!
//! Two error types split the failure space. [`TurnError`] covers everything
//! that can go wrong while asking the remote endpoint for one reply; the chat
//! session absorbs it into the conversation. [`Error`] covers everything else
//! (configuration, terminal input, transcript I/O) and ends the session.
//!
//! [`TurnError`] does not convert into [`Error`].

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Fatal errors that end the chat session.
#[derive(Clone, Debug)]
pub enum Error {
    /// The client is misconfigured (missing credential, bad base URL, invalid flag).
    Configuration {
        /// Human-readable error message.
        message: String,
        /// The setting that caused the error.
        param: Option<String>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// The line editor failed to read input.
    Input {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// HTTP client construction error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A URL parsing error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            param,
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new input error.
    pub fn input(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Input {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Returns true if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. } | Error::Url { .. })
    }

    /// Returns true if this error is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message, param } => {
                if let Some(param) = param {
                    write!(f, "Configuration error: {message} (setting: {param})")
                } else {
                    write!(f, "Configuration error: {message}")
                }
            }
            Error::Io { message, source } => {
                write!(f, "I/O error: {message}: {source}")
            }
            Error::Input { message, .. } => {
                write!(f, "Input error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Input { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            Error::Configuration { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for fatal soonerchat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure of a single chat turn.
///
/// Only the [`Display`](fmt::Display) text is meant for consumers; the chat
/// session embeds it in the assistant placeholder that stands in for the reply.
#[derive(Clone, Debug)]
pub enum TurnError {
    /// The endpoint answered with a non-success status.
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        body: String,
    },

    /// The endpoint answered with success but the body has no reply text.
    UnexpectedShape {
        /// The body, pretty-printed when it parsed as JSON.
        body: String,
    },

    /// No complete response arrived in time.
    Timeout {
        /// Human-readable error message.
        message: String,
        /// Duration of the timeout in seconds.
        duration: Option<f64>,
    },

    /// The endpoint could not be reached.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Any other transport failure.
    Http {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },
}

impl TurnError {
    /// Creates a new status error.
    pub fn status(status_code: u16, body: impl Into<String>) -> Self {
        TurnError::Status {
            status_code,
            body: body.into(),
        }
    }

    /// Creates a new unexpected-shape error.
    pub fn unexpected_shape(body: impl Into<String>) -> Self {
        TurnError::UnexpectedShape { body: body.into() }
    }

    /// Creates a new timeout error.
    pub fn timeout(message: impl Into<String>, duration: Option<f64>) -> Self {
        TurnError::Timeout {
            message: message.into(),
            duration,
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        TurnError::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new transport error.
    pub fn http(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        TurnError::Http {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Returns true if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TurnError::Timeout { .. })
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TurnError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::Status { status_code, body } => {
                write!(f, "HTTP {status_code}: {body}")
            }
            TurnError::UnexpectedShape { body } => {
                write!(f, "Unexpected response format: {body}")
            }
            TurnError::Timeout { message, duration } => {
                if let Some(duration) = duration {
                    write!(f, "Timeout error: {message} ({duration} seconds)")
                } else {
                    write!(f, "Timeout error: {message}")
                }
            }
            TurnError::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            TurnError::Http { message, .. } => {
                write!(f, "Request failed: {message}")
            }
        }
    }
}

impl error::Error for TurnError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TurnError::Connection { source, .. } | TurnError::Http { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            _ => None,
        }
    }
}
