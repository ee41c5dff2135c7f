//! # Error Taxonomy
//!
//! Every failure surfaced by this crate carries a stable [`ErrorKind`] so that
//! callers can dispatch on the kind of failure instead of matching on message
//! strings. Transport adapters map their native failures (a gRPC
//! [`tonic::Status`], an HTTP status line) into this taxonomy at the boundary;
//! the retry policy decides which kinds are worth another attempt.

use tonic::Code;

/// Stable classification of client failures.
///
/// The set is closed: new failure sources must be mapped into one of these
/// kinds at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller violated a client-side precondition before any I/O.
    InvalidArgument,
    /// Client certificate materials could not be loaded at construction.
    MutualTlsSetupFailed,
    /// A per-attempt timeout, retry deadline, or operation deadline elapsed.
    DeadlineExceeded,
    /// The caller cancelled, or an operation terminated in a cancelled state.
    Cancelled,
    /// A transient server-side failure; retried when the policy allows it.
    TransientTransport,
    /// A permanent server-side failure; never retried.
    PermanentTransport,
    /// A long-running operation finished with an error status.
    OperationFailed,
}

/// Errors produced by the client runtime.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("mutual TLS setup failed: {0}")]
    MutualTlsSetup(String),

    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("transient transport failure (code {code}): {message}")]
    Transient { code: i32, message: String },

    #[error("permanent transport failure (code {code}): {message}")]
    Permanent { code: i32, message: String },

    #[error("operation failed (code {code}): {message}")]
    OperationFailed { code: i32, message: String },
}

impl Error {
    /// The stable kind tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::MutualTlsSetup(_) => ErrorKind::MutualTlsSetupFailed,
            Error::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
            Error::Cancelled(_) => ErrorKind::Cancelled,
            Error::Transient { .. } => ErrorKind::TransientTransport,
            Error::Permanent { .. } => ErrorKind::PermanentTransport,
            Error::OperationFailed { .. } => ErrorKind::OperationFailed,
        }
    }

    /// The server-supplied status payload, when one accompanied the failure.
    pub fn remote_status(&self) -> Option<(i32, &str)> {
        match self {
            Error::Transient { code, message }
            | Error::Permanent { code, message }
            | Error::OperationFailed { code, message } => Some((*code, message.as_str())),
            _ => None,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn mutual_tls_setup(message: impl Into<String>) -> Self {
        Error::MutualTlsSetup(message.into())
    }

    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Error::DeadlineExceeded(message.into())
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Error::Cancelled(message.into())
    }

    /// A serialization or deserialization failure. These are never retried;
    /// the bytes will not change on a second attempt.
    pub fn codec(message: impl Into<String>) -> Self {
        Error::Permanent {
            code: Code::Internal as i32,
            message: message.into(),
        }
    }

    /// A local failure with no server involvement, e.g. a runtime that could
    /// not be built.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Permanent {
            code: Code::Internal as i32,
            message: message.into(),
        }
    }

    /// Maps a terminal gRPC status into the taxonomy.
    pub fn from_grpc_status(status: &tonic::Status) -> Self {
        let code = status.code() as i32;
        let message = status.message().to_string();
        match status.code() {
            Code::Unavailable => Error::Transient { code, message },
            Code::DeadlineExceeded => Error::DeadlineExceeded(message),
            Code::Cancelled => Error::Cancelled(message),
            _ => Error::Permanent { code, message },
        }
    }

    /// Maps an HTTP response status into the taxonomy.
    pub fn from_http_status(status: u16, message: String) -> Self {
        let code = i32::from(status);
        match status {
            429 | 502 | 503 => Error::Transient { code, message },
            499 => Error::Cancelled(message),
            504 => Error::DeadlineExceeded(message),
            _ => Error::Permanent { code, message },
        }
    }
}
