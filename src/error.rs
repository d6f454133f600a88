// Error types for the library surface. The binary wraps these in
// `anyhow` and decides how to report them; library code only propagates.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised by `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client itself could not be built (TLS backend, etc).
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// DNS, TCP, TLS or timeout failure: the server was never reached.
    #[error("could not reach {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request failed: {status} - {body}")]
    Http { status: StatusCode, body: String },

    #[error("could not decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the failed response, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection { .. })
    }
}

/// Startup configuration problems detected before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} still holds its placeholder value")]
    Placeholder { field: &'static str },
}

/// Failures of the spreadsheet import flow.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The reader needed for this file type was not compiled in.
    #[error("no reader available for {0} files (rebuild with the matching feature enabled)")]
    ReaderUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("row {row}: amount {value:?} is not a number")]
    InvalidAmount { row: usize, value: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, ApiError>;
