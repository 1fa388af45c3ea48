use thiserror::Error;

/// Which phase of a run produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Transform,
    Write,
    Config,
}

/// The `Display` text of each variant is the status line shown to the user.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Error: {status}")]
    HttpStatus { status: reqwest::StatusCode },

    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    #[error("Unexpected error: {message}")]
    UnexpectedError { message: String },

    #[error("Unexpected error: invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("File write error: {0}")]
    FileWriteError(#[from] std::io::Error),

    #[error("Unexpected error while writing CSV: {message}")]
    WriteError { message: String },

    #[error("Configuration error: {field} = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    /// Sorts a client error into network or unexpected, the two outcomes a
    /// failed request can have besides a bad status.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            EtlError::UnexpectedError {
                message: err.to_string(),
            }
        } else {
            EtlError::NetworkError(err)
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::HttpStatus { .. }
            | EtlError::NetworkError(_)
            | EtlError::UnexpectedError { .. } => ErrorCategory::Fetch,
            EtlError::InvalidJson(_) => ErrorCategory::Transform,
            EtlError::FileWriteError(_) | EtlError::WriteError { .. } => ErrorCategory::Write,
            EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
