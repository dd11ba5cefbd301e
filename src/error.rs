use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single translation request. Never aborts a run.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("service returned an empty translation")]
    EmptyResponse,

    #[error("text is {0} characters long, the service accepts at most {max}", max = crate::services::google::MAX_CHARS)]
    TooLong(usize),
}

/// Errors that stop the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Unsupported locale codes: {}", .0.join(", "))]
    UnsupportedLocales(Vec<String>),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", .path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RunError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunError::Io {
            path: path.into(),
            source,
        }
    }
}
