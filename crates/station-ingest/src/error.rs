use thiserror::Error;

/// Errors surfaced while loading station metadata and readings.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP status {0}")]
    Status(u16),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("CSV is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::Csv(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
