use thiserror::Error;

/// Errors surfaced while rendering or encoding a map.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("canvas error: {0}")]
    Canvas(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
