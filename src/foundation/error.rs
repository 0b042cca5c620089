/// Crate-wide result alias.
pub type SlideglowResult<T> = Result<T, SlideglowError>;

/// Error type shared by every slideglow module.
#[derive(thiserror::Error, Debug)]
pub enum SlideglowError {
    /// Invalid configuration, canvas, or layout parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font bytes could not be read or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Rasterization, buffer, or encode failure.
    #[error("render error: {0}")]
    Render(String),

    /// Config or row JSON could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with an attached context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideglowError {
    /// Build a [`SlideglowError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideglowError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SlideglowError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SlideglowError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
