use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad constructor or reconfigure arguments. Always surfaced to the caller.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A target, surface or overlay went away between binding and use.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The host could not create the overlay content.
    #[error("Render failure: {0}")]
    RenderFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Whether the controller recovers from this error locally.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ResourceUnavailable(_) | Self::RenderFailure(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
