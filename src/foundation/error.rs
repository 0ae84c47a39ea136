/// Convenience result type used across spritetoast.
pub type ToastResult<T> = Result<T, ToastError>;

/// Top-level error taxonomy used by scene and toast APIs.
#[derive(thiserror::Error, Debug)]
pub enum ToastError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation that needs a parent node was called on a detached node.
    #[error("detached node: {0}")]
    Detached(String),

    /// Errors raised by the host scene (presentation, delegate callbacks).
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors when serializing or deserializing configuration or snapshots.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToastError {
    /// Build a [`ToastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ToastError::Detached`] value.
    pub fn detached(msg: impl Into<String>) -> Self {
        Self::Detached(msg.into())
    }

    /// Build a [`ToastError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`ToastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ToastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
