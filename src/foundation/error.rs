/// Convenience result type used across the engine.
pub type MockupResult<T> = Result<T, MockupError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Validators never produce these; they return structured reports instead.
#[derive(thiserror::Error, Debug)]
pub enum MockupError {
    /// Invalid user-provided data that cannot be turned into a report (unparseable JSON, bad flags).
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawing surface could not be allocated or a worker vanished.
    #[error("resource error: {0}")]
    Resource(String),

    /// Degenerate input reached the renderer (zero-sized images, out-of-bounds design area).
    #[error("input error: {0}")]
    Input(String),

    /// Lossless encoding of the final raster failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockupError {
    /// Build a [`MockupError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MockupError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`MockupError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`MockupError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MockupError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
