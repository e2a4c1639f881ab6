use std::time::Duration;

/// Convenience result type used across decision-wheels.
pub type WheelsResult<T> = Result<T, WheelsError>;

/// Top-level error taxonomy.
///
/// Malformed user input is never reported here: validators normalize it to a safe value instead.
/// What remains are recoverable conditions the caller is expected to surface to the user.
#[derive(thiserror::Error, Debug)]
pub enum WheelsError {
    /// An operation was requested in a state that does not allow it (for example exporting an
    /// empty working set, or removing the last consideration of an opportunity).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The raster bridge could not decode or draw the vector document.
    #[error("decode error: {0}")]
    Decode(String),

    /// The raster bridge did not report a result within the configured timeout.
    #[error("raster timed out after {0:?}")]
    Timeout(Duration),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WheelsError {
    /// Build a [`WheelsError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`WheelsError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WheelsError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the caller should offer the vector export instead of the raster one.
    pub fn suggests_vector_fallback(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
