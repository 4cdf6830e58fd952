/// Result alias used throughout the crate.
pub type CutoutResult<T> = Result<T, CutoutError>;

/// Structural and configuration failures of a render.
///
/// The compositing math is total over its domain, so every variant here is detected before or
/// during a single render pass and is never recovered from mid-pass.
#[derive(thiserror::Error, Debug)]
pub enum CutoutError {
    /// A required catalog part (always including the canvas-defining base) has no image.
    #[error("missing required part '{part}'")]
    MissingRequiredPart {
        /// Catalog identifier of the missing part.
        part: String,
    },

    /// A supplied part image lacks alpha or has zero area.
    #[error("invalid image format for part '{part}': {reason}")]
    InvalidImageFormat {
        /// Catalog identifier of the offending part.
        part: String,
        /// Human-readable description of the defect.
        reason: String,
    },

    /// Non-positive duration/fps, an unknown part, or a malformed catalog.
    #[error("invalid animation spec: {0}")]
    InvalidSpec(String),

    /// Opaque failure from the encoder boundary.
    #[error("encoder failure: {0}")]
    EncoderFailure(String),

    /// Rig file (de)serialization failure.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CutoutError {
    pub fn missing_part(part: impl Into<String>) -> Self {
        Self::MissingRequiredPart { part: part.into() }
    }

    pub fn invalid_image(part: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidImageFormat {
            part: part.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidSpec(msg.into())
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::EncoderFailure(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
