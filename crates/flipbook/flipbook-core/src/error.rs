//! Error types for the flipbook core

use serde::{Deserialize, Serialize};

use crate::frame::ActionKind;
use crate::payload::PayloadKind;

/// Errors raised while authoring, loading or configuring sequences and players.
///
/// Playback itself never fails: `tick`, `play`, `queue`, `skip` and `stop`
/// report outcomes instead of errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FlipbookError {
    /// Frames-per-second outside the authorable range
    #[error("Frame rate {fps} is out of range [1, 60]")]
    FpsOutOfRange { fps: u32 },

    /// Speed modifier that is not a positive finite number
    #[error("Speed modifier must be positive and finite, got: {speed}")]
    InvalidSpeed { speed: f32 },

    /// Bounded payload value outside [0, 1]
    #[error("Value {value} is out of range [0, 1]")]
    ValueOutOfRange { value: f32 },

    /// Declared payload type disagrees with the supplied value
    #[error("Payload type mismatch: expected {expected:?}, got {found}")]
    PayloadMismatch { expected: PayloadKind, found: String },

    /// Payload attached to a frame whose action carries none
    #[error("Frame action {action:?} does not carry a payload")]
    UnexpectedPayload { action: ActionKind },

    /// Authoring input contained no usable images
    #[error("No images supplied for sequence")]
    NoImages,

    /// Two sequences registered under one name
    #[error("Sequence already registered: {name}")]
    DuplicateSequence { name: String },

    /// Stored sequence JSON could not be parsed
    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

impl FlipbookError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::FpsOutOfRange { .. }
            | Self::InvalidSpeed { .. }
            | Self::ValueOutOfRange { .. }
            | Self::PayloadMismatch { .. }
            | Self::UnexpectedPayload { .. } => "validation",
            Self::NoImages | Self::DuplicateSequence { .. } => "authoring",
            Self::Parse { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for FlipbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
