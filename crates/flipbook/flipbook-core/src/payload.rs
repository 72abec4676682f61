//! Typed data carried by `Action` frames.
//!
//! The payload type is fixed when the frame is built; listeners match on the
//! variant instead of casting at dispatch time.

use serde::{Deserialize, Serialize};

use crate::error::FlipbookError;
use crate::Result;

/// Payload type tag, reported alongside the value in action events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Text,
    Integer,
    Float,
    Range01,
    Custom,
}

impl PayloadKind {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Range01 => "range01",
            Self::Custom => "custom",
        }
    }
}

/// A float constrained to [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct UnitFloat(f32);

impl UnitFloat {
    pub fn new(value: f32) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FlipbookError::ValueOutOfRange { value })
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for UnitFloat {
    type Error = FlipbookError;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UnitFloat> for f32 {
    fn from(value: UnitFloat) -> Self {
        value.0
    }
}

/// Data delivered with an `Action` frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ActionPayload {
    Text(String),
    Integer(i32),
    Float(f32),
    Range01(UnitFloat),
    /// Application-defined payload identified by `kind`.
    Custom {
        kind: String,
        data: serde_json::Value,
    },
}

impl Default for ActionPayload {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl ActionPayload {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn range01(value: f32) -> Result<Self> {
        UnitFloat::new(value).map(Self::Range01)
    }

    pub fn custom(kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self::Custom {
            kind: kind.into(),
            data,
        }
    }

    #[inline]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Text(_) => PayloadKind::Text,
            Self::Integer(_) => PayloadKind::Integer,
            Self::Float(_) => PayloadKind::Float,
            Self::Range01(_) => PayloadKind::Range01,
            Self::Custom { .. } => PayloadKind::Custom,
        }
    }

    /// Build a payload of the declared `kind` from a JSON value.
    ///
    /// Values are never coerced across types: a string for an integer payload,
    /// or a fractional number for an integer payload, is a mismatch. Custom
    /// payloads accept any JSON and are tagged with the kind `"custom"`.
    pub fn from_json(kind: PayloadKind, value: serde_json::Value) -> Result<Self> {
        let mismatch = |value: &serde_json::Value| FlipbookError::PayloadMismatch {
            expected: kind,
            found: value.to_string(),
        };
        match kind {
            PayloadKind::Text => match value {
                serde_json::Value::String(s) => Ok(Self::Text(s)),
                other => Err(mismatch(&other)),
            },
            PayloadKind::Integer => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Self::Integer)
                .ok_or_else(|| mismatch(&value)),
            PayloadKind::Float => value
                .as_f64()
                .map(|n| Self::Float(n as f32))
                .ok_or_else(|| mismatch(&value)),
            PayloadKind::Range01 => {
                let n = value.as_f64().ok_or_else(|| mismatch(&value))?;
                Self::range01(n as f32)
            }
            PayloadKind::Custom => Ok(Self::custom("custom", value)),
        }
    }
}
