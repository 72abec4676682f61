//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::error::FlipbookError;
use crate::sequence::validate_fps;
use crate::Result;

/// Where a player takes its frame rate from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FpsSource {
    /// Always use the player's `constant_fps`.
    Constant,
    /// Use the active sequence's authored rate; `constant_fps` while idle.
    #[default]
    FromSequence,
}

/// Per-player settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Fallback/constant frame rate in [1, 60].
    pub constant_fps: u8,
    pub fps_source: FpsSource,
    /// Speed modifier scaling the effective frame rate. Must be > 0.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            constant_fps: 10,
            fps_source: FpsSource::FromSequence,
            speed: 1.0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<()> {
        validate_fps(self.constant_fps as u32)?;
        validate_speed(self.speed)
    }
}

pub(crate) fn validate_speed(speed: f32) -> Result<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(FlipbookError::InvalidSpeed { speed })
    }
}
