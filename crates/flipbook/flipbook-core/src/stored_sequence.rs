use serde::Deserialize;

use crate::authoring::DEFAULT_FPS;
use crate::error::FlipbookError;
use crate::frame::{ActionKind, Frame, FrameAction};
use crate::library::SequenceLibrary;
use crate::payload::{ActionPayload, PayloadKind};
use crate::sequence::{LoopMode, SpriteSequence};
use crate::Result;

/// Public API: parse a stored sequence JSON document into a sequence whose
/// image handles are the image keys from the file.
///
/// Notes:
/// - `fps` defaults to 10, `playback` to `"single"`, `action` to `"none"`.
/// - `data` is only legal on `"action"` frames; its declared `type` must agree
///   with `value` (no coercion). An `"action"` frame without `data` carries an
///   empty text payload.
/// - Sequences with no frames load, with a warning.
pub fn parse_sequence_json(s: &str) -> Result<SpriteSequence<String>> {
    let stored: StoredSequence = serde_json::from_str(s)?;
    to_sequence(stored)
}

/// Parse a JSON array of stored sequences into a library. Duplicate names fail.
pub fn parse_library_json(s: &str) -> Result<SequenceLibrary<String>> {
    let stored: Vec<StoredSequence> = serde_json::from_str(s)?;
    let mut library = SequenceLibrary::new();
    for sequence in stored {
        library.insert(to_sequence(sequence)?)?;
    }
    Ok(library)
}

fn to_sequence(stored: StoredSequence) -> Result<SpriteSequence<String>> {
    let mut frames: Vec<Frame<String>> = Vec::with_capacity(stored.frames.len());
    for sf in stored.frames {
        let action = match (sf.action, sf.data) {
            (ActionKind::Action, Some(data)) => FrameAction::Action(to_payload(data)?),
            (ActionKind::Action, None) => FrameAction::Action(ActionPayload::default()),
            (action, Some(_)) => return Err(FlipbookError::UnexpectedPayload { action }),
            (ActionKind::None, None) => FrameAction::None,
            (ActionKind::Enter, None) => FrameAction::Enter,
            (ActionKind::Leave, None) => FrameAction::Leave,
        };
        frames.push(Frame {
            image: sf.image,
            action,
        });
    }

    if frames.is_empty() {
        log::warn!("sequence '{}' has no frames", stored.name);
    }
    SpriteSequence::new(stored.name, stored.fps, stored.playback, frames)
}

fn to_payload(data: StoredPayload) -> Result<ActionPayload> {
    match data.r#type {
        PayloadKind::Custom => Ok(ActionPayload::custom(
            data.kind.unwrap_or_else(|| PayloadKind::Custom.name().to_string()),
            data.value,
        )),
        kind => ActionPayload::from_json(kind, data.value),
    }
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredSequence {
    pub name: String,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub playback: LoopMode,
    #[serde(default)]
    pub frames: Vec<StoredFrame>,
}

#[derive(Debug, Deserialize)]
struct StoredFrame {
    pub image: String,
    #[serde(default)]
    pub action: ActionKind,
    #[serde(default)]
    pub data: Option<StoredPayload>,
}

#[derive(Debug, Deserialize)]
struct StoredPayload {
    pub r#type: PayloadKind,
    #[serde(default)]
    pub value: serde_json::Value,
    /// Application tag for custom payloads.
    #[serde(default)]
    pub kind: Option<String>,
}
