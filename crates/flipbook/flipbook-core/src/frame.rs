//! Single sprite frames and the lifecycle actions attached to them.

use serde::{Deserialize, Serialize};

use crate::payload::ActionPayload;

/// Payload-free tag of a [`FrameAction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    None,
    Enter,
    Action,
    Leave,
}

/// What happens when a frame is delivered.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FrameAction {
    /// Do nothing.
    #[default]
    None,
    /// Emit an entered event.
    Enter,
    /// Emit an action event carrying the payload.
    Action(ActionPayload),
    /// Emit a left event.
    Leave,
}

impl FrameAction {
    #[inline]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::None => ActionKind::None,
            Self::Enter => ActionKind::Enter,
            Self::Action(_) => ActionKind::Action,
            Self::Leave => ActionKind::Leave,
        }
    }

    #[inline]
    pub fn payload(&self) -> Option<&ActionPayload> {
        match self {
            Self::Action(payload) => Some(payload),
            _ => None,
        }
    }
}

/// One step of a sprite sequence: an image handle plus an optional action.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<I> {
    pub image: I,
    pub action: FrameAction,
}

impl<I> Frame<I> {
    pub fn new(image: I) -> Self {
        Self {
            image,
            action: FrameAction::None,
        }
    }

    pub fn enter(image: I) -> Self {
        Self {
            image,
            action: FrameAction::Enter,
        }
    }

    pub fn leave(image: I) -> Self {
        Self {
            image,
            action: FrameAction::Leave,
        }
    }

    pub fn with_payload(image: I, payload: ActionPayload) -> Self {
        Self {
            image,
            action: FrameAction::Action(payload),
        }
    }

    /// Build a frame from a payload-free tag. `Action` gets the default payload.
    pub fn from_kind(image: I, kind: ActionKind) -> Self {
        let action = match kind {
            ActionKind::None => FrameAction::None,
            ActionKind::Enter => FrameAction::Enter,
            ActionKind::Action => FrameAction::Action(ActionPayload::default()),
            ActionKind::Leave => FrameAction::Leave,
        };
        Self { image, action }
    }
}
