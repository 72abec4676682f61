//! Lifecycle events fired when frames with actions are delivered.
//!
//! Listeners are called synchronously, in subscription order, before the
//! advancing call returns. A player without listeners simply drops events.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::payload::ActionPayload;
use crate::sequence::SpriteSequence;

/// Borrowed view of a dispatched event.
#[derive(Debug)]
pub enum SequenceEvent<'a, I> {
    Entered {
        sequence: &'a SpriteSequence<I>,
        frame: &'a Frame<I>,
        frame_index: usize,
    },
    Left {
        sequence: &'a SpriteSequence<I>,
        frame: &'a Frame<I>,
        frame_index: usize,
    },
    Action {
        sequence: &'a SpriteSequence<I>,
        frame: &'a Frame<I>,
        frame_index: usize,
        payload: &'a ActionPayload,
    },
}

impl<'a, I> SequenceEvent<'a, I> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Entered { .. } => EventKind::Entered,
            Self::Left { .. } => EventKind::Left,
            Self::Action { .. } => EventKind::Action,
        }
    }

    pub fn sequence(&self) -> &'a SpriteSequence<I> {
        match *self {
            Self::Entered { sequence, .. }
            | Self::Left { sequence, .. }
            | Self::Action { sequence, .. } => sequence,
        }
    }

    pub fn frame(&self) -> &'a Frame<I> {
        match *self {
            Self::Entered { frame, .. } | Self::Left { frame, .. } | Self::Action { frame, .. } => {
                frame
            }
        }
    }

    pub fn frame_index(&self) -> usize {
        match *self {
            Self::Entered { frame_index, .. }
            | Self::Left { frame_index, .. }
            | Self::Action { frame_index, .. } => frame_index,
        }
    }

    pub fn payload(&self) -> Option<&'a ActionPayload> {
        match *self {
            Self::Action { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl<'a, I: Clone> SequenceEvent<'a, I> {
    /// Owned copy suitable for queuing or serializing.
    pub fn to_record(&self) -> EventRecord<I> {
        EventRecord {
            kind: self.kind(),
            sequence: self.sequence().name().to_string(),
            frame_index: self.frame_index(),
            image: self.frame().image.clone(),
            payload: self.payload().cloned(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Entered,
    Left,
    Action,
}

/// Owned event, as forwarded by adapters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord<I> {
    pub kind: EventKind,
    pub sequence: String,
    pub frame_index: usize,
    pub image: I,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ActionPayload>,
}

/// Receives events from a player.
pub trait SequenceListener<I> {
    fn on_event(&mut self, event: &SequenceEvent<'_, I>);
}

impl<I, F> SequenceListener<I> for F
where
    F: FnMut(&SequenceEvent<'_, I>),
{
    fn on_event(&mut self, event: &SequenceEvent<'_, I>) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// Listener that records owned copies of every event into a shared buffer.
///
/// Clones share the same buffer, so one clone can be subscribed while the
/// other is kept for draining.
#[derive(Debug)]
pub struct EventBuffer<I> {
    records: Arc<Mutex<Vec<EventRecord<I>>>>,
}

impl<I> Clone for EventBuffer<I> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<I> Default for EventBuffer<I> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<I> EventBuffer<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every recorded event, oldest first.
    pub fn drain(&self) -> Vec<EventRecord<I>> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *records)
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<I: Clone> SequenceListener<I> for EventBuffer<I> {
    fn on_event(&mut self, event: &SequenceEvent<'_, I>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.to_record());
    }
}
