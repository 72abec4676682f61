//! Authored sprite sequences and their per-instance frame cursor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FlipbookError;
use crate::frame::Frame;
use crate::Result;

/// Lowest authorable frame rate.
pub const MIN_FPS: u8 = 1;
/// Highest authorable frame rate.
pub const MAX_FPS: u8 = 60;

/// How a sequence behaves after its last frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Play through once, then report the end of the sequence.
    #[default]
    Single,
    /// Wrap around indefinitely until skipped or stopped.
    Loop,
}

/// Validate an authored frame rate.
pub fn validate_fps(fps: u32) -> Result<u8> {
    if (MIN_FPS as u32..=MAX_FPS as u32).contains(&fps) {
        Ok(fps as u8)
    } else {
        Err(FlipbookError::FpsOutOfRange { fps })
    }
}

/// A named, ordered run of frames with playback metadata.
///
/// Frame data is shared between instances and never mutated after authoring.
/// The cursor belongs to this instance only; use [`SpriteSequence::new_instance`]
/// to get an independent copy starting at frame 0.
#[derive(Clone, Debug)]
pub struct SpriteSequence<I> {
    name: Arc<str>,
    fps: u8,
    mode: LoopMode,
    frames: Arc<[Frame<I>]>,
    cursor: usize,
}

impl<I> SpriteSequence<I> {
    pub fn new(
        name: impl Into<Arc<str>>,
        fps: u32,
        mode: LoopMode,
        frames: Vec<Frame<I>>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            fps: validate_fps(fps)?,
            mode,
            frames: frames.into(),
            cursor: 0,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn fps(&self) -> u8 {
        self.fps
    }

    #[inline]
    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    #[inline]
    pub fn frames(&self) -> &[Frame<I>] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// Frame under the cursor, if any.
    pub fn current_frame(&self) -> Option<&Frame<I>> {
        self.frames.get(self.cursor)
    }

    /// Return the frame under the cursor and move the cursor on.
    ///
    /// `Single` sequences yield every frame once, then return `None` exactly
    /// once and rewind to 0. `Loop` sequences wrap and never return `None`
    /// unless they have no frames. An empty sequence always returns `None`
    /// and leaves the cursor alone.
    pub fn request_frame(&mut self) -> Option<&Frame<I>> {
        let index = self.request_frame_index()?;
        self.frames.get(index)
    }

    /// Same as [`SpriteSequence::request_frame`], returning the index of the
    /// delivered frame instead of a reference.
    pub fn request_frame_index(&mut self) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }

        let index = self.cursor;
        match self.mode {
            LoopMode::Single => {
                // Compared after the increment: the last frame is still handed
                // out, and only the following request reports the end.
                self.cursor += 1;
                if self.cursor > self.frames.len() {
                    self.reset();
                    return None;
                }
            }
            LoopMode::Loop => self.advance(),
        }

        Some(index)
    }

    /// Move the cursor one frame forward, wrapping at the end.
    pub fn advance(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.frames.len();
    }

    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Independent instance sharing this sequence's frames, with the cursor at 0.
    pub fn new_instance(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            fps: self.fps,
            mode: self.mode,
            frames: Arc::clone(&self.frames),
            cursor: 0,
        }
    }

    /// Whether two sequences share the same authored frame storage.
    pub fn shares_frames_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }

    /// Copy of this sequence with every image converted by `f`, e.g. from
    /// stored image keys to engine texture handles. The cursor starts at 0.
    pub fn map_images<J>(&self, mut f: impl FnMut(&I) -> J) -> SpriteSequence<J> {
        let frames: Vec<Frame<J>> = self
            .frames
            .iter()
            .map(|frame| Frame {
                image: f(&frame.image),
                action: frame.action.clone(),
            })
            .collect();
        SpriteSequence {
            name: Arc::clone(&self.name),
            fps: self.fps,
            mode: self.mode,
            frames: frames.into(),
            cursor: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(mode: LoopMode, n: usize) -> SpriteSequence<usize> {
        SpriteSequence::new("s", 10, mode, (0..n).map(Frame::new).collect()).unwrap()
    }

    #[test]
    fn fps_range_is_enforced() {
        assert!(SpriteSequence::<u8>::new("a", 0, LoopMode::Single, vec![]).is_err());
        assert!(SpriteSequence::<u8>::new("a", 61, LoopMode::Single, vec![]).is_err());
        assert_eq!(
            SpriteSequence::<u8>::new("a", 60, LoopMode::Single, vec![])
                .unwrap()
                .fps(),
            60
        );
    }

    #[test]
    fn advance_wraps_and_ignores_empty() {
        let mut s = seq(LoopMode::Single, 3);
        s.advance();
        s.advance();
        s.advance();
        assert_eq!(s.current_index(), 0);

        let mut empty = seq(LoopMode::Loop, 0);
        empty.advance();
        assert_eq!(empty.current_index(), 0);
    }

    #[test]
    fn new_instance_rewinds_and_shares_frames() {
        let mut s = seq(LoopMode::Loop, 4);
        s.request_frame();
        s.request_frame();
        let copy = s.new_instance();
        assert_eq!(copy.current_index(), 0);
        assert_eq!(s.current_index(), 2);
        assert!(copy.shares_frames_with(&s));
    }

    #[test]
    fn map_images_keeps_actions_and_metadata() {
        let s = SpriteSequence::new(
            "walk",
            12,
            LoopMode::Loop,
            vec![Frame::enter("w0"), Frame::leave("w1")],
        )
        .unwrap();
        let mapped = s.map_images(|img| img.len());
        assert_eq!(mapped.name(), "walk");
        assert_eq!(mapped.fps(), 12);
        assert_eq!(mapped.mode(), LoopMode::Loop);
        assert_eq!(mapped.frames()[0], Frame::enter(2));
        assert_eq!(mapped.frames()[1], Frame::leave(2));
    }

    #[test]
    fn current_frame_tracks_cursor() {
        let mut s = seq(LoopMode::Loop, 2);
        assert_eq!(s.current_frame().map(|f| f.image), Some(0));
        s.advance();
        assert_eq!(s.current_frame().map(|f| f.image), Some(1));
        assert!(seq(LoopMode::Loop, 0).current_frame().is_none());
    }
}
