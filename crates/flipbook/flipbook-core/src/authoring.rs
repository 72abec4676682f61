//! Building sequences from images.
//!
//! Authoring diagnostics (dropped images, empty sequences) are logged here;
//! playback code stays silent about them.

use std::path::Path;
use std::sync::Arc;

use crate::error::FlipbookError;
use crate::frame::{Frame, FrameAction};
use crate::payload::ActionPayload;
use crate::sequence::{LoopMode, SpriteSequence};
use crate::Result;

/// Default frame rate for newly authored sequences.
pub const DEFAULT_FPS: u32 = 10;

/// Sequence name for an image named like `walk_03.png`: the file stem up to
/// the first underscore (`walk`).
pub fn sequence_name_from_image(image_name: &str) -> &str {
    let stem = Path::new(image_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(image_name);
    stem.split('_').next().unwrap_or(stem)
}

/// Build a sequence from named images, in order.
///
/// Missing images are skipped. The name comes from the last image (see
/// [`sequence_name_from_image`]). The first frame enters and the last frame
/// leaves; a single frame only enters.
pub fn sequence_from_images<I, N>(
    images: impl IntoIterator<Item = (N, Option<I>)>,
    fps: u32,
    mode: LoopMode,
) -> Result<SpriteSequence<I>>
where
    N: AsRef<str>,
{
    let mut name = String::new();
    let mut kept: Vec<I> = Vec::new();
    for (image_name, image) in images {
        let image_name = image_name.as_ref();
        match image {
            Some(image) => {
                name = sequence_name_from_image(image_name).to_string();
                kept.push(image);
            }
            None => log::warn!("skipping missing image '{image_name}'"),
        }
    }

    if kept.is_empty() {
        log::warn!("no images supplied, sequence not created");
        return Err(FlipbookError::NoImages);
    }

    let last = kept.len() - 1;
    let frames = kept
        .into_iter()
        .enumerate()
        .map(|(i, image)| match i {
            0 => Frame::enter(image),
            i if i == last => Frame::leave(image),
            _ => Frame::new(image),
        })
        .collect();

    log::debug!("authored sequence '{name}' ({} frames)", last + 1);
    SpriteSequence::new(name, fps, mode, frames)
}

/// Incremental sequence builder.
#[derive(Debug)]
pub struct SequenceBuilder<I> {
    name: Arc<str>,
    fps: u32,
    mode: LoopMode,
    frames: Vec<Frame<I>>,
}

impl<I> SequenceBuilder<I> {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            fps: DEFAULT_FPS,
            mode: LoopMode::Single,
            frames: Vec::new(),
        }
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn mode(mut self, mode: LoopMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn frame(mut self, frame: Frame<I>) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn image(self, image: I) -> Self {
        self.frame(Frame::new(image))
    }

    pub fn enter(self, image: I) -> Self {
        self.frame(Frame::enter(image))
    }

    pub fn leave(self, image: I) -> Self {
        self.frame(Frame::leave(image))
    }

    pub fn action(self, image: I, payload: ActionPayload) -> Self {
        self.frame(Frame::with_payload(image, payload))
    }

    /// Append a frame if `image` is present; a missing image is ignored.
    pub fn push_image(&mut self, image: Option<I>, action: FrameAction) -> bool {
        match image {
            Some(image) => {
                self.frames.push(Frame { image, action });
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn build(self) -> Result<SpriteSequence<I>> {
        if self.frames.is_empty() {
            log::warn!("sequence '{}' has no frames", self.name);
        }
        SpriteSequence::new(self.name, self.fps, self.mode, self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ActionKind;

    #[test]
    fn names_follow_prefix_convention() {
        assert_eq!(sequence_name_from_image("walk_03.png"), "walk");
        assert_eq!(sequence_name_from_image("sprites/run_1"), "run");
        assert_eq!(sequence_name_from_image("idle"), "idle");
    }

    #[test]
    fn from_images_marks_enter_and_leave() {
        let seq = sequence_from_images(
            [
                ("hero_0", Some(0)),
                ("hero_1", None),
                ("hero_2", Some(2)),
                ("hero_3", Some(3)),
            ],
            12,
            LoopMode::Loop,
        )
        .unwrap();
        assert_eq!(seq.name(), "hero");
        assert_eq!(seq.fps(), 12);
        let kinds: Vec<_> = seq.frames().iter().map(|f| f.action.kind()).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Enter, ActionKind::None, ActionKind::Leave]
        );
        let images: Vec<_> = seq.frames().iter().map(|f| f.image).collect();
        assert_eq!(images, vec![0, 2, 3]);
    }

    #[test]
    fn single_image_only_enters() {
        let seq = sequence_from_images([("pose_0", Some('x'))], 10, LoopMode::Single).unwrap();
        assert_eq!(seq.frames()[0].action.kind(), ActionKind::Enter);
    }

    #[test]
    fn no_images_is_an_error() {
        let res = sequence_from_images::<u8, &str>([("a_0", None)], 10, LoopMode::Single);
        assert_eq!(res.unwrap_err(), FlipbookError::NoImages);
    }

    #[test]
    fn builder_collects_frames() {
        let mut builder = SequenceBuilder::new("attack")
            .fps(24)
            .mode(LoopMode::Single)
            .enter("a0")
            .action("a1", ActionPayload::Integer(5))
            .leave("a2");
        assert!(!builder.push_image(None, FrameAction::None));
        assert!(builder.push_image(Some("a3"), FrameAction::None));
        let seq = builder.build().unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.fps(), 24);
        assert_eq!(
            seq.frames()[1].action.payload(),
            Some(&ActionPayload::Integer(5))
        );
    }

    #[test]
    fn builder_validates_fps() {
        assert!(SequenceBuilder::<u8>::new("x").fps(90).build().is_err());
        assert!(SequenceBuilder::<u8>::new("x").build().unwrap().is_empty());
    }
}
