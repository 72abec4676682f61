//! Flipbook Core (engine-agnostic)
//!
//! Frame sequencing for sprite-sheet animation: authored sequences of images,
//! a per-entity player with a play queue, and ENTER/ACTION/LEAVE frame events.
//! The player owns no clock and no renderer; hosts drive it with `tick(now)`
//! and receive images through a [`RenderTarget`].

pub mod authoring;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod library;
pub mod payload;
pub mod player;
pub mod render;
pub mod sequence;
pub mod stored_sequence;

// Re-exports for consumers (adapters)
pub use authoring::{sequence_from_images, sequence_name_from_image, SequenceBuilder};
pub use commands::PlayerCommand;
pub use config::{FpsSource, PlayerConfig};
pub use error::FlipbookError;
pub use events::{
    EventBuffer, EventKind, EventRecord, ListenerId, SequenceEvent, SequenceListener,
};
pub use frame::{ActionKind, Frame, FrameAction};
pub use library::SequenceLibrary;
pub use payload::{ActionPayload, PayloadKind, UnitFloat};
pub use player::{Advance, PlayMode, PlayerState, SpritePlayer};
pub use render::{ImageSlot, RenderTarget};
pub use sequence::{LoopMode, SpriteSequence, MAX_FPS, MIN_FPS};
pub use stored_sequence::{parse_library_json, parse_sequence_json};

pub type Result<T> = core::result::Result<T, FlipbookError>;
