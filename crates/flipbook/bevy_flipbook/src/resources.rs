use bevy::prelude::*;
use flipbook_core::{SequenceLibrary, SpriteSequence};

/// Sequences available to [`crate::AnimatorCommand`]s, keyed by name.
#[derive(Resource, Default)]
pub struct SpriteSequences(pub SequenceLibrary<Handle<Image>>);

impl SpriteSequences {
    /// Register a sequence loaded from stored JSON, turning each image key
    /// into a handle with `resolve` (typically `|path| asset_server.load(path)`).
    /// Replaces any sequence of the same name.
    pub fn insert_resolved(
        &mut self,
        stored: &SpriteSequence<String>,
        mut resolve: impl FnMut(&str) -> Handle<Image>,
    ) {
        let sequence = stored.map_images(|key| resolve(key));
        if self.0.insert_or_replace(sequence).is_some() {
            debug!("replaced sprite sequence '{}'", stored.name());
        }
    }

    pub fn get(&self, name: &str) -> Option<&SpriteSequence<Handle<Image>>> {
        self.0.get(name)
    }
}
