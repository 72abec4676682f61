use bevy::prelude::*;
use flipbook_core::{
    Advance, EventBuffer, ImageSlot, PlayMode, PlayerConfig, SpritePlayer, SpriteSequence,
};

/// Sprite player attached to an entity. The entity's `Handle<Image>` is the
/// render target: it is captured as the idle image when the animator is added
/// and rewritten whenever the player shows a different frame.
#[derive(Component)]
pub struct SpriteAnimator {
    player: SpritePlayer<ImageSlot<Handle<Image>>>,
    events: EventBuffer<Handle<Image>>,
    pub(crate) synced_revision: u64,
}

impl SpriteAnimator {
    pub fn new(config: PlayerConfig) -> flipbook_core::Result<Self> {
        let mut player = SpritePlayer::new(ImageSlot::default(), config)?;
        let events = EventBuffer::new();
        player.subscribe(events.clone());
        Ok(Self {
            player,
            events,
            synced_revision: 0,
        })
    }

    #[inline]
    pub fn player(&self) -> &SpritePlayer<ImageSlot<Handle<Image>>> {
        &self.player
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut SpritePlayer<ImageSlot<Handle<Image>>> {
        &mut self.player
    }

    pub fn play(&mut self, sequence: &SpriteSequence<Handle<Image>>, mode: PlayMode) -> bool {
        self.player.play(sequence, mode)
    }

    pub fn queue(&mut self, sequence: &SpriteSequence<Handle<Image>>) -> bool {
        self.player.queue(sequence)
    }

    pub fn skip(&mut self) -> Advance {
        self.player.skip()
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn resume(&mut self) {
        self.player.resume();
    }

    pub(crate) fn events(&self) -> &EventBuffer<Handle<Image>> {
        &self.events
    }
}
