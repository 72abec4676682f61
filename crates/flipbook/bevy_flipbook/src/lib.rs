use bevy::prelude::*;

pub mod components;
pub mod resources;
pub mod systems;

pub use components::SpriteAnimator;
pub use resources::SpriteSequences;
pub use systems::{apply_animator_commands, capture_idle_images, tick_sprite_animators};

/// Command addressed to the [`SpriteAnimator`] on `entity`.
#[derive(Event, Debug, Clone)]
pub struct AnimatorCommand {
    pub entity: Entity,
    pub command: flipbook_core::PlayerCommand,
}

/// Frame event raised by the animator on `entity`.
#[derive(Event, Debug, Clone)]
pub struct FlipbookEvent {
    pub entity: Entity,
    pub record: flipbook_core::EventRecord<Handle<Image>>,
}

/// System set containing the flipbook systems, for ordering against game logic.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlipbookSet;

pub struct FlipbookPlugin;

impl Plugin for FlipbookPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteSequences>()
            .add_event::<AnimatorCommand>()
            .add_event::<FlipbookEvent>()
            .add_systems(
                Update,
                (
                    capture_idle_images,
                    apply_animator_commands,
                    tick_sprite_animators,
                )
                    .chain()
                    .in_set(FlipbookSet),
            );
    }
}
