use bevy::prelude::*;

use crate::components::SpriteAnimator;
use crate::resources::SpriteSequences;
use crate::{AnimatorCommand, FlipbookEvent};
use flipbook_core::RenderTarget;

/// Newly added animators take the entity's current image as their idle image.
pub fn capture_idle_images(
    mut added: Query<(&mut SpriteAnimator, Option<&Handle<Image>>), Added<SpriteAnimator>>,
) {
    for (mut animator, handle) in added.iter_mut() {
        if animator.player().idle_image().is_none() {
            animator.player_mut().set_idle_image(handle.cloned());
        }
    }
}

/// Apply queued commands against the shared sequence library.
pub fn apply_animator_commands(
    mut commands: EventReader<AnimatorCommand>,
    time: Res<Time>,
    sequences: Res<SpriteSequences>,
    mut animators: Query<&mut SpriteAnimator>,
) {
    let now = time.elapsed_seconds_f64();
    for AnimatorCommand { entity, command } in commands.read() {
        let Ok(mut animator) = animators.get_mut(*entity) else {
            warn!("flipbook command for {entity:?} ignored: no SpriteAnimator");
            continue;
        };
        match animator.player_mut().apply_at(command, &sequences.0, now) {
            Ok(true) => {}
            Ok(false) => warn!("flipbook command {command:?} for {entity:?}: unknown sequence"),
            Err(err) => warn!(
                "flipbook command {command:?} for {entity:?} failed ({}): {err}",
                err.category()
            ),
        }
    }
}

/// Tick every animator, copy changed images into `Handle<Image>` and forward
/// frame events.
pub fn tick_sprite_animators(
    mut commands: Commands,
    time: Res<Time>,
    mut animators: Query<(Entity, &mut SpriteAnimator, Option<&mut Handle<Image>>)>,
    mut events: EventWriter<FlipbookEvent>,
) {
    let now = time.elapsed_seconds_f64();
    for (entity, mut animator, handle) in animators.iter_mut() {
        animator.player_mut().tick(now);

        let revision = animator.player().target().revision();
        if revision != animator.synced_revision {
            animator.synced_revision = revision;
            match (animator.player().target().image(), handle) {
                (Some(image), Some(mut handle)) => {
                    if *handle != *image {
                        *handle = image.clone();
                    }
                }
                (Some(image), None) => {
                    commands.entity(entity).insert(image.clone());
                }
                (None, Some(_)) => {
                    commands.entity(entity).remove::<Handle<Image>>();
                }
                (None, None) => {}
            }
        }

        for record in animator.events().drain() {
            events.send(FlipbookEvent { entity, record });
        }
    }
}
