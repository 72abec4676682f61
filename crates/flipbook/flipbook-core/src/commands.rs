//! Serializable player commands.
//!
//! Adapters (web/Bevy) receive these from the host and apply them to a player
//! against a [`SequenceLibrary`], which resolves sequence names.

use serde::{Deserialize, Serialize};

use crate::library::SequenceLibrary;
use crate::player::{PlayMode, SpritePlayer};
use crate::render::RenderTarget;
use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerCommand {
    Play {
        sequence: String,
        #[serde(default)]
        mode: PlayMode,
    },
    Queue {
        sequence: String,
    },
    Skip,
    Stop,
    Pause,
    Resume,
    SetSpeed {
        speed: f32,
    },
}

impl<T: RenderTarget> SpritePlayer<T> {
    /// Apply a command. Unknown sequence names yield `Ok(false)`; invalid
    /// settings yield an error and leave the player unchanged.
    pub fn apply(
        &mut self,
        command: &PlayerCommand,
        library: &SequenceLibrary<T::Image>,
    ) -> Result<bool> {
        let accepted = match command {
            PlayerCommand::Play { sequence, mode } => self.play(library.get(sequence), *mode),
            PlayerCommand::Queue { sequence } => self.queue(library.get(sequence)),
            PlayerCommand::Skip => {
                self.skip();
                true
            }
            PlayerCommand::Stop => {
                self.stop();
                true
            }
            PlayerCommand::Pause => {
                self.pause();
                true
            }
            PlayerCommand::Resume => {
                self.resume();
                true
            }
            PlayerCommand::SetSpeed { speed } => {
                self.set_speed(*speed)?;
                true
            }
        };
        if !accepted {
            log::debug!("command {command:?} rejected: unknown sequence");
        }
        Ok(accepted)
    }

    /// Like [`SpritePlayer::apply`], first recording the host time `now` so
    /// frames delivered by the command are timed from it.
    pub fn apply_at(
        &mut self,
        command: &PlayerCommand,
        library: &SequenceLibrary<T::Image>,
        now: f64,
    ) -> Result<bool> {
        self.set_clock(now);
        self.apply(command, library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_use_tagged_json() {
        let cmd: PlayerCommand =
            serde_json::from_value(json!({"type": "play", "sequence": "walk"})).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::Play {
                sequence: "walk".into(),
                mode: PlayMode::Default
            }
        );

        let cmd: PlayerCommand = serde_json::from_value(
            json!({"type": "play", "sequence": "hit", "mode": "overwrite"}),
        )
        .unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::Play {
                mode: PlayMode::Overwrite,
                ..
            }
        ));

        let cmd: PlayerCommand = serde_json::from_value(json!({"type": "skip"})).unwrap();
        assert_eq!(cmd, PlayerCommand::Skip);
        assert_eq!(
            serde_json::to_value(PlayerCommand::SetSpeed { speed: 2.0 }).unwrap(),
            json!({"type": "set_speed", "speed": 2.0})
        );
    }

    #[test]
    fn apply_at_stamps_overwrite_with_host_time() {
        use crate::frame::Frame;
        use crate::render::ImageSlot;
        use crate::sequence::{LoopMode, SpriteSequence};
        use crate::{Advance, PlayerConfig};

        let mut lib = SequenceLibrary::new();
        lib.insert(
            SpriteSequence::new(
                "hit",
                10,
                LoopMode::Single,
                vec![Frame::new("h0"), Frame::new("h1")],
            )
            .unwrap(),
        )
        .unwrap();
        let mut p = SpritePlayer::new(ImageSlot::new(Some("idle")), PlayerConfig::default()).unwrap();
        let cmd = PlayerCommand::Play {
            sequence: "hit".into(),
            mode: PlayMode::Overwrite,
        };
        assert!(p.apply_at(&cmd, &lib, 5.0).unwrap());
        assert_eq!(p.last_advance_time(), Some(5.0));
        assert_eq!(p.tick(5.05), None);
        assert_eq!(p.tick(5.1), Some(Advance::Played));
    }
}
