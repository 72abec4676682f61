//! Sprite player: play queue, active sequence and time-driven frame delivery.
//!
//! The player is driven from outside: call [`SpritePlayer::tick`] once per
//! host frame with a monotonic time in seconds. Nothing here blocks, spawns or
//! sleeps; commands such as `skip` and `stop` take effect immediately.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{validate_speed, FpsSource, PlayerConfig};
use crate::events::{ListenerId, SequenceEvent, SequenceListener};
use crate::frame::{Frame, FrameAction};
use crate::render::RenderTarget;
use crate::sequence::{validate_fps, SpriteSequence};
use crate::Result;

/// Slack allowed when comparing elapsed time against the frame interval, so
/// ticks landing on exact multiples of the interval are not lost to rounding.
const INTERVAL_EPSILON: f64 = 1e-9;

/// Policy used by [`SpritePlayer::play`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Replace the active sequence right away; the queue is untouched.
    #[default]
    Default,
    /// Like `Default`, unless a sequence with the same name is already active.
    Preserve,
    /// Append to the queue and advance one frame immediately.
    Overwrite,
}

/// Result of one frame advance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    /// A frame was delivered to the render target.
    Played,
    /// Nothing left to play; the render target shows the idle image.
    NotPlaying,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// No active sequence and an empty queue.
    Idle,
    /// A sequence is active or waiting in the queue.
    Playing,
}

impl PlayerState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
        }
    }
}

type BoxedListener<I> = Box<dyn SequenceListener<I> + Send + Sync>;

/// Per-entity sprite player.
pub struct SpritePlayer<T: RenderTarget> {
    config: PlayerConfig,
    target: T,
    idle_image: Option<T::Image>,
    active: Option<SpriteSequence<T::Image>>,
    queue: VecDeque<SpriteSequence<T::Image>>,
    paused: bool,
    /// Latest host time seen by `tick` or `set_clock`; stamps advances
    /// triggered outside a tick. `None` until the host reports a time.
    clock: Option<f64>,
    last_advance: Option<f64>,
    /// A frame went out before any host time was known; the next tick
    /// stamps it instead of advancing past it.
    unstamped: bool,
    next_interval: f64,
    current_frame: Option<Frame<T::Image>>,
    listeners: Vec<(ListenerId, BoxedListener<T::Image>)>,
    next_listener: u32,
}

fn interval_for(fps: u8, speed: f32) -> f64 {
    1.0 / (fps as f64 * speed as f64)
}

impl<T: RenderTarget> SpritePlayer<T> {
    /// Create a player writing into `target`. Whatever the target shows now
    /// becomes the idle image.
    pub fn new(target: T, config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        let idle_image = target.image().cloned();
        Ok(Self {
            next_interval: interval_for(config.constant_fps, config.speed),
            config,
            target,
            idle_image,
            active: None,
            queue: VecDeque::new(),
            paused: false,
            clock: None,
            last_advance: None,
            unstamped: false,
            current_frame: None,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    /// Scheduling heartbeat. Returns `None` when nothing happened: paused,
    /// idle, or not yet time for the next frame.
    pub fn tick(&mut self, now: f64) -> Option<Advance> {
        self.clock = Some(now);
        if self.paused || !self.is_playing() {
            return None;
        }
        if self.unstamped {
            self.unstamped = false;
            self.last_advance = Some(now);
            return None;
        }
        if let Some(last) = self.last_advance {
            if now - last + INTERVAL_EPSILON < self.next_interval {
                return None;
            }
        }
        Some(self.advance_frame())
    }

    /// Record the host time without advancing, so that `play`, `skip` and
    /// commands applied between ticks are stamped correctly.
    #[inline]
    pub fn set_clock(&mut self, now: f64) {
        self.clock = Some(now);
    }

    /// Deliver the next frame, pulling from the queue as needed.
    ///
    /// An exhausted sequence is dropped and the next queued one is served in
    /// the same call, so finishing a sequence never costs an extra tick.
    pub fn advance_frame(&mut self) -> Advance {
        loop {
            let mut active = match self.active.take() {
                Some(active) => active,
                None => match self.queue.pop_front() {
                    Some(next) => {
                        log::debug!("activating queued sequence '{}'", next.name());
                        next
                    }
                    None => {
                        self.unstamped = false;
                        self.target.set_image(self.idle_image.clone());
                        return Advance::NotPlaying;
                    }
                },
            };

            match active.request_frame_index() {
                Some(index) => {
                    self.deliver(&active, index);
                    self.active = Some(active);
                    return Advance::Played;
                }
                None => log::debug!("sequence '{}' finished", active.name()),
            }
        }
    }

    fn deliver(&mut self, active: &SpriteSequence<T::Image>, index: usize) {
        let frame = &active.frames()[index];

        self.target.set_image(Some(frame.image.clone()));
        self.current_frame = Some(frame.clone());
        self.last_advance = self.clock;
        self.unstamped = self.clock.is_none();
        let fps = match self.config.fps_source {
            FpsSource::Constant => self.config.constant_fps,
            FpsSource::FromSequence => active.fps(),
        };
        self.next_interval = interval_for(fps, self.config.speed);
        log::trace!(
            "'{}' frame {} at t={:?}, next in {:.4}s",
            active.name(),
            index,
            self.clock,
            self.next_interval
        );

        let event = match &frame.action {
            FrameAction::None => None,
            FrameAction::Enter => Some(SequenceEvent::Entered {
                sequence: active,
                frame,
                frame_index: index,
            }),
            FrameAction::Leave => Some(SequenceEvent::Left {
                sequence: active,
                frame,
                frame_index: index,
            }),
            FrameAction::Action(payload) => Some(SequenceEvent::Action {
                sequence: active,
                frame,
                frame_index: index,
                payload,
            }),
        };
        if let Some(event) = event {
            for (_, listener) in self.listeners.iter_mut() {
                listener.on_event(&event);
            }
        }
    }

    /// Start `sequence` under the given policy. Returns `false` when no
    /// sequence was given. Always clears the paused flag.
    pub fn play<'a>(
        &mut self,
        sequence: impl Into<Option<&'a SpriteSequence<T::Image>>>,
        mode: PlayMode,
    ) -> bool
    where
        T::Image: 'a,
    {
        self.paused = false;
        let Some(sequence) = sequence.into() else {
            return false;
        };

        match mode {
            PlayMode::Default => {
                let mut instance = sequence.new_instance();
                instance.reset();
                log::debug!("playing '{}'", instance.name());
                self.active = Some(instance);
            }
            PlayMode::Preserve => {
                if self
                    .active
                    .as_ref()
                    .is_some_and(|active| active.name() == sequence.name())
                {
                    return true;
                }
                log::debug!("playing '{}' (preserve)", sequence.name());
                self.active = Some(sequence.new_instance());
            }
            PlayMode::Overwrite => {
                self.queue.push_back(sequence.new_instance());
                self.advance_frame();
            }
        }
        true
    }

    /// Append a fresh instance of `sequence` to the back of the queue.
    pub fn queue<'a>(&mut self, sequence: impl Into<Option<&'a SpriteSequence<T::Image>>>) -> bool
    where
        T::Image: 'a,
    {
        match sequence.into() {
            Some(sequence) => {
                self.queue.push_back(sequence.new_instance());
                true
            }
            None => false,
        }
    }

    /// Drop the active sequence and immediately serve the next queued one.
    pub fn skip(&mut self) -> Advance {
        if let Some(active) = self.active.take() {
            log::debug!("skipping '{}'", active.name());
        }
        self.advance_frame()
    }

    /// Drop the active sequence and empty the queue. Fires no events and
    /// leaves the render target as it is.
    pub fn stop(&mut self) {
        log::debug!("stopping, {} queued sequence(s) discarded", self.queue.len());
        self.active = None;
        self.queue.clear();
        self.unstamped = false;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.paused = true;
    }

    #[inline]
    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a sequence is active or queued.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.active.is_some() || !self.queue.is_empty()
    }

    pub fn state(&self) -> PlayerState {
        if self.is_playing() {
            PlayerState::Playing
        } else {
            PlayerState::Idle
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.config.speed
    }

    /// Change the speed modifier. Applies from the next delivered frame.
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        validate_speed(speed)?;
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_constant_fps(&mut self, fps: u32) -> Result<()> {
        self.config.constant_fps = validate_fps(fps)?;
        Ok(())
    }

    pub fn set_fps_source(&mut self, source: FpsSource) {
        self.config.fps_source = source;
    }

    /// Frame rate used for the next interval, before the speed modifier.
    pub fn effective_fps(&self) -> u8 {
        match (self.config.fps_source, self.active.as_ref()) {
            (FpsSource::FromSequence, Some(active)) => active.fps(),
            _ => self.config.constant_fps,
        }
    }

    #[inline]
    pub fn next_interval(&self) -> f64 {
        self.next_interval
    }

    #[inline]
    pub fn last_advance_time(&self) -> Option<f64> {
        self.last_advance
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn active_sequence(&self) -> Option<&SpriteSequence<T::Image>> {
        self.active.as_ref()
    }

    /// Waiting sequences, next first.
    pub fn queued(&self) -> impl ExactSizeIterator<Item = &SpriteSequence<T::Image>> {
        self.queue.iter()
    }

    /// Last frame delivered to the render target.
    pub fn current_frame(&self) -> Option<&Frame<T::Image>> {
        self.current_frame.as_ref()
    }

    pub fn idle_image(&self) -> Option<&T::Image> {
        self.idle_image.as_ref()
    }

    pub fn set_idle_image(&mut self, image: Option<T::Image>) {
        self.idle_image = image;
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Register a listener. Listeners run in registration order.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: SequenceListener<T::Image> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a closure listener.
    pub fn subscribe_fn<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&SequenceEvent<'_, T::Image>) + Send + Sync + 'static,
    {
        self.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> fmt::Debug for SpritePlayer<T>
where
    T: RenderTarget + fmt::Debug,
    T::Image: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpritePlayer")
            .field("state", &self.state().name())
            .field("config", &self.config)
            .field("target", &self.target)
            .field("active", &self.active.as_ref().map(|s| s.name()))
            .field("queued", &self.queue.len())
            .field("paused", &self.paused)
            .field("last_advance", &self.last_advance)
            .field("next_interval", &self.next_interval)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
