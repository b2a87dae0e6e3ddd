//! Fire-and-forget sound seam
//!
//! The simulation never talks to an audio backend; it emits [`GameEvent`]s.
//! This module names the cue points and routes drained events to whatever
//! sink the shell injects. Calls carry no return value and no ordering
//! contract beyond call order.

use crate::sim::GameEvent;

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounces off the paddle
    PaddleBounce,
    /// Destructible brick breaks
    BrickBreak,
    /// Ball hits an indestructible brick
    SolidHit,
    /// Power-up caught by the paddle
    PowerUpPickup,
}

/// Injected audio backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Looping background track, started once at session init
    fn start_music(&mut self) {}
}

/// Sink that drops every cue (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Sound cue for a game event, if the event is audible
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
        GameEvent::SolidHit => Some(SoundEffect::SolidHit),
        GameEvent::PaddleBounce => Some(SoundEffect::PaddleBounce),
        GameEvent::PowerUpCaught { .. } => Some(SoundEffect::PowerUpPickup),
        _ => None,
    }
}

/// Route a frame's drained events into the sink
pub fn route_events(events: &[GameEvent], audio: &mut dyn AudioSink) {
    for event in events {
        if let Some(effect) = sound_for(event) {
            audio.play(effect);
        }
    }
}
