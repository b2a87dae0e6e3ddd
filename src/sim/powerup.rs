//! Power-up lifecycle: spawn, fall, catch, expire
//!
//! Every kind is a closed enum variant so activation and deactivation stay
//! exhaustive. Stacked power-ups of one kind extend the effect: expiry only
//! unwinds once no other activated instance of the same kind remains.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::NEUTRAL_TINT;
use crate::consts::*;

/// The closed set of power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
    Split,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
        PowerUpKind::Split,
    ];

    /// Spawn chance denominator: each destroyed brick rolls 1-in-N per kind
    fn spawn_odds(self) -> u32 {
        match self {
            PowerUpKind::Speed
            | PowerUpKind::Sticky
            | PowerUpKind::PassThrough
            | PowerUpKind::PadSizeIncrease => 75,
            // Negative power-ups drop more often
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15,
            PowerUpKind::Split => 5,
        }
    }

    /// Effect duration in seconds; 0 means one-shot, never unwound
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Confuse => 15.0,
            PowerUpKind::Chaos => 15.0,
            PowerUpKind::Split => 0.0,
        }
    }

    /// Tint of the falling drop sprite
    pub fn tint(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
            PowerUpKind::Split => Vec3::new(0.0, 0.5, 1.0),
        }
    }
}

/// A falling (or already caught) power-up drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub tint: Vec3,
    /// Remaining effect time once activated
    pub duration: f32,
    /// Off the field or caught; removal waits for the effect to unwind
    pub destroyed: bool,
    /// Effect currently engaged
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: POWERUP_SIZE,
            vel: POWERUP_VELOCITY,
            tint: kind.tint(),
            duration: kind.duration(),
            destroyed: false,
            activated: false,
        }
    }
}

/// Roll the spawn table for one destroyed brick
///
/// Each kind draws independently; any subset (none included) may drop.
pub fn spawn_powerups(rng: &mut impl Rng, brick_pos: Vec2, out: &mut Vec<PowerUp>) {
    for kind in PowerUpKind::ALL {
        if rng.random_ratio(1, kind.spawn_odds()) {
            out.push(PowerUp::new(kind, brick_pos));
        }
    }
}

/// Whether another activated power-up of the same kind is still live
///
/// Linear scan over the collection; entity counts stay in the tens.
pub fn is_other_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups.iter().any(|p| p.activated && p.kind == kind)
}

/// Engage a caught power-up's effect
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("power-up activated: {kind:?}");
    match kind {
        PowerUpKind::Speed => {
            for ball in &mut state.balls {
                ball.vel *= BALL_SPEED_MULTIPLIER;
            }
        }
        PowerUpKind::Sticky => {
            for ball in &mut state.balls {
                ball.sticky = true;
            }
            state.paddle.tint = Vec3::new(1.0, 0.5, 1.0);
        }
        PowerUpKind::PassThrough => {
            for ball in &mut state.balls {
                ball.pass_through = true;
                ball.tint = Vec3::new(1.0, 0.5, 0.5);
            }
        }
        PowerUpKind::PadSizeIncrease => {
            // Duration 0: widening is permanent for the session/level
            state.paddle.size.x += PADDLE_WIDEN_AMOUNT;
        }
        PowerUpKind::Confuse => {
            if !state.fx.chaos {
                state.fx.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !state.fx.confuse {
                state.fx.chaos = true;
            }
        }
        PowerUpKind::Split => {
            if state.balls.len() >= 2 {
                return;
            }
            state.split_active = true;
            let pos = state.launch_position();
            for mirrored in [true, false] {
                let vel = if mirrored {
                    Vec2::new(-INITIAL_BALL_VELOCITY.x, INITIAL_BALL_VELOCITY.y)
                } else {
                    INITIAL_BALL_VELOCITY
                };
                let mut ball = super::state::Ball::new(pos, BALL_RADIUS, vel);
                ball.tint = Vec3::new(1.0, 0.0, 0.0);
                state.balls.push(ball);
            }
        }
    }
}

/// Unwind an expired power-up's effect
///
/// Callers must already have checked [`is_other_active`]; a surviving
/// activated instance of the same kind keeps the effect engaged.
fn deactivate(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        // One-shot effects have nothing to unwind
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
        PowerUpKind::Sticky => {
            for ball in &mut state.balls {
                ball.sticky = false;
            }
            state.paddle.tint = NEUTRAL_TINT;
        }
        PowerUpKind::PassThrough => {
            for ball in &mut state.balls {
                ball.pass_through = false;
                ball.tint = NEUTRAL_TINT;
            }
        }
        PowerUpKind::Confuse => {
            state.fx.confuse = false;
        }
        PowerUpKind::Chaos => {
            state.fx.chaos = false;
        }
        PowerUpKind::Split => {
            // Only meaningful once the collection has decayed to one ball
            if state.balls.len() == 1 {
                state.split_active = false;
                state.balls.truncate(1);
            }
        }
    }
}

/// Per-frame power-up maintenance: drift, expiry countdown, removal
pub fn update_powerups(state: &mut GameState, dt: f32) {
    for i in 0..state.powerups.len() {
        let drift = state.powerups[i].vel * dt;
        state.powerups[i].pos += drift;

        if state.powerups[i].activated {
            state.powerups[i].duration -= dt;
            if state.powerups[i].duration <= 0.0 {
                state.powerups[i].activated = false;
                let kind = state.powerups[i].kind;
                if !is_other_active(&state.powerups, kind) {
                    deactivate(state, kind);
                }
            }
        }
    }

    // Drops that left the field or whose effect has unwound
    state.powerups.retain(|p| !(p.destroyed && !p.activated));
}
