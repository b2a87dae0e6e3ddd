//! Brickstorm - a brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, entities, game state)
//! - `render`: Draw-call seam for an external renderer
//! - `audio`: Fire-and-forget sound seam
//! - `settings`: Player preferences with JSON persistence

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Play field width (logical pixels, origin top-left, y grows down)
    pub const FIELD_WIDTH: f32 = 800.0;
    /// Play field height
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle dimensions
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Horizontal paddle speed (pixels/sec)
    pub const PADDLE_VELOCITY: f32 = 500.0;
    /// Width added by the pad-size-increase power-up
    pub const PADDLE_WIDEN_AMOUNT: f32 = 50.0;
    /// Horizontal deflection strength of a paddle bounce
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Ball radius
    pub const BALL_RADIUS: f32 = 12.5;
    /// Velocity restored on launch and given to split balls (±x)
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Velocity multiplier of the speed power-up
    pub const BALL_SPEED_MULTIPLIER: f32 = 1.2;

    /// Per-level countdown (seconds); running out forces a loss
    pub const COUNTDOWN_START: f32 = 120.0;
    /// Non-solid bricks to destroy for a bonus life
    pub const STREAK_TARGET: u32 = 10;
    /// Lives at the start of a level
    pub const STARTING_LIVES: u32 = 3;
    /// Number of levels a session holds
    pub const LEVEL_COUNT: usize = 4;

    /// Screen shake duration after a solid-brick hit (seconds)
    pub const SHAKE_TIME: f32 = 0.05;

    /// Power-up drop dimensions
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    /// Power-up downward drift (pixels/sec)
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
}

/// Neutral entity tint (no power-up coloring)
pub const NEUTRAL_TINT: glam::Vec3 = glam::Vec3::ONE;

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
