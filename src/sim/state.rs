//! Game session state and entity records
//!
//! Everything the simulation owns lives here: paddle, balls, levels,
//! power-ups, counters, and the post-processing flags the renderer reads.
//! All of it serializes; per-frame event signals are transient.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{Level, LevelGrid};
use super::powerup::{PowerUp, PowerUpKind};
use crate::NEUTRAL_TINT;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level selection, waiting for confirm
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for confirm
    Win,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: Vec3,
}

impl Paddle {
    /// Paddle at its starting position: bottom center of the field
    pub fn at_start(field: Vec2) -> Self {
        Self {
            pos: Vec2::new(field.x / 2.0 - PADDLE_SIZE.x / 2.0, field.y - PADDLE_SIZE.y),
            size: PADDLE_SIZE,
            tint: NEUTRAL_TINT,
        }
    }

    /// Horizontal center of the paddle
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub tint: Vec3,
    /// Riding the paddle; not integrated until launched
    pub stuck: bool,
    /// Re-attaches on the next paddle contact
    pub sticky: bool,
    /// Skips bounce response on non-solid bricks (still destroys them)
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            pos,
            radius,
            vel,
            tint: NEUTRAL_TINT,
            stuck: false,
            sticky: false,
            pass_through: false,
        }
    }

    /// Integrate motion and bounce off the side and top bounds
    ///
    /// The bottom bound is open: balls that fall past it are removed by the
    /// update loop, not reflected here.
    pub fn integrate(&mut self, dt: f32, field_width: f32) {
        if self.stuck {
            return;
        }
        self.pos += self.vel * dt;

        if self.pos.x - self.radius <= 0.0 {
            self.vel.x = -self.vel.x;
            self.pos.x = self.radius;
        } else if self.pos.x + self.radius >= field_width {
            self.vel.x = -self.vel.x;
            self.pos.x = field_width - self.radius;
        }
        if self.pos.y - self.radius <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = self.radius;
        }
    }
}

/// Post-processing flags consumed by the renderer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PostFx {
    /// Screen shake engaged (decays via `shake_time`)
    pub shake: bool,
    /// Remaining shake time in seconds
    pub shake_time: f32,
    pub confuse: bool,
    pub chaos: bool,
}

/// Fire-and-forget signals for the shell (audio, particles, UI)
///
/// Appended in call order during `update` and drained once per frame; the
/// simulation never reads them back.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BrickDestroyed { pos: Vec2 },
    SolidHit,
    PaddleBounce,
    PowerUpCaught { kind: PowerUpKind },
    BallLaunched,
    BallLost,
    ExtraLife,
    LevelWon,
    GameOver,
    /// Particle-trail hook for the primary ball, once per active frame
    BallTrail { pos: Vec2, vel: Vec2, radius: f32 },
}

/// Complete game session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Play field dimensions
    pub field: Vec2,
    pub phase: GamePhase,
    /// Selected level (wraps modulo the level count)
    pub level_index: usize,
    /// Parsed brick descriptors, kept so resets rebuild fresh levels
    grids: Vec<LevelGrid>,
    pub levels: Vec<Level>,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub powerups: Vec<PowerUp>,
    pub lives: u32,
    /// Seconds until forced loss; decrements only while Active
    pub countdown: f32,
    /// Non-solid bricks left before the next bonus life
    pub streak: u32,
    /// The split power-up is currently in effect
    pub split_active: bool,
    pub fx: PostFx,
    /// Session RNG for power-up spawn rolls
    pub rng: Pcg32,
    /// Per-frame signals; drained by the shell
    #[serde(skip, default)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session from already-parsed level grids
    ///
    /// `grids` must be non-empty; the external loader provides one grid per
    /// stage (four in the standard game).
    pub fn new(field: Vec2, grids: Vec<LevelGrid>, seed: u64) -> Self {
        let levels = grids
            .iter()
            .map(|g| Level::from_grid(g, field.x, field.y / 2.0))
            .collect();

        let mut state = Self {
            field,
            phase: GamePhase::Menu,
            level_index: 0,
            grids,
            levels,
            paddle: Paddle::at_start(field),
            balls: Vec::new(),
            powerups: Vec::new(),
            lives: STARTING_LIVES,
            countdown: COUNTDOWN_START,
            streak: STREAK_TARGET,
            split_active: false,
            fx: PostFx::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.spawn_ball_stuck();
        log::info!("session created: {} levels, seed {seed}", state.levels.len());
        state
    }

    /// Number of levels in the session
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    pub fn current_level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.level_index]
    }

    /// Center position of a ball riding the paddle
    pub fn launch_position(&self) -> Vec2 {
        Vec2::new(self.paddle.center_x(), self.paddle.pos.y - BALL_RADIUS)
    }

    /// Add a fresh ball riding the paddle
    pub fn spawn_ball_stuck(&mut self) {
        let mut ball = Ball::new(self.launch_position(), BALL_RADIUS, INITIAL_BALL_VELOCITY);
        ball.stuck = true;
        self.balls.push(ball);
    }

    /// Rebuild the current level's bricks and restore lives and countdown
    pub fn reset_level(&mut self) {
        let i = self.level_index;
        self.levels[i] = Level::from_grid(&self.grids[i], self.field.x, self.field.y / 2.0);
        self.lives = STARTING_LIVES;
        self.countdown = COUNTDOWN_START;
        log::info!("level {i} reset");
    }

    /// Restore paddle and ball to the starting stuck position
    ///
    /// Clears every live ball and power-up and unwinds all effects: the
    /// state a fresh session would have for this level.
    pub fn reset_player(&mut self) {
        self.paddle = Paddle::at_start(self.field);
        self.balls.clear();
        self.spawn_ball_stuck();
        self.powerups.clear();
        self.split_active = false;
        self.streak = STREAK_TARGET;
        self.fx.confuse = false;
        self.fx.chaos = false;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's event signals (shell side of the hook seam)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// A small ready-to-play session for unit tests
#[cfg(test)]
pub(crate) fn test_state() -> GameState {
    let grid = |rows: &[&[u8]]| LevelGrid::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap();
    let grids = vec![
        grid(&[&[2, 2, 2, 2]]),
        grid(&[&[1, 3, 3, 1]]),
        grid(&[&[4, 4, 4, 4]]),
        grid(&[&[5, 0, 0, 5]]),
    ];
    GameState::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT), grids, 42)
}
