//! Input-to-intent mapping
//!
//! The shell feeds key transitions into an [`InputState`] snapshot; the sim
//! reads it once per frame. Menu/Win actions are edge-triggered through the
//! processed table, paddle movement and launch are level-triggered.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Logical game keys, independent of physical bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKey {
    Confirm,
    LevelUp,
    LevelDown,
    MoveLeft,
    MoveRight,
    Launch,
}

impl GameKey {
    const COUNT: usize = 6;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame key snapshot: held state plus an already-processed table that
/// makes one-shot actions edge-triggered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; GameKey::COUNT],
    processed: [bool; GameKey::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down (or is still down); the processed flag is untouched so
    /// a held key stays consumed until released
    pub fn press(&mut self, key: GameKey) {
        self.held[key.index()] = true;
    }

    /// Key went up; re-arms the edge trigger
    pub fn release(&mut self, key: GameKey) {
        self.held[key.index()] = false;
        self.processed[key.index()] = false;
    }

    #[inline]
    pub fn is_held(&self, key: GameKey) -> bool {
        self.held[key.index()]
    }

    /// Consume an edge: true once per press, until the key is released
    pub fn consume_edge(&mut self, key: GameKey) -> bool {
        let i = key.index();
        if self.held[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }
}

/// Translate the held-key snapshot into phase-specific actions
pub fn process_input(state: &mut GameState, input: &mut InputState, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.consume_edge(GameKey::Confirm) {
                state.phase = GamePhase::Active;
                log::info!("starting level {}", state.level_index);
            }
            if input.consume_edge(GameKey::LevelUp) {
                state.level_index = (state.level_index + 1) % state.level_count();
            }
            if input.consume_edge(GameKey::LevelDown) {
                state.level_index = if state.level_index > 0 {
                    state.level_index - 1
                } else {
                    state.level_count() - 1
                };
            }
        }
        GamePhase::Win => {
            // Edge-triggered like the menu, so a held confirm from a
            // previous phase can't skip the win screen
            if input.consume_edge(GameKey::Confirm) {
                state.fx.chaos = false;
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::Active => {
            let velocity = PADDLE_VELOCITY * dt;
            if input.is_held(GameKey::MoveLeft) {
                move_paddle(state, -velocity);
            }
            if input.is_held(GameKey::MoveRight) {
                move_paddle(state, velocity);
            }
            if input.is_held(GameKey::Launch) {
                if let Some(ball) = state.balls.iter_mut().find(|b| b.stuck) {
                    ball.stuck = false;
                    ball.vel = INITIAL_BALL_VELOCITY;
                    state.push_event(GameEvent::BallLaunched);
                }
            }
        }
    }
}

/// Move the paddle by `delta`, clamped to the field, co-moving stuck balls
/// by the distance actually applied
fn move_paddle(state: &mut GameState, delta: f32) {
    let old_x = state.paddle.pos.x;
    let new_x = (old_x + delta).clamp(0.0, state.field.x - state.paddle.size.x);
    let applied = new_x - old_x;
    if applied == 0.0 {
        return;
    }
    state.paddle.pos.x = new_x;
    for ball in state.balls.iter_mut().filter(|b| b.stuck) {
        ball.pos.x += applied;
    }
}
