//! Draw-call seam for an external renderer
//!
//! The core never owns a GPU pipeline. [`draw_frame`] walks the session and
//! issues one draw call per visible entity plus HUD text, then a single
//! post-processing pass carrying the shake/confuse/chaos flags. The shell
//! implements [`Renderer`] with whatever backend it likes.

use glam::{Vec2, Vec3};

use crate::NEUTRAL_TINT;
use crate::consts::*;
use crate::sim::{GamePhase, GameState, PostFx, PowerUpKind};

/// Sprite identifiers the renderer maps to textures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Background,
    Paddle,
    Ball,
    Brick,
    BrickSolid,
    PowerUp(PowerUpKind),
}

/// Injected rendering backend
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, size: Vec2, rotation: f32, tint: Vec3);

    fn draw_text(&mut self, text: &str, pos: Vec2, scale: f32, tint: Vec3);

    /// End-of-frame post-processing pass; `time` drives shake jitter
    fn post_process(&mut self, fx: &PostFx, time: f32);
}

/// Issue the frame's draw calls in back-to-front order
pub fn draw_frame(state: &GameState, time: f32, out: &mut dyn Renderer) {
    out.draw_sprite(SpriteId::Background, Vec2::ZERO, state.field, 0.0, NEUTRAL_TINT);

    for brick in &state.current_level().bricks {
        if brick.destroyed {
            continue;
        }
        let sprite = if brick.solid { SpriteId::BrickSolid } else { SpriteId::Brick };
        out.draw_sprite(sprite, brick.pos, brick.size, 0.0, brick.tint);
    }

    out.draw_sprite(
        SpriteId::Paddle,
        state.paddle.pos,
        state.paddle.size,
        0.0,
        state.paddle.tint,
    );

    for drop in &state.powerups {
        if drop.destroyed {
            continue;
        }
        out.draw_sprite(SpriteId::PowerUp(drop.kind), drop.pos, drop.size, 0.0, drop.tint);
    }

    for ball in &state.balls {
        out.draw_sprite(
            SpriteId::Ball,
            ball.pos - Vec2::splat(ball.radius),
            Vec2::splat(ball.radius * 2.0),
            0.0,
            ball.tint,
        );
    }

    out.post_process(&state.fx, time);

    // HUD (not part of the post-processed scene)
    out.draw_text(&format!("Lives: {}", state.lives), Vec2::new(26.0, 10.0), 1.0, NEUTRAL_TINT);
    out.draw_text(
        &format!("Hits: {}/{}", STREAK_TARGET - state.streak, STREAK_TARGET),
        Vec2::new(26.0, 30.0),
        0.7,
        NEUTRAL_TINT,
    );
    out.draw_text(
        &format!("Time: {}", state.countdown.max(0.0) as u32),
        Vec2::new(state.field.x - 170.0, 10.0),
        1.0,
        NEUTRAL_TINT,
    );

    match state.phase {
        GamePhase::Menu => {
            let mid = state.field.y / 2.0;
            out.draw_text("Press ENTER to start", Vec2::new(250.0, mid), 1.0, NEUTRAL_TINT);
            out.draw_text(
                &format!("Level {} - UP/DOWN to select", state.level_index + 1),
                Vec2::new(245.0, mid + 20.0),
                0.75,
                NEUTRAL_TINT,
            );
        }
        GamePhase::Win => {
            let mid = state.field.y / 2.0;
            out.draw_text(
                "You WON!",
                Vec2::new(320.0, mid - 20.0),
                1.0,
                Vec3::new(0.0, 1.0, 0.0),
            );
            out.draw_text(
                "Press ENTER to return to the menu",
                Vec2::new(130.0, mid),
                1.0,
                Vec3::new(1.0, 1.0, 0.0),
            );
        }
        GamePhase::Active => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_state;

    #[derive(Default)]
    struct Recorder {
        sprites: Vec<SpriteId>,
        texts: Vec<String>,
        post_calls: u32,
    }

    impl Renderer for Recorder {
        fn draw_sprite(&mut self, sprite: SpriteId, _: Vec2, _: Vec2, _: f32, _: Vec3) {
            self.sprites.push(sprite);
        }
        fn draw_text(&mut self, text: &str, _: Vec2, _: f32, _: Vec3) {
            self.texts.push(text.to_string());
        }
        fn post_process(&mut self, _: &PostFx, _: f32) {
            self.post_calls += 1;
        }
    }

    #[test]
    fn test_frame_draws_each_visible_entity_once() {
        let mut state = test_state();
        state.current_level_mut().bricks[0].destroyed = true;

        let mut out = Recorder::default();
        draw_frame(&state, 0.0, &mut out);

        let bricks = out.sprites.iter().filter(|s| matches!(s, SpriteId::Brick)).count();
        assert_eq!(bricks, 3); // 4 in the grid, 1 destroyed
        let balls = out.sprites.iter().filter(|s| matches!(s, SpriteId::Ball)).count();
        assert_eq!(balls, 1);
        assert_eq!(out.post_calls, 1);
        // HUD present
        assert!(out.texts.iter().any(|t| t.starts_with("Lives:")));
        assert!(out.texts.iter().any(|t| t.starts_with("Time:")));
    }
}
