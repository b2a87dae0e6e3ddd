//! Per-frame simulation update
//!
//! One `update` call advances the whole session by `dt` while the phase is
//! Active: countdown, ball integration, collision resolution, effect hooks,
//! power-up maintenance, then loss and win evaluation, in that order.

use super::collision::{Direction, aabb_overlap, circle_box_contact};
use super::powerup;
use super::state::{GameEvent, GamePhase, GameState};
use crate::NEUTRAL_TINT;
use crate::consts::*;

/// Advance the simulation by one frame
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }

    if state.countdown > 0.0 {
        state.countdown -= dt;
    }

    // Integrate free balls; the bottom bound removes rather than reflects
    let field = state.field;
    let mut lost = 0u32;
    state.balls.retain_mut(|ball| {
        ball.integrate(dt, field.x);
        if ball.pos.y - ball.radius >= field.y {
            lost += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..lost {
        state.push_event(GameEvent::BallLost);
    }

    // The sole survivor of a split sheds its power-up tint
    if state.balls.len() == 1 {
        state.balls[0].tint = NEUTRAL_TINT;
    }

    resolve_collisions(state);

    // Particle-trail hook for the primary ball
    if let Some(ball) = state.balls.first() {
        let (pos, vel, radius) = (ball.pos, ball.vel, ball.radius);
        state.push_event(GameEvent::BallTrail { pos, vel, radius });
    }

    powerup::update_powerups(state, dt);

    if state.fx.shake_time > 0.0 {
        state.fx.shake_time -= dt;
        if state.fx.shake_time <= 0.0 {
            state.fx.shake = false;
        }
    }

    // Loss: every ball gone, or the clock ran out
    if state.balls.is_empty() || state.countdown < 0.0 {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 || state.countdown < 0.0 {
            log::info!(
                "game over on level {} (countdown {:.1})",
                state.level_index,
                state.countdown
            );
            state.reset_level();
            state.phase = GamePhase::Menu;
            state.push_event(GameEvent::GameOver);
        }
        state.reset_player();
    }

    // Win: only reached while still Active after loss handling
    if state.phase == GamePhase::Active && state.current_level().is_completed() {
        log::info!("level {} cleared", state.level_index);
        state.reset_level();
        state.reset_player();
        state.fx.chaos = true;
        state.phase = GamePhase::Win;
        state.push_event(GameEvent::LevelWon);
    }
}

/// Collision pass: every live ball against bricks, power-ups, and paddle
///
/// Runs against start-of-frame state; bricks destroyed earlier in the pass
/// carry the destroyed flag and are skipped for subsequent balls.
pub fn resolve_collisions(state: &mut GameState) {
    for bi in 0..state.balls.len() {
        // --- bricks, in grid order ---
        for li in 0..state.levels[state.level_index].bricks.len() {
            let brick = &state.levels[state.level_index].bricks[li];
            if brick.destroyed {
                continue;
            }
            let (brick_pos, brick_size, solid) = (brick.pos, brick.size, brick.solid);

            let ball = &state.balls[bi];
            let Some(contact) = circle_box_contact(ball.pos, ball.radius, brick_pos, brick_size)
            else {
                continue;
            };

            if !solid {
                state.levels[state.level_index].bricks[li].destroyed = true;
                state.streak = state.streak.saturating_sub(1);
                powerup::spawn_powerups(&mut state.rng, brick_pos, &mut state.powerups);
                state.push_event(GameEvent::BrickDestroyed { pos: brick_pos });
                if state.streak < 1 {
                    state.lives += 1;
                    state.streak = STREAK_TARGET;
                    state.push_event(GameEvent::ExtraLife);
                }
            } else {
                state.fx.shake = true;
                state.fx.shake_time = SHAKE_TIME;
                // A solid hit also cancels bonus-life progress
                state.streak = STREAK_TARGET;
                state.push_event(GameEvent::SolidHit);
            }

            // Pass-through only bypasses the response on destructible bricks
            let ball = &mut state.balls[bi];
            if !(ball.pass_through && !solid) {
                match contact.direction {
                    Direction::Left | Direction::Right => {
                        ball.vel.x = -ball.vel.x;
                        let penetration = ball.radius - contact.offset.x.abs();
                        if contact.direction == Direction::Left {
                            ball.pos.x += penetration;
                        } else {
                            ball.pos.x -= penetration;
                        }
                    }
                    Direction::Up | Direction::Down => {
                        ball.vel.y = -ball.vel.y;
                        let penetration = ball.radius - contact.offset.y.abs();
                        if contact.direction == Direction::Up {
                            ball.pos.y -= penetration;
                        } else {
                            ball.pos.y += penetration;
                        }
                    }
                }
            }
        }

        // --- power-up drops: bottom exit and paddle catch ---
        for pi in 0..state.powerups.len() {
            if state.powerups[pi].destroyed {
                continue;
            }
            if state.powerups[pi].pos.y >= state.field.y {
                state.powerups[pi].destroyed = true;
            }
            let (drop_pos, drop_size) = (state.powerups[pi].pos, state.powerups[pi].size);
            if aabb_overlap(state.paddle.pos, state.paddle.size, drop_pos, drop_size) {
                let kind = state.powerups[pi].kind;
                powerup::activate(state, kind);
                state.powerups[pi].destroyed = true;
                state.powerups[pi].activated = true;
                state.push_event(GameEvent::PowerUpCaught { kind });
            }
        }

        // --- paddle, unless riding it ---
        let ball = &state.balls[bi];
        if !ball.stuck
            && circle_box_contact(ball.pos, ball.radius, state.paddle.pos, state.paddle.size)
                .is_some()
        {
            // Deflect by where the ball struck relative to the paddle center,
            // keeping the pre-bounce speed and forcing the ball upward
            let percentage =
                (ball.pos.x - state.paddle.center_x()) / (state.paddle.size.x / 2.0);
            let old_speed = ball.vel.length();
            let sticky = ball.sticky;

            let ball = &mut state.balls[bi];
            ball.vel.x = INITIAL_BALL_VELOCITY.x * percentage * PADDLE_BOUNCE_STRENGTH;
            ball.vel = ball.vel.normalize_or_zero() * old_speed;
            ball.vel.y = -ball.vel.y.abs();
            // A sticky ball re-attaches on the bounce that would launch it
            ball.stuck = sticky;

            state.push_event(GameEvent::PaddleBounce);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::{PowerUp, PowerUpKind};
    use crate::sim::state::{Ball, test_state};
    use glam::Vec2;

    /// Active session with the stuck ball parked away from the bricks
    fn active_state() -> GameState {
        let mut state = test_state();
        state.phase = GamePhase::Active;
        state.balls[0].stuck = false;
        state.balls[0].pos = Vec2::new(400.0, 450.0);
        state.balls[0].vel = Vec2::ZERO;
        state
    }

    #[test]
    fn test_brick_hit_negates_exactly_one_axis() {
        let mut state = active_state();
        let brick = state.current_level().bricks[0].clone();

        // Approach the brick's bottom face from below, moving up
        let mut ball = Ball::new(
            Vec2::new(
                brick.pos.x + brick.size.x / 2.0,
                brick.pos.y + brick.size.y + 10.0,
            ),
            12.5,
            Vec2::new(30.0, -200.0),
        );
        ball.pos.y -= 4.0; // overlap the face by a few pixels
        state.balls[0] = ball.clone();

        resolve_collisions(&mut state);

        let after = &state.balls[0];
        assert_eq!(after.vel.x, ball.vel.x);
        assert_eq!(after.vel.y, -ball.vel.y);
        assert!(state.current_level().bricks[0].destroyed);
    }

    #[test]
    fn test_correction_leaves_ball_tangent_to_solid_brick() {
        let mut state = active_state();
        state.level_index = 1; // layout with solid end bricks
        let brick = state.current_level().bricks[0].clone();
        assert!(brick.solid);

        state.balls[0].pos = Vec2::new(
            brick.pos.x + brick.size.x / 2.0,
            brick.pos.y + brick.size.y + 8.0,
        );
        state.balls[0].vel = Vec2::new(0.0, -100.0);

        resolve_collisions(&mut state);

        // Repositioned to exact tangency: an identical re-test must miss
        let ball = &state.balls[0];
        assert!(
            circle_box_contact(ball.pos, ball.radius, brick.pos, brick.size).is_none()
        );
        // Solid bricks survive and trip the shake effect
        assert!(!state.current_level().bricks[0].destroyed);
        assert!(state.fx.shake);
        assert_eq!(state.streak, STREAK_TARGET);
    }

    #[test]
    fn test_pass_through_skips_response_on_destructible_only() {
        let mut state = active_state();
        state.level_index = 1;
        let solid = state.current_level().bricks[0].clone();
        let soft = state.current_level().bricks[1].clone();

        // Against a destructible brick: destroyed, velocity untouched
        state.balls[0].pass_through = true;
        state.balls[0].pos = Vec2::new(
            soft.pos.x + soft.size.x / 2.0,
            soft.pos.y + soft.size.y + 8.0,
        );
        state.balls[0].vel = Vec2::new(0.0, -100.0);
        resolve_collisions(&mut state);
        assert!(state.current_level().bricks[1].destroyed);
        assert_eq!(state.balls[0].vel, Vec2::new(0.0, -100.0));

        // Against a solid brick: still bounces
        state.balls[0].pos = Vec2::new(
            solid.pos.x + solid.size.x / 2.0,
            solid.pos.y + solid.size.y + 8.0,
        );
        resolve_collisions(&mut state);
        assert_eq!(state.balls[0].vel, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_paddle_bounce_preserves_speed_and_forces_upward() {
        let mut state = active_state();
        let paddle = state.paddle.clone();

        state.balls[0].pos = Vec2::new(paddle.center_x() + 30.0, paddle.pos.y - 5.0);
        state.balls[0].vel = Vec2::new(60.0, 340.0);
        let speed_before = state.balls[0].vel.length();

        resolve_collisions(&mut state);

        let ball = &state.balls[0];
        assert!((ball.vel.length() - speed_before).abs() < 1e-3);
        assert!(ball.vel.y < 0.0);
        assert!(state.drain_events().contains(&GameEvent::PaddleBounce));
    }

    #[test]
    fn test_sticky_ball_reattaches_on_paddle_bounce() {
        let mut state = active_state();
        state.balls[0].sticky = true;
        state.balls[0].pos = Vec2::new(state.paddle.center_x(), state.paddle.pos.y - 5.0);
        state.balls[0].vel = Vec2::new(0.0, 200.0);

        resolve_collisions(&mut state);
        assert!(state.balls[0].stuck);
    }

    #[test]
    fn test_streak_grants_extra_life_and_resets() {
        let mut state = active_state();
        state.streak = 1;
        let brick = state.current_level().bricks[0].clone();
        state.balls[0].pos = Vec2::new(
            brick.pos.x + brick.size.x / 2.0,
            brick.pos.y + brick.size.y + 8.0,
        );
        state.balls[0].vel = Vec2::new(0.0, -100.0);

        let lives_before = state.lives;
        resolve_collisions(&mut state);
        assert_eq!(state.lives, lives_before + 1);
        assert_eq!(state.streak, STREAK_TARGET);
        assert!(state.drain_events().contains(&GameEvent::ExtraLife));
    }

    #[test]
    fn test_powerup_caught_by_paddle() {
        let mut state = active_state();
        let mut drop = PowerUp::new(PowerUpKind::Sticky, state.paddle.pos);
        drop.pos.y = state.paddle.pos.y - 5.0;
        state.powerups.push(drop);

        resolve_collisions(&mut state);

        let drop = &state.powerups[0];
        assert!(drop.destroyed && drop.activated);
        assert!(state.balls.iter().all(|b| b.sticky));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpCaught { kind: PowerUpKind::Sticky })
        );
    }

    #[test]
    fn test_powerup_past_bottom_is_destroyed_without_activation() {
        let mut state = active_state();
        let mut drop = PowerUp::new(PowerUpKind::Chaos, Vec2::new(100.0, 0.0));
        drop.pos.y = state.field.y + 1.0;
        state.powerups.push(drop);

        resolve_collisions(&mut state);
        assert!(state.powerups[0].destroyed);
        assert!(!state.powerups[0].activated);
        assert!(!state.fx.chaos);
    }

    #[test]
    fn test_ball_past_bottom_is_removed() {
        let mut state = active_state();
        state.lives = 3;
        state.balls[0].pos = Vec2::new(400.0, state.field.y + 50.0);
        state.balls[0].vel = Vec2::new(0.0, 100.0);

        update(&mut state, 0.016);

        // Removed, life deducted, player reset with a fresh stuck ball
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].stuck);
    }

    #[test]
    fn test_loss_on_last_life_returns_to_menu_with_fresh_bricks() {
        let mut state = active_state();
        state.lives = 1;
        state.current_level_mut().bricks[0].destroyed = true;
        state.balls.clear();

        update(&mut state, 0.016);

        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.current_level().bricks.iter().all(|b| !b.destroyed));
        assert!(state.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_win_transition_sets_chaos() {
        let mut state = active_state();
        for brick in &mut state.current_level_mut().bricks {
            if !brick.solid {
                brick.destroyed = true;
            }
        }

        update(&mut state, 0.016);

        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.fx.chaos);
        assert!(state.drain_events().contains(&GameEvent::LevelWon));
    }

    #[test]
    fn test_countdown_arithmetic_and_forced_loss() {
        let mut state = active_state();
        state.balls[0].stuck = true; // keep the ball alive off to the side
        let dt = 0.5;
        for i in 1..=4 {
            update(&mut state, dt);
            assert!((state.countdown - (COUNTDOWN_START - i as f32 * dt)).abs() < 1e-4);
        }

        // Run the clock out: forced loss regardless of remaining lives
        state.lives = 3;
        state.countdown = -0.1;
        update(&mut state, 0.016);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.countdown, COUNTDOWN_START);
    }

    #[test]
    fn test_update_is_inert_outside_active_phase() {
        let mut state = test_state();
        let countdown = state.countdown;
        update(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.countdown, countdown);
    }

    #[test]
    fn test_sole_survivor_regains_neutral_tint() {
        let mut state = active_state();
        state.balls[0].tint = glam::Vec3::new(1.0, 0.0, 0.0);
        update(&mut state, 0.016);
        assert_eq!(state.balls[0].tint, NEUTRAL_TINT);
    }
}
