//! Brickstorm entry point
//!
//! Headless demo shell: builds the four standard level grids (the shell
//! side of the level-loader seam), wires a logging audio sink, and lets a
//! simple ball-tracking paddle play out a session.

use std::path::Path;

use glam::Vec2;

use brickstorm::Settings;
use brickstorm::audio::{AudioSink, SoundEffect, route_events};
use brickstorm::consts::*;
use brickstorm::sim::{
    self, GameEvent, GameKey, GamePhase, GameState, InputState, LevelGrid,
};

/// Audio sink that logs cue points instead of playing them
struct LoggingAudio;

impl AudioSink for LoggingAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {effect:?}");
    }

    fn start_music(&mut self) {
        log::info!("music: background loop started");
    }
}

/// The four standard stages, as an external loader would hand them over
fn standard_levels() -> Vec<LevelGrid> {
    let grid = |rows: &[&[u8]]| {
        LevelGrid::new(rows.iter().map(|r| r.to_vec()).collect())
            .expect("built-in level grid is well-formed")
    };

    vec![
        grid(&[
            &[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
            &[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
            &[4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4],
            &[4, 1, 4, 1, 4, 0, 0, 1, 0, 0, 4, 1, 4, 1, 4],
            &[3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3],
            &[3, 3, 1, 3, 3, 3, 3, 3, 3, 3, 3, 3, 1, 3, 3],
            &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
            &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
        ]),
        grid(&[
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            &[1, 0, 2, 3, 4, 5, 2, 3, 4, 5, 2, 3, 4, 0, 1],
            &[1, 0, 3, 4, 5, 2, 3, 4, 5, 2, 3, 4, 5, 0, 1],
            &[1, 0, 4, 5, 2, 3, 4, 5, 2, 3, 4, 5, 2, 0, 1],
            &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ]),
        grid(&[
            &[0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0],
            &[0, 0, 3, 3, 3, 0, 3, 3, 3, 0, 3, 3, 3, 0, 0],
            &[0, 4, 4, 1, 4, 4, 4, 1, 4, 4, 4, 1, 4, 4, 0],
            &[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
            &[0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 0],
        ]),
        grid(&[
            &[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1],
            &[2, 3, 2, 3, 2, 3, 2, 3, 2, 3, 2, 3, 2, 3, 2],
            &[3, 4, 3, 4, 3, 4, 3, 4, 3, 4, 3, 4, 3, 4, 3],
            &[4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4],
            &[5, 0, 5, 0, 5, 0, 5, 0, 5, 0, 5, 0, 5, 0, 5],
        ]),
    ]
}

/// Steer toward the primary ball (same idea as an attract-mode AI)
fn drive_paddle(state: &GameState, input: &mut InputState) {
    input.release(GameKey::MoveLeft);
    input.release(GameKey::MoveRight);

    let Some(ball) = state.balls.first() else {
        return;
    };
    let center = state.paddle.center_x();
    if ball.pos.x < center - 10.0 {
        input.press(GameKey::MoveLeft);
    } else if ball.pos.x > center + 10.0 {
        input.press(GameKey::MoveRight);
    }
}

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new("settings.json"));
    log::info!(
        "Brickstorm starting (screen shake: {})",
        settings.effective_screen_shake()
    );

    let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
    let mut state = GameState::new(field, standard_levels(), 0xB51C);
    let mut input = InputState::new();
    let mut audio = LoggingAudio;
    audio.start_music();

    // Confirm out of the menu, then hold launch so respawned balls fly too
    input.press(GameKey::Confirm);
    input.press(GameKey::Launch);

    let dt = 1.0 / 60.0;
    let mut last_phase = state.phase;
    let mut bricks_broken = 0u32;

    for frame in 0..(60 * 60 * 3) {
        drive_paddle(&state, &mut input);
        sim::process_input(&mut state, &mut input, dt);
        sim::update(&mut state, dt);

        let events = state.drain_events();
        bricks_broken += events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count() as u32;
        route_events(&events, &mut audio);

        if state.phase != last_phase {
            log::info!(
                "frame {frame}: phase {last_phase:?} -> {:?} (lives {}, time {:.0})",
                state.phase,
                state.lives,
                state.countdown
            );
            match state.phase {
                GamePhase::Win => break,
                GamePhase::Menu => break,
                GamePhase::Active => {}
            }
        }
        last_phase = state.phase;
    }

    log::info!(
        "demo finished: {:?}, {} bricks broken, {} lives left",
        state.phase,
        bricks_broken,
        state.lives
    );
}
