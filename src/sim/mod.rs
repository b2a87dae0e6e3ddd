//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Advanced only through `update`/`process_input` with an explicit dt
//! - Seeded RNG only
//! - Stable iteration order (collection/grid order)
//! - No rendering, audio, or platform dependencies; outward signals go
//!   through the per-frame `GameEvent` list

pub mod collision;
pub mod input;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Contact, Direction, aabb_overlap, circle_box_contact, vector_direction};
pub use input::{GameKey, InputState, process_input};
pub use level::{Brick, Level, LevelError, LevelGrid};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, PostFx};
pub use tick::{resolve_collisions, update};
