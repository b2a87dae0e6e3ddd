//! Level container: a grid of bricks built from parsed tile descriptors
//!
//! The on-disk level format is not this crate's concern. An external loader
//! hands over a [`LevelGrid`] of tile codes; the core lays the bricks out
//! against the play field and tracks completion. Destroyed bricks stay in
//! the grid (skipped during iteration) so the layout never reshuffles.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tile code for an empty cell
pub const TILE_EMPTY: u8 = 0;
/// Tile code for an indestructible brick
pub const TILE_SOLID: u8 = 1;
/// Highest valid tile code (colored destructible bricks are 2..=5)
pub const TILE_MAX: u8 = 5;

/// A malformed brick-descriptor grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level grid has no rows")]
    Empty,
    #[error("row {row} has {got} tiles, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },
    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { code: u8, row: usize, col: usize },
}

/// An already-parsed grid of brick descriptor codes
///
/// Produced by an external level loader; validated here so brick layout
/// never has to deal with ragged rows or unknown codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGrid {
    rows: Vec<Vec<u8>>,
}

impl LevelGrid {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, LevelError> {
        let Some(first) = rows.first() else {
            return Err(LevelError::Empty);
        };
        let expected = first.len();
        if expected == 0 {
            return Err(LevelError::Empty);
        }
        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    got: tiles.len(),
                });
            }
            for (col, &code) in tiles.iter().enumerate() {
                if code > TILE_MAX {
                    return Err(LevelError::UnknownTile { code, row, col });
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }
}

/// A single brick in the level grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: Vec3,
    /// Solid bricks survive hits and don't count toward completion
    pub solid: bool,
    pub destroyed: bool,
}

/// Tint for a tile code (solid gray, then the colored destructible set)
fn tile_tint(code: u8) -> Vec3 {
    match code {
        TILE_SOLID => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        _ => Vec3::new(1.0, 0.5, 0.0),
    }
}

/// The brick collection for one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Brick>,
}

impl Level {
    /// Lay out bricks from a validated grid
    ///
    /// Cells share the target area evenly: `width` is the full play-field
    /// width, `height` the vertical band the bricks occupy (the session
    /// passes the top half of the field).
    pub fn from_grid(grid: &LevelGrid, width: f32, height: f32) -> Self {
        let unit_width = width / grid.col_count() as f32;
        let unit_height = height / grid.row_count() as f32;

        let mut bricks = Vec::new();
        for (y, row) in grid.rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == TILE_EMPTY {
                    continue;
                }
                bricks.push(Brick {
                    pos: Vec2::new(unit_width * x as f32, unit_height * y as f32),
                    size: Vec2::new(unit_width, unit_height),
                    tint: tile_tint(code),
                    solid: code == TILE_SOLID,
                    destroyed: false,
                });
            }
        }
        Self { bricks }
    }

    /// Completion invariant: every non-solid brick destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().filter(|b| !b.solid).all(|b| b.destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> LevelGrid {
        LevelGrid::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_grid_validation() {
        assert!(matches!(LevelGrid::new(vec![]), Err(LevelError::Empty)));
        assert!(matches!(LevelGrid::new(vec![vec![]]), Err(LevelError::Empty)));
        assert!(matches!(
            LevelGrid::new(vec![vec![1, 2], vec![1]]),
            Err(LevelError::RaggedRow { row: 1, expected: 2, got: 1 })
        ));
        assert!(matches!(
            LevelGrid::new(vec![vec![1, 9]]),
            Err(LevelError::UnknownTile { code: 9, row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_layout_fills_target_area() {
        let level = Level::from_grid(&grid(&[&[2, 2], &[0, 3]]), 800.0, 300.0);
        assert_eq!(level.bricks.len(), 3);
        assert_eq!(level.bricks[0].pos, Vec2::ZERO);
        assert_eq!(level.bricks[0].size, Vec2::new(400.0, 150.0));
        // Second row, second column (first row cell 0 was empty)
        assert_eq!(level.bricks[2].pos, Vec2::new(400.0, 150.0));
    }

    #[test]
    fn test_completion_ignores_solid_bricks() {
        let mut level = Level::from_grid(&grid(&[&[1, 2, 3]]), 300.0, 100.0);
        assert!(!level.is_completed());

        for brick in level.bricks.iter_mut().filter(|b| !b.solid) {
            brick.destroyed = true;
        }
        // Solid brick still standing, but the level counts as cleared
        assert!(level.is_completed());
    }
}
