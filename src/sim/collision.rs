//! Collision detection for axis-aligned arcade geometry
//!
//! Box-box overlap for power-up catches, circle-box contact for ball
//! impacts, and compass classification of the penetration vector so the
//! response knows which axis to reflect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::box_center;

/// Axis-aligned compass direction of a penetration vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// True for Left/Right
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Contact between a ball and a box
///
/// `offset` points from the ball center to the closest point on the box;
/// its per-axis magnitude gives the penetration depth for correction.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub direction: Direction,
    pub offset: Vec2,
}

/// Box-box overlap test (top-left corners + sizes)
///
/// Bounds are inclusive: boxes that exactly touch count as overlapping.
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let overlap_x = a_pos.x + a_size.x >= b_pos.x && b_pos.x + b_size.x >= a_pos.x;
    let overlap_y = a_pos.y + a_size.y >= b_pos.y && b_pos.y + b_size.y >= a_pos.y;
    overlap_x && overlap_y
}

/// Circle-box contact test
///
/// Clamps the center-to-center vector into the box half-extents to find the
/// closest point on the box, then compares its distance to the ball radius.
/// The comparison is strict (`<`, not `<=`): response repositions balls to
/// be exactly tangent, and a re-test of the corrected state must miss.
pub fn circle_box_contact(center: Vec2, radius: f32, box_pos: Vec2, box_size: Vec2) -> Option<Contact> {
    let half_extents = box_size / 2.0;
    let middle = box_center(box_pos, box_size);

    let difference = center - middle;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = middle + clamped;
    let offset = closest - center;

    if offset.length() < radius {
        Some(Contact {
            direction: vector_direction(offset),
            offset,
        })
    } else {
        None
    }
}

/// Compass classification by maximal dot product against the four axis
/// directions, evaluated in the fixed order Up, Right, Down, Left with a
/// strictly growing maximum.
///
/// The result is unspecified for the zero vector (it falls out as `Up`);
/// normalization is guarded so no NaN is produced.
pub fn vector_direction(v: Vec2) -> Direction {
    const COMPASS: [(Vec2, Direction); 4] = [
        (Vec2::new(0.0, 1.0), Direction::Up),
        (Vec2::new(1.0, 0.0), Direction::Right),
        (Vec2::new(0.0, -1.0), Direction::Down),
        (Vec2::new(-1.0, 0.0), Direction::Left),
    ];

    let unit = v.normalize_or_zero();
    let mut max = 0.0;
    let mut best = Direction::Up;
    for (axis, dir) in COMPASS {
        let dot = unit.dot(axis);
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}
