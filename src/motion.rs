use crate::components::Vec2;
use crate::constants::{COLLISION_TOLERANCE, TILE_SIZE};
use crate::level::MazeGrid;

/// Result of a single movement attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub position: Vec2,
    pub moved: bool,
}

/// True when every inset corner of a tile-sized box with its top-left at
/// `position` lies on a walkable, in-bounds tile.
pub fn is_valid_position(grid: &MazeGrid, position: Vec2) -> bool {
    let near = COLLISION_TOLERANCE;
    let far = TILE_SIZE - COLLISION_TOLERANCE;
    [
        Vec2::new(near, near),
        Vec2::new(far, near),
        Vec2::new(near, far),
        Vec2::new(far, far),
    ]
    .into_iter()
    .all(|corner| grid.is_walkable_at(position + corner))
}

/// Integrates `velocity` over `dt` and commits the step only if the whole
/// bounding box stays clear of walls.
pub fn try_move(grid: &MazeGrid, position: Vec2, velocity: Vec2, dt: f32) -> MoveOutcome {
    let candidate = position + velocity * dt;
    if is_valid_position(grid, candidate) {
        MoveOutcome {
            position: candidate,
            moved: true,
        }
    } else {
        MoveOutcome {
            position,
            moved: false,
        }
    }
}
