use tracing::trace;

use crate::components::{Direction, TilePos, Vec2};
use crate::constants::{PLAYER_SPEED, TILE_SIZE};
use crate::level::{tile_origin, MazeGrid};
use crate::motion::try_move;

#[derive(Debug, Clone)]
pub struct Pacman {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Direction,
}

impl Pacman {
    pub fn new(start: TilePos) -> Self {
        Self {
            position: tile_origin(start),
            velocity: Vec2::ZERO,
            facing: Direction::Right,
        }
    }

    /// Turns the player. The position is first snapped to the nearest tile
    /// corner so 90 degree turns line up with side corridors.
    pub fn handle_input(&mut self, direction: Direction) {
        self.position = snap_to_grid(self.position);
        self.velocity = direction.velocity(PLAYER_SPEED);
        self.facing = direction;
        trace!(?direction, x = self.position.x, y = self.position.y, "player turned");
    }

    /// Moves the player for one frame. A blocked move stops the player dead.
    pub fn advance(&mut self, grid: &MazeGrid, dt: f32) -> bool {
        let outcome = try_move(grid, self.position, self.velocity, dt);
        self.position = outcome.position;
        if !outcome.moved {
            self.velocity = Vec2::ZERO;
        }
        outcome.moved
    }
}

fn snap_to_grid(position: Vec2) -> Vec2 {
    Vec2::new(
        (position.x / TILE_SIZE).round() * TILE_SIZE,
        (position.y / TILE_SIZE).round() * TILE_SIZE,
    )
}
