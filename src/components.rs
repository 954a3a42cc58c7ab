/// Continuous position or velocity in world units. `y` grows downwards, like
/// terminal rows.
pub use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Candidate order used by adversaries when scanning headings.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn delta(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    pub fn velocity(self, speed: f32) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx, dy) * speed
    }
}

/// Grid coordinate of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub row: usize,
    pub col: usize,
}

impl TilePos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
    SpawnMarker,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        self != Tile::Wall
    }

    pub fn collectible(self) -> Option<Collectible> {
        match self {
            Tile::Pellet => Some(Collectible::Pellet),
            Tile::PowerPellet => Some(Collectible::PowerPellet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collectible {
    Pellet,
    PowerPellet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_follows_screen_axes() {
        assert_eq!(Direction::Up.velocity(10.0), Vec2::new(0.0, -10.0));
        assert_eq!(Direction::Right.velocity(10.0), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn headings_have_the_requested_speed() {
        for dir in Direction::ALL {
            let velocity = dir.velocity(80.0);
            assert_eq!(velocity.length(), 80.0);
            assert_eq!((-velocity).distance(velocity), 160.0);
        }
        let step = Vec2::new(25.0, 50.0) + Direction::Left.velocity(10.0) * 0.5;
        assert_eq!(step, Vec2::new(20.0, 50.0));
    }

    #[test]
    fn only_walls_block() {
        assert!(!Tile::Wall.is_walkable());
        for tile in [Tile::Empty, Tile::Pellet, Tile::PowerPellet, Tile::SpawnMarker] {
            assert!(tile.is_walkable());
        }
    }
}
