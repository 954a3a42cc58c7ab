use thiserror::Error;

use crate::components::{Collectible, Tile, TilePos, Vec2};
use crate::constants::TILE_SIZE;

/// The one maze this game ships with.
///
/// `#` wall, `.` pellet, `o` power pellet, `P` player spawn, `0` ghost house,
/// space is an empty corridor.
pub const LAYOUT: [&str; 19] = [
    " ################### ",
    " #........#..o.....# ",
    " #o##.###.#.###.##o# ",
    " #.................# ",
    " #.##.#.#####.#.##.# ",
    " #....#...#...#....# ",
    " ####.### # ###.#### ",
    "    #.    0    .#    ",
    "#####.# ##o##.#.#####",
    "#o.  .. #   #  ..o. #",
    "#####.#.#####.#.#####",
    "    # #.......#.#    ",
    " #### # #.#.# #.#### ",
    " #........#........# ",
    " #.##.###.#.###.##.# ",
    " #o.#.....P.....#.o# ",
    " ##.#.#.#####.#.#.## ",
    " #.................# ",
    " ################### ",
];

/// Ghost start tiles, one per ghost, in roster order.
pub const GHOST_STARTS: [TilePos; 4] = [
    TilePos::new(7, 9),
    TilePos::new(7, 10),
    TilePos::new(7, 11),
    TilePos::new(7, 12),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("layout has no player spawn marker")]
    MissingPlayerSpawn,
}

/// Rectangular tile map. Only collectible tiles ever change, and only to
/// `Tile::Empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeGrid {
    tiles: Vec<Vec<Tile>>,
    cols: usize,
}

impl MazeGrid {
    /// Parses a layout. Returns the grid together with the first `P` marker
    /// found, if any.
    pub fn parse(rows: &[&str]) -> Result<(MazeGrid, Option<TilePos>), LevelError> {
        let cols = rows.first().ok_or(LevelError::Empty)?.chars().count();
        let mut tiles = Vec::with_capacity(rows.len());
        let mut player_start = None;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LevelError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            let mut parsed = Vec::with_capacity(cols);
            for (col, symbol) in line.chars().enumerate() {
                let tile = match symbol {
                    '#' => Tile::Wall,
                    ' ' => Tile::Empty,
                    '.' => Tile::Pellet,
                    'o' => Tile::PowerPellet,
                    '0' => Tile::SpawnMarker,
                    'P' => {
                        player_start.get_or_insert(TilePos::new(row, col));
                        Tile::SpawnMarker
                    }
                    _ => return Err(LevelError::UnknownSymbol { symbol, row, col }),
                };
                parsed.push(tile);
            }
            tiles.push(parsed);
        }

        Ok((MazeGrid { tiles, cols }, player_start))
    }

    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile(&self, pos: TilePos) -> Option<Tile> {
        self.tiles.get(pos.row)?.get(pos.col).copied()
    }

    /// Maps a world position to the tile containing it. `None` when the
    /// position lies outside the grid.
    pub fn tile_at(&self, position: Vec2) -> Option<TilePos> {
        let col = (position.x / TILE_SIZE).floor();
        let row = (position.y / TILE_SIZE).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let pos = TilePos::new(row as usize, col as usize);
        if pos.row >= self.rows() || pos.col >= self.cols {
            return None;
        }
        Some(pos)
    }

    /// Out-of-bounds tiles are never walkable.
    pub fn is_walkable(&self, pos: TilePos) -> bool {
        self.tile(pos).is_some_and(Tile::is_walkable)
    }

    pub fn is_walkable_at(&self, position: Vec2) -> bool {
        self.tile_at(position)
            .is_some_and(|pos| self.is_walkable(pos))
    }

    /// Clears the collectible on the tile containing `position` and reports
    /// what was there. Returns `None` once the tile is empty.
    pub fn consume_collectible(&mut self, position: Vec2) -> Option<Collectible> {
        let pos = self.tile_at(position)?;
        let tile = &mut self.tiles[pos.row][pos.col];
        let eaten = tile.collectible()?;
        *tile = Tile::Empty;
        Some(eaten)
    }

    pub fn has_remaining_collectibles(&self) -> bool {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .any(|tile| tile.collectible().is_some())
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.collectible().is_some())
            .count()
    }

    /// Row-major iteration over every tile, for rendering.
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, tiles)| {
            tiles
                .iter()
                .enumerate()
                .map(move |(col, tile)| (TilePos::new(row, col), *tile))
        })
    }
}

/// Top-left world position of a tile.
pub fn tile_origin(pos: TilePos) -> Vec2 {
    Vec2::new(pos.col as f32 * TILE_SIZE, pos.row as f32 * TILE_SIZE)
}

/// Centre of a tile-sized box whose top-left corner is `position`.
pub fn box_centre(position: Vec2) -> Vec2 {
    position + Vec2::new(TILE_SIZE / 2.0, TILE_SIZE / 2.0)
}

#[derive(Debug, Clone)]
pub struct LevelData {
    pub grid: MazeGrid,
    pub player_start: TilePos,
    pub ghost_starts: [TilePos; 4],
}

pub fn create_level() -> Result<LevelData, LevelError> {
    let (grid, player_start) = MazeGrid::parse(&LAYOUT)?;
    Ok(LevelData {
        grid,
        player_start: player_start.ok_or(LevelError::MissingPlayerSpawn)?,
        ghost_starts: GHOST_STARTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> MazeGrid {
        MazeGrid::parse(rows).expect("valid layout").0
    }

    #[test]
    fn shipped_level_is_consistent() {
        let level = create_level().expect("level parses");
        assert_eq!(level.grid.rows(), 19);
        assert_eq!(level.grid.cols(), 21);
        assert_eq!(level.player_start, TilePos::new(15, 10));
        assert!(level.grid.is_walkable(level.player_start));
        for start in level.ghost_starts {
            assert!(level.grid.is_walkable(start));
        }
        assert!(level.grid.has_remaining_collectibles());
    }

    #[test]
    fn ragged_layout_is_rejected() {
        let err = MazeGrid::parse(&["###", "#."]).unwrap_err();
        assert_eq!(
            err,
            LevelError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = MazeGrid::parse(&["#x#"]).unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownSymbol {
                symbol: 'x',
                row: 0,
                col: 1
            }
        );
    }

    #[test]
    fn tile_at_divides_by_tile_size() {
        let g = grid(&["###", "#.#", "###"]);
        assert_eq!(g.tile_at(Vec2::new(30.0, 26.0)), Some(TilePos::new(1, 1)));
        assert_eq!(g.tile_at(Vec2::new(74.9, 74.9)), Some(TilePos::new(2, 2)));
        assert_eq!(g.tile_at(Vec2::new(75.0, 10.0)), None);
        assert_eq!(g.tile_at(Vec2::new(-0.5, 10.0)), None);
        assert!(!g.is_walkable_at(Vec2::new(-0.5, 30.0)));
        assert!(!g.is_walkable(TilePos::new(5, 5)));
    }

    #[test]
    fn consuming_is_idempotent() {
        let mut g = grid(&["#####", "#.o #", "#####"]);
        let pellet = tile_origin(TilePos::new(1, 1));
        let power = tile_origin(TilePos::new(1, 2));

        assert_eq!(g.consume_collectible(pellet), Some(Collectible::Pellet));
        assert_eq!(g.consume_collectible(pellet), None);
        assert_eq!(g.tile(TilePos::new(1, 1)), Some(Tile::Empty));

        assert_eq!(g.remaining_collectibles(), 1);
        assert_eq!(g.consume_collectible(power), Some(Collectible::PowerPellet));
        assert!(!g.has_remaining_collectibles());
        assert_eq!(g.consume_collectible(tile_origin(TilePos::new(1, 3))), None);
    }

    #[test]
    fn spawn_markers_hold_nothing() {
        let (g, player) = MazeGrid::parse(&["#P0#"]).expect("valid layout");
        assert_eq!(player, Some(TilePos::new(0, 1)));
        assert_eq!(g.tile(TilePos::new(0, 2)), Some(Tile::SpawnMarker));
        assert!(!g.has_remaining_collectibles());
    }
}
