use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::components::{Direction, TilePos, Vec2};
use crate::constants::{GHOST_SPEED, PATROL_INTERVAL_SECS};
use crate::level::{tile_origin, MazeGrid};
use crate::motion::try_move;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    pub const ROSTER: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    /// Distance under which this ghost starts chasing the player.
    pub fn engagement_distance(self) -> f32 {
        match self {
            GhostKind::Blinky => 150.0,
            GhostKind::Pinky => 120.0,
            GhostKind::Inky => 100.0,
            GhostKind::Clyde => 130.0,
        }
    }
}

/// Behaviour picked for a ghost on a given tick. Exposed so the renderer can
/// pick a glyph for frightened ghosts.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostMode {
    Patrol,
    Pursue,
    Evade,
}

/// Decides a ghost's behaviour from the current situation alone.
pub fn select_mode(distance: f32, power_active: bool, engagement_distance: f32) -> GhostMode {
    if power_active {
        GhostMode::Evade
    } else if distance < engagement_distance {
        GhostMode::Pursue
    } else {
        GhostMode::Patrol
    }
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub kind: GhostKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub spawn: Vec2,
    pub mode: GhostMode,
    pub engagement_distance: f32,
    pub patrol_interval: f32,
    patrol_timer: f32,
}

impl Ghost {
    pub fn new(kind: GhostKind, start: TilePos) -> Self {
        let spawn = tile_origin(start);
        Self {
            kind,
            position: spawn,
            velocity: Vec2::ZERO,
            spawn,
            mode: GhostMode::Patrol,
            engagement_distance: kind.engagement_distance(),
            patrol_interval: PATROL_INTERVAL_SECS,
            patrol_timer: 0.0,
        }
    }

    /// Runs one tick of decision and movement. `player` is the player's
    /// position as sampled at the start of the tick.
    pub fn update(
        &mut self,
        grid: &MazeGrid,
        player: Vec2,
        power_active: bool,
        dt: f32,
        rng: &mut impl Rng,
    ) -> GhostMode {
        self.patrol_timer += dt;

        let distance = self.position.distance(player);
        let mode = select_mode(distance, power_active, self.engagement_distance);
        match mode {
            GhostMode::Evade => {
                self.velocity = self.steer(grid, player, dt, |d, best| d > best);
            }
            GhostMode::Pursue => {
                self.velocity = self.steer(grid, player, dt, |d, best| d < best);
            }
            GhostMode::Patrol => {
                if self.patrol_timer >= self.patrol_interval || self.velocity == Vec2::ZERO {
                    self.patrol_timer = 0.0;
                    self.wander(grid, dt, rng);
                }
            }
        }

        let mut outcome = try_move(grid, self.position, self.velocity, dt);
        if !outcome.moved {
            self.wander(grid, dt, rng);
            outcome = try_move(grid, self.position, self.velocity, dt);
        }
        self.position = outcome.position;

        if mode != self.mode {
            debug!(ghost = ?self.kind, from = ?self.mode, to = ?mode, distance, "ghost mode changed");
        }
        self.mode = mode;
        mode
    }

    /// Sends a captured ghost back to where it started.
    pub fn send_home(&mut self) {
        self.position = self.spawn;
    }

    /// Headings the resolver accepts this frame, each with where it lands.
    fn open_moves(&self, grid: &MazeGrid, dt: f32) -> Vec<(Vec2, Vec2)> {
        Direction::ALL
            .into_iter()
            .map(|dir| dir.velocity(GHOST_SPEED))
            .filter_map(|velocity| {
                let outcome = try_move(grid, self.position, velocity, dt);
                outcome.moved.then_some((velocity, outcome.position))
            })
            .collect()
    }

    /// Picks the open heading whose landing spot scores best against
    /// `player`. The current heading wins ties, and is kept when nothing is
    /// open.
    fn steer(
        &self,
        grid: &MazeGrid,
        player: Vec2,
        dt: f32,
        better: impl Fn(f32, f32) -> bool,
    ) -> Vec2 {
        let open = self.open_moves(grid, dt);
        let mut best = open
            .iter()
            .find(|(velocity, _)| *velocity == self.velocity)
            .map(|(velocity, landing)| (*velocity, landing.distance(player)));
        for (velocity, landing) in open {
            let distance = landing.distance(player);
            match best {
                Some((_, best_distance)) if !better(distance, best_distance) => {}
                _ => best = Some((velocity, distance)),
            }
        }
        best.map_or(self.velocity, |(velocity, _)| velocity)
    }

    /// Random open heading, or a reversal when boxed in.
    fn wander(&mut self, grid: &MazeGrid, dt: f32, rng: &mut impl Rng) {
        self.velocity = match self.open_moves(grid, dt).choose(rng) {
            Some((velocity, _)) => *velocity,
            None => -self.velocity,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::create_level;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 15x15 open room with a solid border.
    const ARENA: [&str; 15] = [
        "###############",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "#             #",
        "###############",
    ];

    fn arena() -> MazeGrid {
        MazeGrid::parse(&ARENA).expect("valid layout").0
    }

    /// Walls one tile apart, much closer than a ghost travels in a second.
    const CORRIDORS: [&str; 7] = [
        "###########",
        "#   #     #",
        "# # # ### #",
        "# #   #   #",
        "# ### # # #",
        "#       # #",
        "###########",
    ];

    fn corridors() -> MazeGrid {
        MazeGrid::parse(&CORRIDORS).expect("valid layout").0
    }

    const STEP: f32 = 0.1;

    fn open_distances(ghost: &Ghost, grid: &MazeGrid, player: Vec2) -> Vec<f32> {
        ghost
            .open_moves(grid, STEP)
            .into_iter()
            .map(|(_, landing)| landing.distance(player))
            .collect()
    }

    #[test]
    fn mode_is_a_pure_function_of_inputs() {
        assert_eq!(select_mode(10.0, true, 100.0), GhostMode::Evade);
        assert_eq!(select_mode(500.0, true, 100.0), GhostMode::Evade);
        assert_eq!(select_mode(99.9, false, 100.0), GhostMode::Pursue);
        assert_eq!(select_mode(100.0, false, 100.0), GhostMode::Patrol);
    }

    #[test]
    fn roster_has_distinct_thresholds() {
        let mut thresholds: Vec<u32> = GhostKind::ROSTER
            .iter()
            .map(|k| k.engagement_distance() as u32)
            .collect();
        thresholds.sort_unstable();
        thresholds.dedup();
        assert_eq!(thresholds.len(), 4);
    }

    #[test]
    fn pursuing_ghost_takes_the_closest_open_heading() {
        let mut rng = StdRng::seed_from_u64(7);
        let open_room = [
            TilePos::new(7, 7),
            TilePos::new(3, 3),
            TilePos::new(11, 5),
            TilePos::new(1, 1),
        ];
        let tight = [
            TilePos::new(1, 1),
            TilePos::new(3, 4),
            TilePos::new(1, 5),
            TilePos::new(5, 3),
            TilePos::new(3, 9),
        ];
        let cases = [
            (arena(), tile_origin(TilePos::new(7, 12)), &open_room[..]),
            (corridors(), tile_origin(TilePos::new(5, 9)), &tight[..]),
        ];
        for (grid, player, starts) in cases {
            for start in starts {
                let mut ghost = Ghost::new(GhostKind::Blinky, *start);
                ghost.engagement_distance = 1_000.0;
                let closest = open_distances(&ghost, &grid, player)
                    .into_iter()
                    .fold(f32::MAX, f32::min);

                let mode = ghost.update(&grid, player, false, STEP, &mut rng);
                assert_eq!(mode, GhostMode::Pursue);
                assert_ne!(ghost.position, tile_origin(*start), "from {start:?}");
                assert_eq!(ghost.position.distance(player), closest, "from {start:?}");
            }
        }
    }

    #[test]
    fn evading_ghost_takes_the_farthest_open_heading() {
        let mut rng = StdRng::seed_from_u64(7);
        let open_room = [TilePos::new(7, 7), TilePos::new(4, 8), TilePos::new(10, 10)];
        let tight = [
            TilePos::new(3, 3),
            TilePos::new(1, 5),
            TilePos::new(5, 5),
            TilePos::new(3, 9),
        ];
        let cases = [
            (arena(), tile_origin(TilePos::new(7, 12)), &open_room[..]),
            (corridors(), tile_origin(TilePos::new(5, 1)), &tight[..]),
        ];
        for (grid, player, starts) in cases {
            for start in starts {
                let mut ghost = Ghost::new(GhostKind::Inky, *start);
                let farthest = open_distances(&ghost, &grid, player)
                    .into_iter()
                    .fold(f32::MIN, f32::max);

                let mode = ghost.update(&grid, player, true, STEP, &mut rng);
                assert_eq!(mode, GhostMode::Evade);
                assert_ne!(ghost.position, tile_origin(*start), "from {start:?}");
                assert_eq!(ghost.position.distance(player), farthest, "from {start:?}");
            }
        }
    }

    #[test]
    fn pursuing_ghost_under_a_wall_keeps_moving() {
        let grid = create_level().expect("level parses").grid;
        let mut rng = StdRng::seed_from_u64(9);
        // Row 16 is solid between the ghost and the player.
        let mut ghost = Ghost::new(GhostKind::Blinky, TilePos::new(17, 9));
        let player = tile_origin(TilePos::new(15, 9));

        for tick in 0..600 {
            let before = ghost.position;
            let mode = ghost.update(&grid, player, false, 1.0 / 60.0, &mut rng);
            assert_eq!(mode, GhostMode::Pursue);
            assert_ne!(ghost.position, before, "stalled on tick {tick}");
        }
    }

    #[test]
    fn ghosts_in_the_maze_never_stand_still() {
        let level = create_level().expect("level parses");
        let mut rng = StdRng::seed_from_u64(21);
        let mut ghosts: Vec<Ghost> = GhostKind::ROSTER
            .iter()
            .zip(level.ghost_starts)
            .map(|(kind, start)| Ghost::new(*kind, start))
            .collect();
        let player = tile_origin(level.player_start);

        for tick in 0..3_000 {
            let powered = (tick / 500) % 2 == 1;
            for ghost in &mut ghosts {
                let before = ghost.position;
                ghost.update(&level.grid, player, powered, 1.0 / 60.0, &mut rng);
                assert_ne!(
                    ghost.position, before,
                    "{:?} stalled on tick {tick}",
                    ghost.kind
                );
            }
        }
    }

    #[test]
    fn tie_keeps_current_heading() {
        let grid = arena();
        let mut rng = StdRng::seed_from_u64(1);
        // Player straight below: left and right land equally far away.
        let mut ghost = Ghost::new(GhostKind::Pinky, TilePos::new(1, 7));
        let player = tile_origin(TilePos::new(12, 7));
        ghost.velocity = Direction::Right.velocity(GHOST_SPEED);
        ghost.update(&grid, player, true, STEP, &mut rng);
        assert_eq!(ghost.velocity, Direction::Right.velocity(GHOST_SPEED));
    }

    #[test]
    fn patrol_choice_is_gated_by_interval() {
        let grid = arena();
        let mut rng = StdRng::seed_from_u64(3);
        let mut ghost = Ghost::new(GhostKind::Clyde, TilePos::new(7, 7));
        let far = Vec2::new(10_000.0, 10_000.0);

        // No heading yet, so one is picked straight away.
        ghost.update(&grid, far, false, 0.1, &mut rng);
        assert_eq!(ghost.mode, GhostMode::Patrol);
        assert_eq!(ghost.velocity.length(), GHOST_SPEED);
        let chosen = ghost.velocity;

        for _ in 0..8 {
            ghost.update(&grid, far, false, 0.1, &mut rng);
            assert_eq!(ghost.velocity, chosen);
        }
        assert_ne!(ghost.position, tile_origin(TilePos::new(7, 7)));
    }

    #[test]
    fn boxed_in_ghost_reverses() {
        let grid = MazeGrid::parse(&["###", "# #", "###"]).expect("valid layout").0;
        let mut rng = StdRng::seed_from_u64(5);
        let mut ghost = Ghost::new(GhostKind::Blinky, TilePos::new(1, 1));
        ghost.velocity = Direction::Up.velocity(GHOST_SPEED);

        ghost.update(&grid, Vec2::new(1_000.0, 1_000.0), false, 0.1, &mut rng);
        assert_eq!(ghost.velocity, Direction::Down.velocity(GHOST_SPEED));
        assert_eq!(ghost.position, tile_origin(TilePos::new(1, 1)));
    }

    #[test]
    fn blocked_patrol_heading_is_replaced_the_same_tick() {
        let grid = arena();
        let mut rng = StdRng::seed_from_u64(11);
        let mut ghost = Ghost::new(GhostKind::Pinky, TilePos::new(1, 1));
        // Patrol with a heading straight into the top wall.
        ghost.velocity = Direction::Up.velocity(GHOST_SPEED);
        ghost.update(&grid, Vec2::new(10_000.0, 0.0), false, 0.1, &mut rng);
        assert_ne!(ghost.velocity, Direction::Up.velocity(GHOST_SPEED));
        assert_ne!(ghost.position, tile_origin(TilePos::new(1, 1)));
    }

    #[test]
    fn captured_ghost_returns_to_spawn() {
        let mut ghost = Ghost::new(GhostKind::Inky, TilePos::new(3, 3));
        ghost.position = Vec2::new(140.0, 20.0);
        ghost.send_home();
        assert_eq!(ghost.position, tile_origin(TilePos::new(3, 3)));
    }
}
