/// Edge length of a maze tile, in world units.
pub const TILE_SIZE: f32 = 25.0;

/// Inset applied to every corner of an agent's bounding box before it is
/// checked against the grid. Keeps a tile-aligned agent from touching the
/// neighbouring wall.
pub const COLLISION_TOLERANCE: f32 = 2.0;

/// Player speed, world units per second.
pub const PLAYER_SPEED: f32 = 100.0;
/// Adversary speed, world units per second. Always below `PLAYER_SPEED`.
pub const GHOST_SPEED: f32 = 80.0;

/// Minimum time between two random patrol choices.
pub const PATROL_INTERVAL_SECS: f32 = 1.0;

/// Power pellet effect duration, seconds.
pub const POWER_DURATION_SECS: f32 = 8.0;

/// Agents closer than this (centre to centre) have collided.
pub const CAPTURE_RADIUS: f32 = TILE_SIZE / 1.2;

pub const PELLET_SCORE: u32 = 1;
pub const POWER_PELLET_SCORE: u32 = 10;
pub const GHOST_CAPTURE_SCORE: u32 = 50;

/// Largest frame delta fed to the simulation.
pub const MAX_FRAME_DT_SECS: f32 = 0.1;

pub const DEFAULT_RENDER_FPS: u64 = 120;
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";
pub const DEFAULT_LOG_FILE: &str = "pacman.log";
