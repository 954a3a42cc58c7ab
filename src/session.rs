use rand::Rng;
use tracing::{info, warn};

use crate::components::Direction;
use crate::events::GameEvent;
use crate::ghost::{Ghost, GhostKind};
use crate::highscore::HighScoreStore;
use crate::level::{LevelData, MazeGrid};
use crate::player::Pacman;
use crate::power::{CollisionOutcome, Scoreboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Victory,
    GameOver,
    Quit,
}

/// One play-through of the maze: owns the grid and every agent, and advances
/// them one frame at a time.
pub struct Session {
    grid: MazeGrid,
    player: Pacman,
    ghosts: Vec<Ghost>,
    scoreboard: Scoreboard,
    status: SessionStatus,
    prior_high_score: u32,
}

impl Session {
    pub fn new(level: LevelData, prior_high_score: u32) -> Self {
        let ghosts = GhostKind::ROSTER
            .iter()
            .zip(level.ghost_starts)
            .map(|(kind, start)| Ghost::new(*kind, start))
            .collect();
        info!(
            prior_high_score,
            collectibles = level.grid.remaining_collectibles(),
            "session started"
        );
        Self {
            player: Pacman::new(level.player_start),
            grid: level.grid,
            ghosts,
            scoreboard: Scoreboard::default(),
            status: SessionStatus::Running,
            prior_high_score,
        }
    }

    pub fn handle_input(&mut self, direction: Direction) {
        if self.status == SessionStatus::Running {
            self.player.handle_input(direction);
        }
    }

    /// Advances the session by one frame of `dt` seconds.
    ///
    /// Order within a tick is fixed: power countdown, player move, collectible
    /// pickup, ghosts in roster order, then contact checks. Every ghost sees
    /// the same player position.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status != SessionStatus::Running {
            return events;
        }

        self.scoreboard.tick(dt);
        self.player.advance(&self.grid, dt);
        events.extend(
            self.scoreboard
                .on_player_moved(&mut self.grid, self.player.position),
        );

        let player = self.player.position;
        let powered = self.scoreboard.power().is_active();
        for ghost in &mut self.ghosts {
            ghost.update(&self.grid, player, powered, dt, rng);
        }

        for ghost in &mut self.ghosts {
            match self.scoreboard.resolve_agent_collision(player, ghost.position) {
                CollisionOutcome::Clear => {}
                CollisionOutcome::GhostCaptured => {
                    info!(ghost = ?ghost.kind, score = self.scoreboard.score(), "ghost captured");
                    ghost.send_home();
                    events.push(GameEvent::GhostCaptured(ghost.kind));
                }
                CollisionOutcome::PlayerCaptured => {
                    info!(ghost = ?ghost.kind, score = self.scoreboard.score(), "player captured");
                    self.status = SessionStatus::GameOver;
                    events.push(GameEvent::PlayerCaptured);
                    break;
                }
            }
        }

        if self.status == SessionStatus::Running && !self.grid.has_remaining_collectibles() {
            info!(score = self.scoreboard.score(), "maze cleared");
            self.status = SessionStatus::Victory;
        }
        events
    }

    /// Ends a running session at the player's request.
    pub fn quit(&mut self) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Quit;
        }
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::Running
    }

    /// Hands a beaten high score to `store`. Returns the new high score when
    /// one was set. Persistence failures are logged and otherwise ignored.
    pub fn finish(&mut self, store: &mut dyn HighScoreStore) -> Option<u32> {
        let score = self.scoreboard.score();
        if score <= self.prior_high_score {
            return None;
        }
        if let Err(err) = store.save(score) {
            warn!(error = %err, score, "could not save high score");
        }
        self.prior_high_score = score;
        Some(score)
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn player(&self) -> &Pacman {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn high_score(&self) -> u32 {
        self.prior_high_score.max(self.scoreboard.score())
    }

    pub fn power_active(&self) -> bool {
        self.scoreboard.power().is_active()
    }

    pub fn power_remaining(&self) -> f32 {
        self.scoreboard.power().remaining()
    }
}
