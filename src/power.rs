use tracing::{debug, info};

use crate::components::{Collectible, Vec2};
use crate::constants::{
    CAPTURE_RADIUS, GHOST_CAPTURE_SCORE, PELLET_SCORE, POWER_DURATION_SECS, POWER_PELLET_SCORE,
};
use crate::events::GameEvent;
use crate::level::{box_centre, MazeGrid};

/// Countdown started by a power pellet. Eating another one while active
/// restarts the countdown instead of extending it.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerState {
    active: bool,
    elapsed: f32,
    duration: f32,
}

impl PowerState {
    pub fn new(duration: f32) -> Self {
        Self {
            active: false,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds left before the effect wears off; zero when inactive.
    pub fn remaining(&self) -> f32 {
        if self.active {
            (self.duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    /// Advances the countdown. Returns true on the tick the effect expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}

impl Default for PowerState {
    fn default() -> Self {
        Self::new(POWER_DURATION_SECS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Clear,
    GhostCaptured,
    PlayerCaptured,
}

/// Score and power bookkeeping for one session.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    score: u32,
    power: PowerState,
}

impl Scoreboard {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn power(&self) -> &PowerState {
        &self.power
    }

    /// Eats whatever lies under the centre of the player's box.
    pub fn on_player_moved(&mut self, grid: &mut MazeGrid, position: Vec2) -> Option<GameEvent> {
        match grid.consume_collectible(box_centre(position))? {
            Collectible::Pellet => {
                self.score += PELLET_SCORE;
                Some(GameEvent::PelletEaten)
            }
            Collectible::PowerPellet => {
                self.score += POWER_PELLET_SCORE;
                let restarted = self.power.is_active();
                self.power.activate();
                info!(score = self.score, restarted, "power pellet eaten");
                Some(GameEvent::PowerPelletEaten)
            }
        }
    }

    /// Returns true on the tick the power effect wears off.
    pub fn tick(&mut self, dt: f32) -> bool {
        let expired = self.power.tick(dt);
        if expired {
            info!("power expired");
        }
        expired
    }

    /// Checks a player/ghost pair for contact. A capture while powered scores
    /// the ghost; the caller relocates it.
    pub fn resolve_agent_collision(&mut self, player: Vec2, ghost: Vec2) -> CollisionOutcome {
        let distance = player.distance(ghost);
        if distance >= CAPTURE_RADIUS {
            return CollisionOutcome::Clear;
        }
        debug!(distance, powered = self.power.is_active(), "agents collided");
        if self.power.is_active() {
            self.score += GHOST_CAPTURE_SCORE;
            CollisionOutcome::GhostCaptured
        } else {
            CollisionOutcome::PlayerCaptured
        }
    }
}
