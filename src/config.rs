use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::constants::{DEFAULT_HIGH_SCORE_FILE, DEFAULT_LOG_FILE, DEFAULT_RENDER_FPS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fps must be greater than zero")]
    InvalidFps,
}

/// Terminal Pac-Man: eat every pellet, dodge the ghosts.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Settings {
    /// Frames rendered per second.
    #[arg(long, env = "PACMAN_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    pub fps: u64,

    /// Plain-text file holding the best score.
    #[arg(long, env = "PACMAN_HIGHSCORE", default_value = DEFAULT_HIGH_SCORE_FILE)]
    pub high_score_file: PathBuf,

    /// Seed for ghost decisions; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes. The terminal itself is taken by the game.
    #[arg(long, env = "PACMAN_LOG", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Settings {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidFps);
        }
        Ok(self)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1))
    }
}
