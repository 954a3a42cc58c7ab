use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to read high score from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write high score to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold an integer: {content:?}")]
    Malformed { path: PathBuf, content: String },
}

/// Where the best score survives between sessions.
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, HighScoreError>;
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// A single decimal integer in a plain text file. A missing file reads as 0.
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> Result<u32, HighScoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no high score file, starting from 0");
                return Ok(0);
            }
            Err(source) => {
                return Err(HighScoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed.parse().map_err(|_| HighScoreError::Malformed {
            path: self.path.clone(),
            content: trimmed.to_string(),
        })
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        let write_err = |source| HighScoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, score.to_string()).map_err(write_err)?;
        info!(path = %self.path.display(), score, "high score saved");
        Ok(())
    }
}
