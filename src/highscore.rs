//! Best score persisted as JSON between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR: &str = ".gridsnake";
const FILE_NAME: &str = "highscore.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    best: u32,
}

#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    record: HighScoreRecord,
}

impl HighScoreStore {
    /// `~/.gridsnake/highscore.json`
    pub fn default_path() -> io::Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Ok(home_dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Reads the store at `path`. A missing or unreadable file starts at zero.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                HighScoreRecord::default()
            }),
            Err(_) => {
                log::info!("No high score at {}, starting fresh", path.display());
                HighScoreRecord::default()
            }
        };
        Self { path, record }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn best(&self) -> u32 {
        self.record.best
    }

    /// Records `score` if it beats the stored best. Returns whether it did.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.record.best {
            return false;
        }
        self.record.best = score;
        true
    }

    pub fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        log::debug!("High score {} saved to {}", self.record.best, self.path.display());
        Ok(())
    }
}
