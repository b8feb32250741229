use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use std::env;
use std::fs;
use std::path::PathBuf;

const PATH_ENV: &str = "STREAMHUB_FAVORITES_PATH";
const FILE_NAME: &str = "favorite_teams.json";

/// Persistence seam for the favorite-team list. The engine never touches
/// this; it only ever sees the loaded set inside `FilterCriteria`.
pub trait FavoritesStore {
    fn load(&self) -> Vec<String>;
    fn save(&self, teams: &[String]) -> Result<()>;
}

/// Favorites as a flat JSON string array in one well-known file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `STREAMHUB_FAVORITES_PATH` when set, else the platform config dir.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "streamhub").map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    /// Flip one team in the stored list; returns true when it is now a
    /// favorite.
    pub fn toggle(&self, team: &str) -> Result<bool> {
        let mut teams = self.load();
        let added = if let Some(pos) = teams.iter().position(|t| t == team) {
            teams.remove(pos);
            false
        } else {
            teams.push(team.to_owned());
            true
        };
        self.save(&teams)?;
        Ok(added)
    }
}

impl FavoritesStore for FileStore {
    fn load(&self) -> Vec<String> {
        // Missing or unreadable file just means no favorites yet.
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                debug!("ignoring malformed favorites file {:?}: {e}", self.path);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn save(&self, teams: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(teams)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
