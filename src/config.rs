//! Persisted viewer settings.
//!
//! A small TOML file remembers where the snapshot lives (installed path
//! and the share link it came from) and which novel is "mine" for the
//! aggregate view. `np fetch` writes it; every report command reads it.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Installed snapshot database.
    pub db_path: Option<PathBuf>,
    /// Share link the snapshot was last fetched from.
    pub db_url: Option<String>,
    /// Novel highlighted by default in the aggregate view.
    pub my_novel_id: Option<i64>,
}

impl Config {
    /// Config file location: `$NOVELPULSE_CONFIG` override, else
    /// `~/.config/novelpulse/config.toml`.
    pub fn path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os("NOVELPULSE_CONFIG") {
            return Some(PathBuf::from(explicit));
        }
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config/novelpulse/config.toml"))
    }

    /// Load the config, falling back to defaults when the file is absent
    /// or unreadable. A malformed file warns and starts fresh rather than
    /// blocking every command.
    pub fn load() -> Config {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    fn load_from(path: &Path) -> Config {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Config::default(),
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: {}: {e}", path.display());
                Config::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let path = Self::path().ok_or("cannot determine config path (HOME not set)")?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
