//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Result;

const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Upper bound on each location request. `None` leaves it to the platform.
    #[serde(default)]
    pub location_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("tally.db"),
            location_timeout_secs: None,
        }
    }

    /// `$TALLY_DATA_DIR`, else the platform's local data directory.
    pub fn data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| platform::data_local_dir().map(|d| d.join("tally")))
            .unwrap_or_else(|| PathBuf::from(".tally"))
    }

    pub fn location_timeout(&self) -> Option<Duration> {
        self.location_timeout_secs.map(Duration::from_secs)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod platform {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var_os("HOME").map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            std::env::var_os("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
        }
        #[cfg(not(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "linux",
            target_os = "android"
        )))]
        {
            None
        }
    }
}
