//! Persisted application settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub show_hidden: bool,
    pub start_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            start_dir: None,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "twinfiles")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

impl AppConfig {
    /// Load the saved config, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed config at {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the config. Failures are logged, never surfaced.
    pub fn save(&self) {
        let Some(path) = config_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("could not create config dir: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(text) => {
                if let Err(e) = std::fs::write(&path, text) {
                    log::warn!("could not save config: {e}");
                }
            }
            Err(e) => log::warn!("could not serialize config: {e}"),
        }
    }

    /// Directory both panes open at startup.
    pub fn start_dir(&self) -> PathBuf {
        self.start_dir
            .clone()
            .filter(|p| p.is_dir())
            .or_else(|| directories::UserDirs::new().map(|d| d.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.show_hidden);
        assert!(config.start_dir.is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let config = AppConfig {
            show_hidden: true,
            start_dir: Some(PathBuf::from("/tmp")),
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&text).unwrap();
        assert!(back.show_hidden);
        assert_eq!(back.start_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn start_dir_ignores_vanished_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            show_hidden: false,
            start_dir: Some(tmp.path().join("gone")),
        };
        let resolved = config.start_dir();
        assert_ne!(resolved, tmp.path().join("gone"));
        assert!(resolved.is_dir() || resolved == PathBuf::from("/"));
    }
}
