//! Configuration module for incident-search
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "INCIDENT_SEARCH_SETTINGS_PATH";

/// Load settings from `path`, or use defaults when there is none.
///
/// Environment overrides are applied last, then the result is validated.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

/// Find the settings file to use.
///
/// Lookup order: `INCIDENT_SEARCH_SETTINGS_PATH`, `settings.yml`,
/// `config/settings.yml`, `/etc/incident-search/settings.yml`, then the
/// user config directory.
pub fn locate() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/incident-search/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("incident-search/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
