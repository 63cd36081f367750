use super::data::ScopeSettings;
use anyhow::{Context, Result, ensure};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sweepscope")
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn parse_settings(json: &str) -> Result<ScopeSettings> {
    let mut data: ScopeSettings =
        serde_json::from_str(json).context("malformed settings JSON")?;
    ensure!(
        data.parameters.is_finite(),
        "settings contain non-finite parameters"
    );
    data.sanitize();
    Ok(data)
}

/// Strict load used for an explicitly requested file.
pub fn load_from(path: &Path) -> Result<ScopeSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {path:?}"))?;
    parse_settings(&json).with_context(|| format!("invalid settings in {path:?}"))
}

/// Lenient load of the per-user settings file; anything unusable falls back
/// to defaults.
pub fn load_or_default() -> ScopeSettings {
    load_path_or_default(&default_settings_path())
}

fn load_path_or_default(path: &Path) -> ScopeSettings {
    match fs::read_to_string(path) {
        Ok(json) => parse_settings(&json)
            .map_err(|e| warn!("[settings] parse error {path:?}: {e:#}"))
            .unwrap_or_default(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("[settings] no settings at {path:?}; using defaults");
            ScopeSettings::default()
        }
        Err(e) => {
            warn!("[settings] failed to read {path:?}: {e}");
            ScopeSettings::default()
        }
    }
}
