//! Settings loading: defaults, JSON file, env overrides.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::Result;
use crate::types::BingoSettings;

/// Path of the settings file: `$BINGO_CONFIG`, or `bingo.json` in the
/// working directory.
pub fn settings_path() -> PathBuf {
    std::env::var("BINGO_CONFIG")
        .map_or_else(|_| PathBuf::from("bingo.json"), PathBuf::from)
}

/// Load settings from the default path (see [`settings_path`]).
pub fn load_settings() -> Result<BingoSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific file.
///
/// The file is deep-merged over compiled defaults, then `BINGO_*`
/// environment variables are applied, then values are validated.
pub fn load_settings_from_path(path: &Path) -> Result<BingoSettings> {
    let text = std::fs::read_to_string(path)?;
    let file_value: Value = serde_json::from_str(&text)?;
    let defaults = serde_json::to_value(BingoSettings::default())?;
    let mut settings: BingoSettings = serde_json::from_value(deep_merge(defaults, file_value))?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Recursively merge `overlay` over `base`. Objects merge key-by-key;
/// any other value in `overlay` replaces the base value.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Apply `BINGO_*` environment variable overrides (highest priority).
fn apply_env_overrides(settings: &mut BingoSettings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Override seam: `get` resolves a variable name to a value, so tests can
/// substitute a map for the process environment.
fn apply_overrides<F>(settings: &mut BingoSettings, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = get("BINGO_HOST") {
        settings.server.host = host;
    }
    if let Some(port) = get("BINGO_PORT") {
        match port.parse() {
            Ok(port) => settings.server.port = port,
            Err(_) => tracing::warn!(%port, "ignoring unparseable BINGO_PORT"),
        }
    }
    if let Some(path) = get("BINGO_STORAGE_PATH") {
        settings.storage.path = path;
    }
    if let Some(dir) = get("BINGO_POOLS_DIR") {
        settings.game.pools_dir = dir;
    }
    if let Some(rerolls) = get("BINGO_TOTAL_REROLLS") {
        match rerolls.parse() {
            Ok(rerolls) => settings.game.total_rerolls = rerolls,
            Err(_) => tracing::warn!(%rerolls, "ignoring unparseable BINGO_TOTAL_REROLLS"),
        }
    }
    if let Some(level) = get("BINGO_LOG_LEVEL") {
        settings.logging.level = level;
    }
}
