//! # bingo-settings
//!
//! Configuration management with layered sources for the bingo service.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`BingoSettings::default()`]
//! 2. **Settings file**: `bingo.json` (deep-merged over defaults)
//! 3. **Environment variables**: `BINGO_*` overrides (highest priority)
//!
//! The global singleton is reloadable so long-running processes can pick
//! up configuration changes without a restart.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::path::Path;
use std::sync::{Arc, RwLock};

/// Global settings singleton.
///
/// `RwLock<Option<Arc<BingoSettings>>>` rather than `OnceLock` so the
/// cached value can be swapped on reload. Reads are a shared lock plus an
/// `Arc::clone`; writes only happen on reload.
static SETTINGS: RwLock<Option<Arc<BingoSettings>>> = RwLock::new(None);

/// Get the global settings instance.
///
/// On first call, loads from the default path with env overrides applied;
/// if loading fails (typically: no settings file), compiled defaults are
/// used. Returns an `Arc` so callers hold a consistent snapshot even if
/// another thread reloads concurrently.
pub fn get_settings() -> Arc<BingoSettings> {
    {
        let guard = SETTINGS.read().expect("settings lock poisoned");
        if let Some(ref s) = *guard {
            return Arc::clone(s);
        }
    }

    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    // Another thread may have initialized while we waited for the lock.
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            BingoSettings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Initialize the global settings with a specific value.
///
/// Replaces any previously cached settings. Used by the server binary when
/// a config path comes from the CLI, and by tests.
pub fn init_settings(settings: BingoSettings) {
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(Arc::new(settings));
}

/// Reload settings from a specific file path and swap the global cache.
pub fn reload_settings_from_path(path: &Path) {
    let new = Arc::new(match load_settings_from_path(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to reload settings, falling back to defaults");
            BingoSettings::default()
        }
    });
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(new);
    tracing::info!(?path, "settings reloaded from disk");
}

/// Reset the global settings cache (test-only).
#[cfg(test)]
pub(crate) fn reset_settings() {
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = None;
}
