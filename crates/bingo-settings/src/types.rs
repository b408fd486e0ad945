//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`
//! so a partial settings file is valid: missing fields get their compiled
//! default during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the bingo service.
///
/// # JSON Format
///
/// ```json
/// {
///   "server": { "port": 9090 },
///   "game": { "totalRerolls": 3 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BingoSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Server network settings.
    pub server: ServerSettings,
    /// Snapshot storage settings.
    pub storage: StorageSettings,
    /// Game rule settings.
    pub game: GameSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for BingoSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "bingo".to_string(),
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            game: GameSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl BingoSettings {
    /// Correct invalid values instead of rejecting them, so users get
    /// working behavior plus a warning rather than a startup failure.
    pub fn validate(&mut self) {
        let size = self.game.default_board_size;
        let side = size.isqrt();
        if size == 0 || side * side != size {
            tracing::warn!(
                size,
                "defaultBoardSize is not a perfect square, falling back to 25"
            );
            self.game.default_board_size = 25;
        }
    }
}

/// Server network settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Snapshot storage settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Directory holding one JSON snapshot file per session.
    pub path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: "data/sessions".to_string(),
        }
    }
}

/// Game rule settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Reroll budget granted to each new board.
    pub total_rerolls: u32,
    /// Cells per board when a create request does not specify a size.
    /// Must be a perfect square; corrected by [`BingoSettings::validate`].
    pub default_board_size: usize,
    /// Directory holding `<kind>.txt` word lists.
    pub pools_dir: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            total_rerolls: 2,
            default_board_size: 25,
            pools_dir: "pools".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Tracing filter directive (e.g. `info`, `bingo_server=debug`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_production_values() {
        let s = BingoSettings::default();
        assert_eq!(s.name, "bingo");
        assert_eq!(s.server.port, 8080);
        assert_eq!(s.storage.path, "data/sessions");
        assert_eq!(s.game.total_rerolls, 2);
        assert_eq!(s.game.default_board_size, 25);
        assert_eq!(s.game.pools_dir, "pools");
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: BingoSettings =
            serde_json::from_str(r#"{"server": {"port": 9090}}"#).unwrap();
        assert_eq!(s.server.port, 9090);
        assert_eq!(s.server.host, "0.0.0.0");
        assert_eq!(s.game.total_rerolls, 2);
    }

    #[test]
    fn camel_case_field_names() {
        let s: BingoSettings =
            serde_json::from_str(r#"{"game": {"totalRerolls": 5, "poolsDir": "lists"}}"#).unwrap();
        assert_eq!(s.game.total_rerolls, 5);
        assert_eq!(s.game.pools_dir, "lists");
    }

    #[test]
    fn validate_corrects_non_square_board_size() {
        let mut s = BingoSettings::default();
        s.game.default_board_size = 24;
        s.validate();
        assert_eq!(s.game.default_board_size, 25);

        s.game.default_board_size = 0;
        s.validate();
        assert_eq!(s.game.default_board_size, 25);

        s.game.default_board_size = 9;
        s.validate();
        assert_eq!(s.game.default_board_size, 9);
    }
}
