// Settings persistence: a TOML record in the platform config directory.
// Missing or malformed fields fall back to per-field defaults; a corrupt
// file is recovered by rewriting the defaults.

use chrono::Local;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::xsp_board::{BoardConfig, ConfigError};

pub const DEFAULT_ROWS: usize = 7;
pub const DEFAULT_COLUMNS: usize = 10;
pub const DEFAULT_MINES: usize = 10;

/// Non-integer input in the settings dialog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not a whole number: {input:?}")]
pub struct ParseError {
    pub input: String,
}

/// Parse a settings-dialog field, rejecting anything but a plain integer
pub fn parse_field(input: &str) -> Result<usize, ParseError> {
    input.trim().parse::<usize>().map_err(|_| ParseError {
        input: input.trim().to_string(),
    })
}

/// Persisted user settings
/// `version` and `saved_at` are metadata the game logic ignores
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub mines: usize,
    pub language: String,
    pub version: String,
    pub saved_at: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Auto-detect system language on first run
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang = if system_lang.to_lowercase().starts_with("ru") {
            "ru".to_string()
        } else {
            "en".to_string()
        };

        Settings {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            mines: DEFAULT_MINES,
            language: lang,
            version: env!("CARGO_PKG_VERSION").to_string(),
            saved_at: String::new(),
        }
    }
}

impl Settings {
    /// Validate the persisted dimensions into a board config
    pub fn board_config(&self) -> Result<BoardConfig, ConfigError> {
        BoardConfig::new(self.rows, self.columns, self.mines)
    }

    /// Field-wise decode: any missing or malformed field keeps its default.
    /// Returns None only when the file is not TOML at all.
    fn from_toml_str(text: &str) -> Option<Settings> {
        let value: toml::Value = toml::from_str(text).ok()?;
        let mut settings = Settings::default();
        if let Some(v) = read_usize(&value, "rows") {
            settings.rows = v;
        }
        if let Some(v) = read_usize(&value, "columns") {
            settings.columns = v;
        }
        if let Some(v) = read_usize(&value, "mines") {
            settings.mines = v;
        }
        if let Some(v) = value.get("language").and_then(toml::Value::as_str) {
            settings.language = v.to_string();
        }
        Some(settings)
    }
}

fn read_usize(value: &toml::Value, key: &str) -> Option<usize> {
    value
        .get(key)
        .and_then(toml::Value::as_integer)
        .and_then(|v| usize::try_from(v).ok())
}

/// Settings file path under the platform config directory
/// Falls back to the current directory when no home is available
pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "xsaper", "xsaper") {
        let mut path = proj.config_dir().to_path_buf();
        path.push("xsaper.toml");
        return Some(path);
    }
    if let Ok(mut path) = std::env::current_dir() {
        path.push("xsaper.toml");
        return Some(path);
    }
    None
}

/// Load settings, creating the file with defaults when absent or unreadable
pub fn load_or_create() -> Settings {
    match settings_path() {
        Some(path) => load_or_create_at(&path),
        None => Settings::default(),
    }
}

/// Path-explicit variant, also used by the tests
pub fn load_or_create_at(path: &Path) -> Settings {
    if let Ok(text) = fs::read_to_string(path) {
        if let Some(settings) = Settings::from_toml_str(&text) {
            return settings;
        }
    }
    // Missing or corrupt file: recover by writing the defaults back
    let settings = Settings::default();
    save_at(&settings, path);
    settings
}

/// Best-effort save; a write failure is not fatal to the running game
pub fn save(settings: &Settings) {
    if let Some(path) = settings_path() {
        save_at(settings, &path);
    }
}

/// Stamp the metadata fields and write the record as TOML
pub fn save_at(settings: &Settings, path: &Path) {
    let mut stamped = settings.clone();
    stamped.version = env!("CARGO_PKG_VERSION").to_string();
    stamped.saved_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if let Ok(text) = toml::to_string(&stamped) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(path, text);
    }
}
